//! Newline-delimited JSON-RPC server over stdio.
//!
//! stdout carries protocol frames only; all logging goes to stderr.

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::{
    client::HyperliquidClient,
    mcp::{
        jsonrpc::{codes, JsonRpcRequest, JsonRpcResponse},
        protocol::{initialize_result, CallToolParams, CallToolResult},
    },
    tools::{catalog, ToolRouter},
};

pub struct McpServer {
    router: ToolRouter,
}

impl McpServer {
    pub fn new(client: HyperliquidClient) -> McpServer {
        McpServer {
            router: ToolRouter::new(client),
        }
    }

    /// Read requests line by line from stdin until EOF, answering on stdout.
    pub async fn serve(&self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("Hyperliquid MCP server running on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            match serde_json::to_string(&response) {
                Ok(serialized) => {
                    stdout.write_all(serialized.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => error!("failed to serialize response: {e}"),
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("unparseable request line: {e}");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        self.handle_request(request).await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications (no id) get no response, whatever the method.
        let id = request.id?;

        debug!(method = %request.method, "handling request");
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::result(id, initialize_result()),
            "ping" => JsonRpcResponse::result(id, Value::Object(Default::default())),
            "tools/list" => {
                JsonRpcResponse::result(id, serde_json::json!({ "tools": catalog() }))
            }
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    /// Tool failures never become JSON-RPC errors: they come back as a result
    /// with `isError` set so the client can surface the message.
    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    "tools/call requires params",
                )
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                )
            }
        };

        let arguments = params.arguments.unwrap_or_default();
        let result = match self.router.dispatch(&params.name, &arguments).await {
            Ok(text) => CallToolResult::success(text),
            Err(e) => {
                warn!(tool = %params.name, "tool call failed: {e}");
                CallToolResult::error(format!("Error: {e}"))
            }
        };

        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::result(id, value),
            Err(e) => JsonRpcResponse::error(
                id,
                codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {e}"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(HyperliquidClient::new(&ServerConfig::default()).unwrap())
    }

    fn response_json(response: JsonRpcResponse) -> Value {
        serde_json::to_value(&response).unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_server() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let value = response_json(response);
        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
        assert!(value["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_returns_the_catalog() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let value = response_json(response);
        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 11);
        assert!(tools.iter().any(|t| t["name"] == "place_order"));
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn unparseable_lines_get_a_parse_error() {
        let response = server().handle_line("{not json").await.unwrap();
        let value = response_json(response);
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn unknown_methods_get_method_not_found() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#)
            .await
            .unwrap();
        let value = response_json(response);
        assert_eq!(value["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn unknown_tools_fail_inside_the_result() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "get_everything", "arguments": {}},
        });
        let response = server()
            .handle_line(&request.to_string())
            .await
            .unwrap();
        let value = response_json(response);
        assert!(value.get("error").is_none());
        assert_eq!(value["result"]["isError"], true);
        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error:"));
        assert!(text.contains("get_everything"));
    }

    #[tokio::test]
    async fn write_tools_fail_softly_without_a_key() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {
                "name": "place_order",
                "arguments": {
                    "assetIndex": 0,
                    "isBuy": true,
                    "price": "50000",
                    "size": "0.1",
                    "timeInForce": "Gtc",
                },
            },
        });
        let response = server()
            .handle_line(&request.to_string())
            .await
            .unwrap();
        let value = response_json(response);
        assert_eq!(value["result"]["isError"], true);
        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Private key required"));
    }

    #[tokio::test]
    async fn tools_call_without_params_is_invalid() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"tools/call"}"#)
            .await
            .unwrap();
        let value = response_json(response);
        assert_eq!(value["error"]["code"], -32602);
    }
}
