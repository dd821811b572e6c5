//! Authenticated exchange endpoint: order placement and cancels.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    client::{signing::sign_action, HyperliquidClient},
    helpers::next_nonce,
    prelude::*,
    types::{CancelRequest, ExchangeResponseStatus, OrderRequest},
    Error,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaceOrder {
    pub orders: Vec<OrderRequest>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkCancel {
    pub cancels: Vec<CancelRequest>,
}

/// Everything the exchange endpoint accepts, discriminated by `type`.
///
/// Single cancels always travel as `cancel`, whichever id they carry.
/// Cancel-all is not a distinct action on the wire: it is a `cancelByCloid`
/// with an empty cancel list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Order(PlaceOrder),
    Cancel(BulkCancel),
    CancelByCloid(BulkCancel),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangePayload<'a> {
    action: &'a Action,
    nonce: u64,
    signature: String,
    vault_address: Option<Address>,
}

impl HyperliquidClient {
    /// Sign an action and POST it to `/exchange`.
    ///
    /// The signing gate runs before anything touches the network: without a
    /// configured key this returns [`Error::SigningKeyRequired`] immediately.
    /// A `status: err` response body becomes [`Error::ExchangeRejected`].
    async fn post_action(&self, action: Action) -> Result<serde_json::Value> {
        let wallet = self.wallet.as_ref().ok_or(Error::SigningKeyRequired)?;

        let nonce = next_nonce();
        let signature = sign_action(wallet, &action, nonce, self.wallet_address)?;
        let payload = ExchangePayload {
            action: &action,
            nonce,
            signature,
            vault_address: self.wallet_address,
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| Error::JsonParse(e.to_string()))?;

        debug!(nonce, "posting exchange action");
        let raw = self.http_client.post("/exchange", body).await?;
        let status: ExchangeResponseStatus =
            serde_json::from_str(&raw).map_err(|e| Error::JsonParse(e.to_string()))?;
        match status {
            ExchangeResponseStatus::Ok(response) => Ok(response),
            ExchangeResponseStatus::Err(message) => Err(Error::ExchangeRejected(message)),
        }
    }

    pub async fn place_order(&self, order: OrderRequest) -> Result<serde_json::Value> {
        self.place_orders(vec![order]).await
    }

    pub async fn place_orders(&self, orders: Vec<OrderRequest>) -> Result<serde_json::Value> {
        self.post_action(Action::Order(PlaceOrder { orders })).await
    }

    pub async fn cancel_order(&self, cancel: CancelRequest) -> Result<serde_json::Value> {
        self.post_action(Action::Cancel(BulkCancel {
            cancels: vec![cancel],
        }))
        .await
    }

    /// Cancel every resting order for the wallet.
    pub async fn cancel_all_orders(&self) -> Result<serde_json::Value> {
        self.post_action(Action::CancelByCloid(BulkCancel { cancels: vec![] }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::types::{Limit, OrderType};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const TEST_KEY: &str = "0xe908f86dbb4d55ac876378565aafeabc187f6690f046459397b17d9b9a19688e";
    const TEST_ADDRESS: &str = "0x1234567890123456789012345678901234567890";

    // Minimal one-shot HTTP server: accepts a single POST, hands back the raw
    // request body, and answers with a canned ok response.
    async fn capture_one_request(listener: TcpListener) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before the request completed");
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data).to_string();
            let Some(split) = text.find("\r\n\r\n") else {
                continue;
            };
            let body_len = text[..split]
                .lines()
                .find(|line| line.to_ascii_lowercase().starts_with("content-length:"))
                .and_then(|line| line.split(':').nth(1))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if text.len() < split + 4 + body_len {
                continue;
            }
            let body = text[split + 4..split + 4 + body_len].to_string();
            let reply_body = r#"{"status":"ok","response":{"type":"order"}}"#;
            let reply = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
                reply_body.len(),
                reply_body,
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            return body;
        }
    }

    fn trading_client_against(addr: std::net::SocketAddr) -> HyperliquidClient {
        let config = ServerConfig {
            api_url: format!("http://{addr}"),
            private_key: Some(TEST_KEY.to_string()),
            wallet_address: Some(TEST_ADDRESS.to_string()),
            ..Default::default()
        };
        HyperliquidClient::new(&config).unwrap()
    }

    fn sample_order() -> OrderRequest {
        OrderRequest {
            a: 0,
            b: true,
            p: "50000".to_string(),
            s: "0.1".to_string(),
            r: false,
            t: OrderType::Limit(Limit {
                tif: "Gtc".to_string(),
            }),
            c: None,
        }
    }

    #[test]
    fn action_discriminators() {
        let order = serde_json::to_value(Action::Order(PlaceOrder {
            orders: vec![sample_order()],
        }))
        .unwrap();
        assert_eq!(order["type"], "order");

        let cancel = serde_json::to_value(Action::Cancel(BulkCancel {
            cancels: vec![CancelRequest::by_oid(0, 123)],
        }))
        .unwrap();
        assert_eq!(cancel["type"], "cancel");
        assert_eq!(cancel["cancels"][0]["o"], 123);

        let by_cloid = serde_json::to_value(Action::CancelByCloid(BulkCancel { cancels: vec![] }))
            .unwrap();
        assert_eq!(by_cloid["type"], "cancelByCloid");
        assert_eq!(by_cloid["cancels"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn envelope_carries_the_configured_wallet_address() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let capture = tokio::spawn(capture_one_request(listener));

        let client = trading_client_against(addr);
        client.place_order(sample_order()).await.unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&capture.await.unwrap()).unwrap();
        assert_eq!(body["vaultAddress"], TEST_ADDRESS);
        assert_eq!(body["action"]["type"], "order");
        assert!(body["nonce"].as_u64().unwrap() > 0);
        let signature = body["signature"].as_str().unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 65 * 2);
    }

    #[tokio::test]
    async fn cloid_cancel_travels_as_a_cancel_action() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let capture = tokio::spawn(capture_one_request(listener));

        let client = trading_client_against(addr);
        client
            .cancel_order(CancelRequest::by_cloid(3, "0xabc"))
            .await
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&capture.await.unwrap()).unwrap();
        assert_eq!(body["action"]["type"], "cancel");
        assert_eq!(body["action"]["cancels"][0]["a"], 3);
        assert_eq!(body["action"]["cancels"][0]["c"], "0xabc");
        assert!(body["action"]["cancels"][0].get("o").is_none());
    }

    #[tokio::test]
    async fn writes_without_a_key_fail_before_the_network() {
        let client = HyperliquidClient::new(&ServerConfig::default()).unwrap();
        match client.place_order(sample_order()).await {
            Err(Error::SigningKeyRequired) => {}
            other => panic!("expected SigningKeyRequired, got {other:?}"),
        }
        match client.cancel_all_orders().await {
            Err(Error::SigningKeyRequired) => {}
            other => panic!("expected SigningKeyRequired, got {other:?}"),
        }
    }
}
