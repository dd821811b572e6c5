//! Tool catalog and dispatch.
//!
//! Every tool the server advertises is a variant of [`ToolKind`]; dispatch is
//! an exhaustive match, so adding a tool without wiring a handler is a compile
//! error.

mod account;
mod market;
mod trading;

use alloy::primitives::Address;
use serde_json::{json, Map, Value};

use crate::{client::HyperliquidClient, mcp::protocol::ToolDefinition, prelude::*, Error};

pub(crate) type ToolArgs = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetAllMids,
    GetL2Book,
    GetCandleSnapshot,
    GetOpenOrders,
    GetUserFills,
    GetUserFillsByTime,
    GetPortfolio,
    PlaceOrder,
    PlaceTriggerOrder,
    CancelOrder,
    CancelAllOrders,
}

impl ToolKind {
    pub const ALL: [ToolKind; 11] = [
        ToolKind::GetAllMids,
        ToolKind::GetL2Book,
        ToolKind::GetCandleSnapshot,
        ToolKind::GetOpenOrders,
        ToolKind::GetUserFills,
        ToolKind::GetUserFillsByTime,
        ToolKind::GetPortfolio,
        ToolKind::PlaceOrder,
        ToolKind::PlaceTriggerOrder,
        ToolKind::CancelOrder,
        ToolKind::CancelAllOrders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::GetAllMids => "get_all_mids",
            ToolKind::GetL2Book => "get_l2_book",
            ToolKind::GetCandleSnapshot => "get_candle_snapshot",
            ToolKind::GetOpenOrders => "get_open_orders",
            ToolKind::GetUserFills => "get_user_fills",
            ToolKind::GetUserFillsByTime => "get_user_fills_by_time",
            ToolKind::GetPortfolio => "get_portfolio",
            ToolKind::PlaceOrder => "place_order",
            ToolKind::PlaceTriggerOrder => "place_trigger_order",
            ToolKind::CancelOrder => "cancel_order",
            ToolKind::CancelAllOrders => "cancel_all_orders",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        ToolKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn definition(self) -> ToolDefinition {
        let user_only_schema = || {
            json!({
                "type": "object",
                "properties": {
                    "user": {
                        "type": "string",
                        "description": "User wallet address (optional, defaults to configured wallet)",
                    }
                },
                "required": [],
            })
        };

        match self {
            ToolKind::GetAllMids => ToolDefinition {
                name: self.name(),
                description: "Get current mid prices for all coins on Hyperliquid",
                input_schema: json!({"type": "object", "properties": {}, "required": []}),
            },
            ToolKind::GetL2Book => ToolDefinition {
                name: self.name(),
                description: "Get L2 order book snapshot for a specific coin",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "coin": {
                            "type": "string",
                            "description": "The coin symbol (e.g., BTC, ETH, SOL)",
                        },
                        "nSigFigs": {
                            "type": "number",
                            "description": "Number of significant figures for price aggregation (optional)",
                            "minimum": 1,
                            "maximum": 5,
                        },
                    },
                    "required": ["coin"],
                }),
            },
            ToolKind::GetCandleSnapshot => ToolDefinition {
                name: self.name(),
                description: "Get historical candle data for a specific coin",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "coin": {
                            "type": "string",
                            "description": "The coin symbol (e.g., BTC, ETH, SOL)",
                        },
                        "interval": {
                            "type": "string",
                            "description": "Candle interval",
                            "enum": ["1m", "5m", "15m", "1h", "4h", "1d", "1w", "1M"],
                        },
                        "startTime": {
                            "type": "number",
                            "description": "Start time in milliseconds (optional)",
                        },
                        "endTime": {
                            "type": "number",
                            "description": "End time in milliseconds (optional)",
                        },
                    },
                    "required": ["coin", "interval"],
                }),
            },
            ToolKind::GetOpenOrders => ToolDefinition {
                name: self.name(),
                description: "Get all open orders for the configured wallet or a specific user",
                input_schema: user_only_schema(),
            },
            ToolKind::GetUserFills => ToolDefinition {
                name: self.name(),
                description:
                    "Get trading history (fills) for the configured wallet or a specific user",
                input_schema: user_only_schema(),
            },
            ToolKind::GetUserFillsByTime => ToolDefinition {
                name: self.name(),
                description: "Get trading history (fills) for a specific time range",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user": {
                            "type": "string",
                            "description": "User wallet address (optional, defaults to configured wallet)",
                        },
                        "startTime": {
                            "type": "number",
                            "description": "Start time in milliseconds",
                        },
                        "endTime": {
                            "type": "number",
                            "description": "End time in milliseconds (optional)",
                        },
                    },
                    "required": ["startTime"],
                }),
            },
            ToolKind::GetPortfolio => ToolDefinition {
                name: self.name(),
                description: "Get portfolio information including positions, PnL, and margin usage",
                input_schema: user_only_schema(),
            },
            ToolKind::PlaceOrder => ToolDefinition {
                name: self.name(),
                description: "Place a limit or trigger order on Hyperliquid",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "assetIndex": {
                            "type": "number",
                            "description": "Asset index for the coin (0 for BTC, 1 for ETH, etc.)",
                        },
                        "isBuy": {
                            "type": "boolean",
                            "description": "True for buy order, false for sell order",
                        },
                        "price": {
                            "type": "string",
                            "description": "Order price as string",
                        },
                        "size": {
                            "type": "string",
                            "description": "Order size as string",
                        },
                        "reduceOnly": {
                            "type": "boolean",
                            "description": "Whether this is a reduce-only order (optional, default false)",
                        },
                        "timeInForce": {
                            "type": "string",
                            "description": "Time in force",
                            "enum": ["Gtc", "Ioc", "Alo"],
                        },
                        "clientOrderId": {
                            "type": "string",
                            "description": "Client order ID (optional)",
                        },
                    },
                    "required": ["assetIndex", "isBuy", "price", "size", "timeInForce"],
                }),
            },
            ToolKind::PlaceTriggerOrder => ToolDefinition {
                name: self.name(),
                description: "Place a trigger order (stop-loss or take-profit) on Hyperliquid",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "assetIndex": {
                            "type": "number",
                            "description": "Asset index for the coin (0 for BTC, 1 for ETH, etc.)",
                        },
                        "isBuy": {
                            "type": "boolean",
                            "description": "True for buy order, false for sell order",
                        },
                        "size": {
                            "type": "string",
                            "description": "Order size as string",
                        },
                        "triggerPrice": {
                            "type": "string",
                            "description": "Trigger price as string",
                        },
                        "isMarket": {
                            "type": "boolean",
                            "description": "Whether to execute as market order when triggered",
                        },
                        "triggerType": {
                            "type": "string",
                            "description": "Trigger type",
                            "enum": ["tp", "sl"],
                        },
                        "reduceOnly": {
                            "type": "boolean",
                            "description": "Whether this is a reduce-only order (optional, default false)",
                        },
                        "clientOrderId": {
                            "type": "string",
                            "description": "Client order ID (optional)",
                        },
                    },
                    "required": ["assetIndex", "isBuy", "size", "triggerPrice", "isMarket", "triggerType"],
                }),
            },
            ToolKind::CancelOrder => ToolDefinition {
                name: self.name(),
                description: "Cancel a specific order by order ID or client order ID",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "assetIndex": {
                            "type": "number",
                            "description": "Asset index for the coin",
                        },
                        "orderId": {
                            "type": "number",
                            "description": "Order ID to cancel (use either orderId or clientOrderId)",
                        },
                        "clientOrderId": {
                            "type": "string",
                            "description": "Client order ID to cancel (use either orderId or clientOrderId)",
                        },
                    },
                    "required": ["assetIndex"],
                }),
            },
            ToolKind::CancelAllOrders => ToolDefinition {
                name: self.name(),
                description: "Cancel all open orders",
                input_schema: json!({"type": "object", "properties": {}, "required": []}),
            },
        }
    }
}

/// Everything `tools/list` advertises.
pub fn catalog() -> Vec<ToolDefinition> {
    ToolKind::ALL.into_iter().map(ToolKind::definition).collect()
}

pub struct ToolRouter {
    client: HyperliquidClient,
}

impl ToolRouter {
    pub fn new(client: HyperliquidClient) -> ToolRouter {
        ToolRouter { client }
    }

    pub async fn dispatch(&self, name: &str, args: &ToolArgs) -> Result<String> {
        let kind = ToolKind::from_name(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        match kind {
            ToolKind::GetAllMids => market::get_all_mids(&self.client).await,
            ToolKind::GetL2Book => market::get_l2_book(&self.client, args).await,
            ToolKind::GetCandleSnapshot => market::get_candle_snapshot(&self.client, args).await,
            ToolKind::GetOpenOrders => account::get_open_orders(&self.client, args).await,
            ToolKind::GetUserFills => account::get_user_fills(&self.client, args).await,
            ToolKind::GetUserFillsByTime => {
                account::get_user_fills_by_time(&self.client, args).await
            }
            ToolKind::GetPortfolio => account::get_portfolio(&self.client, args).await,
            ToolKind::PlaceOrder => trading::place_order(&self.client, args).await,
            ToolKind::PlaceTriggerOrder => trading::place_trigger_order(&self.client, args).await,
            ToolKind::CancelOrder => trading::cancel_order(&self.client, args).await,
            ToolKind::CancelAllOrders => trading::cancel_all_orders(&self.client).await,
        }
    }
}

// Argument extraction. MCP clients send loosely-typed JSON; everything funnels
// through these so missing or mistyped fields all read the same way.

pub(crate) fn required_str<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_arguments(format!("{key} must be a string")))
}

pub(crate) fn optional_str<'a>(args: &'a ToolArgs, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(Error::invalid_arguments(format!("{key} must be a string"))),
    }
}

pub(crate) fn required_bool(args: &ToolArgs, key: &str) -> Result<bool> {
    args.get(key)
        .and_then(Value::as_bool)
        .ok_or_else(|| Error::invalid_arguments(format!("{key} must be a boolean")))
}

pub(crate) fn optional_bool(args: &ToolArgs, key: &str, default: bool) -> Result<bool> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Error::invalid_arguments(format!("{key} must be a boolean"))),
    }
}

pub(crate) fn required_u64(args: &ToolArgs, key: &str) -> Result<u64> {
    args.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::invalid_arguments(format!("{key} must be a non-negative number")))
}

pub(crate) fn optional_u64(args: &ToolArgs, key: &str) -> Result<Option<u64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            Error::invalid_arguments(format!("{key} must be a non-negative number"))
        }),
    }
}

pub(crate) fn required_u32(args: &ToolArgs, key: &str) -> Result<u32> {
    let raw = required_u64(args, key)?;
    u32::try_from(raw)
        .map_err(|_| Error::invalid_arguments(format!("{key} is out of range")))
}

pub(crate) fn optional_u32(args: &ToolArgs, key: &str) -> Result<Option<u32>> {
    optional_u64(args, key)?
        .map(|raw| {
            u32::try_from(raw)
                .map_err(|_| Error::invalid_arguments(format!("{key} is out of range")))
        })
        .transpose()
}

pub(crate) fn optional_address(args: &ToolArgs, key: &str) -> Result<Option<Address>> {
    optional_str(args, key)?
        .map(|raw| {
            raw.parse::<Address>()
                .map_err(|e| Error::AddressParse(e.to_string()))
        })
        .transpose()
}
