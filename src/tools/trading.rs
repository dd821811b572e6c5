//! Trading tools: order placement and cancels.

use tracing::warn;

use crate::{
    client::HyperliquidClient,
    prelude::*,
    tools::{optional_bool, optional_str, optional_u64, required_bool, required_str, required_u32, ToolArgs},
    types::{CancelRequest, Limit, OrderRequest, OrderType, Trigger},
    Error,
};

pub(crate) async fn place_order(client: &HyperliquidClient, args: &ToolArgs) -> Result<String> {
    let order = OrderRequest {
        a: required_u32(args, "assetIndex")?,
        b: required_bool(args, "isBuy")?,
        p: required_str(args, "price")?.to_string(),
        s: required_str(args, "size")?.to_string(),
        r: optional_bool(args, "reduceOnly", false)?,
        t: OrderType::Limit(Limit {
            tif: required_str(args, "timeInForce")?.to_string(),
        }),
        c: optional_str(args, "clientOrderId")?.map(str::to_string),
    };

    let response = client.place_order(order).await?;
    Ok(format!(
        "Order placed successfully!\n\n{}",
        pretty(&response)?
    ))
}

pub(crate) async fn place_trigger_order(
    client: &HyperliquidClient,
    args: &ToolArgs,
) -> Result<String> {
    let order = OrderRequest {
        a: required_u32(args, "assetIndex")?,
        b: required_bool(args, "isBuy")?,
        // Price is unused for trigger orders but the wire format requires it.
        p: "0".to_string(),
        s: required_str(args, "size")?.to_string(),
        r: optional_bool(args, "reduceOnly", false)?,
        t: OrderType::Trigger(Trigger {
            trigger_px: required_str(args, "triggerPrice")?.to_string(),
            is_market: required_bool(args, "isMarket")?,
            tpsl: required_str(args, "triggerType")?.to_string(),
        }),
        c: optional_str(args, "clientOrderId")?.map(str::to_string),
    };

    let response = client.place_order(order).await?;
    Ok(format!(
        "Trigger order placed successfully!\n\n{}",
        pretty(&response)?
    ))
}

pub(crate) async fn cancel_order(client: &HyperliquidClient, args: &ToolArgs) -> Result<String> {
    let asset = required_u32(args, "assetIndex")?;
    let order_id = optional_u64(args, "orderId")?;
    let client_order_id = optional_str(args, "clientOrderId")?;

    let cancel = match (order_id, client_order_id) {
        (Some(oid), cloid) => {
            if cloid.is_some() {
                warn!(oid, "both orderId and clientOrderId given, using orderId");
            }
            CancelRequest::by_oid(asset, oid)
        }
        (None, Some(cloid)) => CancelRequest::by_cloid(asset, cloid),
        (None, None) => return Err(Error::MissingCancelTarget),
    };

    let response = client.cancel_order(cancel).await?;
    Ok(format!(
        "Order cancelled successfully!\n\n{}",
        pretty(&response)?
    ))
}

pub(crate) async fn cancel_all_orders(client: &HyperliquidClient) -> Result<String> {
    let response = client.cancel_all_orders().await?;
    Ok(format!(
        "All orders cancelled successfully!\n\n{}",
        pretty(&response)?
    ))
}

fn pretty(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::JsonParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArgs {
        value.as_object().cloned().unwrap_or_default()
    }

    fn read_only_client() -> HyperliquidClient {
        HyperliquidClient::new(&ServerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn place_order_validates_before_signing() {
        let client = read_only_client();
        // Missing isBuy: argument validation fires before the signing gate.
        let result = place_order(&client, &args(json!({"assetIndex": 0}))).await;
        match result {
            Err(Error::InvalidArguments(msg)) => assert!(msg.contains("isBuy")),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_order_hits_the_signing_gate() {
        let client = read_only_client();
        let result = place_order(
            &client,
            &args(json!({
                "assetIndex": 0,
                "isBuy": true,
                "price": "50000",
                "size": "0.1",
                "timeInForce": "Gtc",
            })),
        )
        .await;
        assert!(matches!(result, Err(Error::SigningKeyRequired)));
    }

    #[tokio::test]
    async fn trigger_order_requires_trigger_fields() {
        let client = read_only_client();
        let result = place_trigger_order(
            &client,
            &args(json!({
                "assetIndex": 0,
                "isBuy": false,
                "size": "1",
                "triggerPrice": "1800",
                "isMarket": true,
            })),
        )
        .await;
        match result {
            Err(Error::InvalidArguments(msg)) => assert!(msg.contains("triggerType")),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancel_requires_a_target() {
        let client = read_only_client();
        let result = cancel_order(&client, &args(json!({"assetIndex": 3}))).await;
        assert!(matches!(result, Err(Error::MissingCancelTarget)));
    }

    #[tokio::test]
    async fn cancel_with_oid_reaches_the_signing_gate() {
        let client = read_only_client();
        let result = cancel_order(
            &client,
            &args(json!({"assetIndex": 3, "orderId": 82382, "clientOrderId": "0xabc"})),
        )
        .await;
        // Both targets given: orderId wins, then the key check fails.
        assert!(matches!(result, Err(Error::SigningKeyRequired)));
    }
}
