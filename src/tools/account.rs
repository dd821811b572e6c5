//! Account tools: open orders, fill history, portfolio summary.

use chrono::DateTime;

use crate::{
    client::HyperliquidClient,
    prelude::*,
    tools::{optional_address, optional_u64, required_u64, ToolArgs},
    types::{ClearinghouseState, Fill, OpenOrder},
};

// get_user_fills truncates to this many lines; get_user_fills_by_time does
// not, since the caller already bounded the range.
const FILL_DISPLAY_LIMIT: usize = 20;

pub(crate) async fn get_open_orders(
    client: &HyperliquidClient,
    args: &ToolArgs,
) -> Result<String> {
    let user = optional_address(args, "user")?;
    let orders = client.open_orders(user).await?;
    Ok(format_open_orders(&orders))
}

pub(crate) async fn get_user_fills(client: &HyperliquidClient, args: &ToolArgs) -> Result<String> {
    let user = optional_address(args, "user")?;
    let fills = client.user_fills(user).await?;
    Ok(format_fills(&fills, true))
}

pub(crate) async fn get_user_fills_by_time(
    client: &HyperliquidClient,
    args: &ToolArgs,
) -> Result<String> {
    let user = optional_address(args, "user")?;
    let start_time = required_u64(args, "startTime")?;
    let end_time = optional_u64(args, "endTime")?;
    let fills = client.user_fills_by_time(user, start_time, end_time).await?;

    if fills.is_empty() {
        return Ok("No trading history found for the specified time range.".to_string());
    }
    Ok(format_fills(&fills, false))
}

pub(crate) async fn get_portfolio(client: &HyperliquidClient, args: &ToolArgs) -> Result<String> {
    let user = optional_address(args, "user")?;
    let state = client.clearinghouse_state(user).await?;
    Ok(format_portfolio(&state))
}

fn side_label(side: &str) -> &'static str {
    if side == "B" {
        "BUY"
    } else {
        "SELL"
    }
}

fn timestamp_label(millis: u64) -> String {
    DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

fn format_open_orders(orders: &[OpenOrder]) -> String {
    if orders.is_empty() {
        return "No open orders found.".to_string();
    }

    let lines = orders
        .iter()
        .map(|order| {
            format!(
                "{} {} {} @ {} (ID: {})",
                order.coin,
                side_label(&order.side),
                order.sz,
                order.limit_px,
                order.oid,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Open Orders ({}):\n\n{}", orders.len(), lines)
}

fn format_fills(fills: &[Fill], truncate: bool) -> String {
    if fills.is_empty() {
        return "No trading history found.".to_string();
    }

    let shown = if truncate {
        &fills[..fills.len().min(FILL_DISPLAY_LIMIT)]
    } else {
        fills
    };

    let lines = shown
        .iter()
        .map(|fill| {
            format!(
                "{}: {} {} {} @ {} (Fee: {})",
                timestamp_label(fill.time),
                fill.coin,
                side_label(&fill.side),
                fill.sz,
                fill.px,
                fill.fee,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let more = if truncate && fills.len() > FILL_DISPLAY_LIMIT {
        format!("\n... and {} more", fills.len() - FILL_DISPLAY_LIMIT)
    } else {
        String::new()
    };

    format!("Trading History ({} fills):\n\n{}{}", fills.len(), lines, more)
}

fn format_portfolio(state: &ClearinghouseState) -> String {
    let last_updated = state
        .time
        .map(timestamp_label)
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Portfolio Summary:\n\n\
         Account Value: ${}\n\
         Total Notional Position: ${}\n\
         Total Margin Used: ${}\n\
         Withdrawable: ${}\n\
         Last Updated: {}",
        state.margin_summary.account_value,
        state.margin_summary.total_ntl_pos,
        state.margin_summary.total_margin_used,
        state.withdrawable,
        last_updated,
    )
}
