//! Market data tools: mids, order book, candles.

use std::collections::BTreeMap;

use crate::{
    client::{CandleSnapshotRequest, HyperliquidClient},
    prelude::*,
    tools::{optional_u32, optional_u64, required_str, ToolArgs},
    types::{Candle, L2Snapshot},
    Error,
};

pub(crate) async fn get_all_mids(client: &HyperliquidClient) -> Result<String> {
    let mids = client.all_mids().await?;
    format_all_mids(&mids)
}

pub(crate) async fn get_l2_book(client: &HyperliquidClient, args: &ToolArgs) -> Result<String> {
    let coin = required_str(args, "coin")?;
    let n_sig_figs = optional_u32(args, "nSigFigs")?;
    let book = client.l2_snapshot(coin.to_string(), n_sig_figs).await?;
    Ok(format_l2_book(coin, &book))
}

pub(crate) async fn get_candle_snapshot(
    client: &HyperliquidClient,
    args: &ToolArgs,
) -> Result<String> {
    let coin = required_str(args, "coin")?;
    let interval = required_str(args, "interval")?;
    let req = CandleSnapshotRequest {
        coin: coin.to_string(),
        interval: interval.to_string(),
        start_time: optional_u64(args, "startTime")?,
        end_time: optional_u64(args, "endTime")?,
    };
    let candles = client.candle_snapshot(req).await?;
    Ok(format_candles(coin, interval, &candles))
}

fn format_all_mids(mids: &BTreeMap<String, String>) -> Result<String> {
    let pretty =
        serde_json::to_string_pretty(mids).map_err(|e| Error::JsonParse(e.to_string()))?;
    Ok(format!("Mid prices for all coins:\n{pretty}"))
}

fn format_l2_book(coin: &str, book: &L2Snapshot) -> String {
    let empty = Vec::new();
    let bids = book.levels.first().unwrap_or(&empty);
    let asks = book.levels.get(1).unwrap_or(&empty);

    let side_text = |levels: &[crate::types::OrderBookLevel]| {
        levels
            .iter()
            .map(|level| format!("{} @ {}", level.px, level.sz))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "L2 Order Book for {coin}:\n\nBids ({} levels):\n{}\n\nAsks ({} levels):\n{}",
        bids.len(),
        side_text(bids),
        asks.len(),
        side_text(asks),
    )
}

fn format_candles(coin: &str, interval: &str, candles: &[Candle]) -> String {
    let lines = candles
        .iter()
        .map(|candle| {
            format!(
                "{}: O:{} H:{} L:{} C:{} V:{}",
                candle.time_open, candle.open, candle.high, candle.low, candle.close, candle.vlm
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Candle data for {coin} ({interval}):\n{lines}")
}
