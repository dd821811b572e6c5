//! Response DTOs for the info and exchange endpoints.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct OrderBookLevel {
    pub px: String,
    pub sz: String,
    pub n: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct L2Snapshot {
    pub coin: String,
    /// `levels[0]` is bids, `levels[1]` is asks
    pub levels: Vec<Vec<OrderBookLevel>>,
    pub time: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Candle {
    #[serde(rename = "t")]
    pub time_open: u64,
    #[serde(rename = "T")]
    pub time_close: u64,
    #[serde(rename = "s")]
    pub coin: String,
    #[serde(rename = "i")]
    pub interval: String,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "v")]
    pub vlm: String,
    #[serde(rename = "n")]
    pub num_trades: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    pub coin: String,
    pub limit_px: String,
    pub oid: u64,
    /// "B" for bid, "A" for ask
    pub side: String,
    pub sz: String,
    pub timestamp: u64,
    #[serde(default)]
    pub cloid: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub coin: String,
    pub px: String,
    pub sz: String,
    pub side: String,
    pub time: u64,
    pub oid: u64,
    pub crossed: bool,
    pub fee: String,
    pub tid: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    pub account_value: String,
    pub total_ntl_pos: String,
    pub total_raw_usd: String,
    pub total_margin_used: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    pub margin_summary: MarginSummary,
    pub cross_margin_summary: MarginSummary,
    pub withdrawable: String,
    #[serde(default)]
    pub time: Option<u64>,
}

/// Tagged `/exchange` response: `{"status":"ok","response":…}` or
/// `{"status":"err","response":"msg"}`.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "status", content = "response", rename_all = "camelCase")]
pub enum ExchangeResponseStatus {
    Ok(serde_json::Value),
    Err(String),
}
