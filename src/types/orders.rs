//! Wire DTOs for the exchange endpoint.
//!
//! Field names are the API's single-letter abbreviations; the tool layer maps
//! human-readable argument names onto these before signing.

use serde::{Deserialize, Serialize};

/// Time-in-force wrapper for resting orders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    /// "Gtc", "Ioc" or "Alo"
    pub tif: String,
}

/// Trigger parameters for stop-loss / take-profit orders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub trigger_px: String,
    pub is_market: bool,
    /// "tp" or "sl"
    pub tpsl: String,
}

/// Exactly one of limit or trigger parameters is present per order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit(Limit),
    Trigger(Trigger),
}

/// A single order as the exchange expects it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// asset index
    pub a: u32,
    /// is buy
    pub b: bool,
    /// price ("0" for trigger orders)
    pub p: String,
    /// size
    pub s: String,
    /// reduce only
    pub r: bool,
    /// order type
    pub t: OrderType,
    /// client order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
}

/// A single cancel as the exchange expects it. Exactly one of `o` / `c` is
/// set; the constructors enforce this.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    /// asset index
    pub a: u32,
    /// order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o: Option<u64>,
    /// client order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
}

impl CancelRequest {
    pub fn by_oid(asset: u32, oid: u64) -> Self {
        Self {
            a: asset,
            o: Some(oid),
            c: None,
        }
    }

    pub fn by_cloid(asset: u32, cloid: impl Into<String>) -> Self {
        Self {
            a: asset,
            o: None,
            c: Some(cloid.into()),
        }
    }
}
