//! Unauthenticated info endpoint queries.

use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    client::HyperliquidClient,
    prelude::*,
    types::{Candle, ClearinghouseState, Fill, L2Snapshot, OpenOrder},
    Error,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CandleSnapshotRequest {
    pub coin: String,
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

/// Every info query this server issues, discriminated by `type`.
///
/// Candle snapshots nest their parameters under a `req` key; everything else
/// is flat.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    AllMids,
    #[serde(rename_all = "camelCase")]
    L2Book {
        coin: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        n_sig_figs: Option<u32>,
    },
    CandleSnapshot {
        req: CandleSnapshotRequest,
    },
    OpenOrders {
        user: Address,
    },
    UserFills {
        user: Address,
    },
    #[serde(rename_all = "camelCase")]
    UserFillsByTime {
        user: Address,
        start_time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<u64>,
    },
    ClearinghouseState {
        user: Address,
    },
}

impl HyperliquidClient {
    async fn send_info_request<T: for<'a> Deserialize<'a>>(
        &self,
        request: InfoRequest,
    ) -> Result<T> {
        let body =
            serde_json::to_string(&request).map_err(|e| Error::JsonParse(e.to_string()))?;
        let raw = self.http_client.post("/info", body).await?;
        serde_json::from_str(&raw).map_err(|e| Error::JsonParse(e.to_string()))
    }

    /// Mid price for every listed coin, keyed by coin symbol.
    pub async fn all_mids(&self) -> Result<BTreeMap<String, String>> {
        self.send_info_request(InfoRequest::AllMids).await
    }

    pub async fn l2_snapshot(&self, coin: String, n_sig_figs: Option<u32>) -> Result<L2Snapshot> {
        self.send_info_request(InfoRequest::L2Book { coin, n_sig_figs })
            .await
    }

    pub async fn candle_snapshot(&self, req: CandleSnapshotRequest) -> Result<Vec<Candle>> {
        self.send_info_request(InfoRequest::CandleSnapshot { req })
            .await
    }

    pub async fn open_orders(&self, user: Option<Address>) -> Result<Vec<OpenOrder>> {
        let user = self.resolve_user(user)?;
        self.send_info_request(InfoRequest::OpenOrders { user })
            .await
    }

    pub async fn user_fills(&self, user: Option<Address>) -> Result<Vec<Fill>> {
        let user = self.resolve_user(user)?;
        self.send_info_request(InfoRequest::UserFills { user }).await
    }

    pub async fn user_fills_by_time(
        &self,
        user: Option<Address>,
        start_time: u64,
        end_time: Option<u64>,
    ) -> Result<Vec<Fill>> {
        let user = self.resolve_user(user)?;
        self.send_info_request(InfoRequest::UserFillsByTime {
            user,
            start_time,
            end_time,
        })
        .await
    }

    pub async fn clearinghouse_state(&self, user: Option<Address>) -> Result<ClearinghouseState> {
        let user = self.resolve_user(user)?;
        self.send_info_request(InfoRequest::ClearinghouseState { user })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Address {
        "0x1234567890123456789012345678901234567890"
            .parse()
            .unwrap()
    }

    #[test]
    fn all_mids_wire_shape() {
        assert_eq!(
            serde_json::to_string(&InfoRequest::AllMids).unwrap(),
            r#"{"type":"allMids"}"#
        );
    }

    #[test]
    fn l2_book_omits_absent_sig_figs() {
        let bare = InfoRequest::L2Book {
            coin: "BTC".to_string(),
            n_sig_figs: None,
        };
        assert_eq!(
            serde_json::to_string(&bare).unwrap(),
            r#"{"type":"l2Book","coin":"BTC"}"#
        );

        let with_figs = InfoRequest::L2Book {
            coin: "BTC".to_string(),
            n_sig_figs: Some(3),
        };
        assert_eq!(
            serde_json::to_string(&with_figs).unwrap(),
            r#"{"type":"l2Book","coin":"BTC","nSigFigs":3}"#
        );
    }

    #[test]
    fn candle_snapshot_nests_its_request() {
        let request = InfoRequest::CandleSnapshot {
            req: CandleSnapshotRequest {
                coin: "ETH".to_string(),
                interval: "1h".to_string(),
                start_time: Some(1700000000000),
                end_time: None,
            },
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"type":"candleSnapshot","req":{"coin":"ETH","interval":"1h","startTime":1700000000000}}"#
        );
    }

    #[test]
    fn account_queries_carry_the_user() {
        let value = serde_json::to_value(InfoRequest::OpenOrders { user: user() }).unwrap();
        assert_eq!(value["type"], "openOrders");
        assert_eq!(value["user"], "0x1234567890123456789012345678901234567890");

        let value = serde_json::to_value(InfoRequest::ClearinghouseState { user: user() }).unwrap();
        assert_eq!(value["type"], "clearinghouseState");

        let value = serde_json::to_value(InfoRequest::UserFillsByTime {
            user: user(),
            start_time: 1,
            end_time: Some(2),
        })
        .unwrap();
        assert_eq!(value["startTime"], 1);
        assert_eq!(value["endTime"], 2);
    }
}
