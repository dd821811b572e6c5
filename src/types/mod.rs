mod orders;
mod responses;

pub use orders::{CancelRequest, Limit, OrderRequest, OrderType, Trigger};
pub use responses::{
    Candle, ClearinghouseState, ExchangeResponseStatus, Fill, L2Snapshot, MarginSummary,
    OpenOrder, OrderBookLevel,
};
