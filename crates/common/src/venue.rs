use async_trait::async_trait;

use crate::{Candle, Direction, OrderTicket, Result};

/// Market data source feeding the indicator pipeline.
///
/// `PaperVenue` implements this for simulation; a live adapter would wrap the
/// venue's HTTP/websocket API.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent `count` candles of `period_secs` duration,
    /// oldest first. May return an empty or short series on transient
    /// failure; callers must treat that as "no decision this tick", never as
    /// an error to propagate.
    async fn fetch_candles(&self, pair: &str, period_secs: u32, count: usize)
        -> Result<Vec<Candle>>;
}

/// Order venue for fixed-expiry directional bets.
///
/// Only `ExecutionController` in `crates/engine` should hold a reference to a
/// `dyn OrderVenue`. Every placement must pass the risk governor first.
#[async_trait]
pub trait OrderVenue: Send + Sync {
    /// Place a directional order with a fixed expiry. A ticket with
    /// `accepted == false` means the venue declined and the order never
    /// happened.
    async fn place_order(
        &self,
        pair: &str,
        direction: Direction,
        stake: f64,
        expiry_minutes: u32,
    ) -> Result<OrderTicket>;

    /// Signed profit of an expired order: positive = win, zero = tie,
    /// negative = loss.
    async fn get_settlement(&self, order_id: &str) -> Result<f64>;
}
