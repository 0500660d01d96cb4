use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed-duration OHLCV price bar.
/// Sequences are ordered oldest-first with strictly increasing timestamps
/// and are immutable once fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Direction of a fixed-expiry binary bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Call,
    Put,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Call => write!(f, "call"),
            Direction::Put => write!(f, "put"),
        }
    }
}

/// Final classification of a settled trade.
///
/// `Unknown` marks a trade whose settlement could not be determined after a
/// successful placement; it is persisted for reconciliation but excluded from
/// risk accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Tie,
    Loss,
    Unknown,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Tie => write!(f, "tie"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Unknown => write!(f, "unknown"),
        }
    }
}

/// Indicator values captured at signal time and carried onto the trade
/// record for later analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub adx: f64,
    pub macd: f64,
    pub rsi: f64,
    pub ema: f64,
    pub slope: f64,
}

/// A directional trade recommendation emitted by the signal evaluator.
/// Consumed immediately by the execution controller, then discarded — only
/// the resulting `Trade` persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub pair: String,
    pub direction: Direction,
    /// Close price of the candle the signal was derived from.
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub at: DateTime<Utc>,
}

/// Venue acknowledgement of an order placement attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub accepted: bool,
    pub order_id: String,
}

/// One settled (or settlement-unknown) trade. Immutable after creation;
/// appended to the durable trade log, never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub opened_at: DateTime<Utc>,
    pub pair: String,
    pub direction: Direction,
    pub stake: f64,
    pub entry_price: f64,
    pub outcome: Outcome,
    /// Signed realized profit. A loss records the negative stake.
    pub profit: f64,
    /// Running capital after this trade was accounted.
    pub capital_after: f64,
    pub snapshot: IndicatorSnapshot,
}
