use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Candle fetch came back empty or failed transiently. Recovered locally:
    /// the instrument is skipped for the current tick.
    #[error("no market data for {pair}: {detail}")]
    DataUnavailable { pair: String, detail: String },

    #[error("venue error: {0}")]
    Venue(String),

    /// Venue declined the placement. The attempt is invisible to risk
    /// accounting — no state mutation, no trade record.
    #[error("order rejected for {pair}")]
    OrderRejected { pair: String },

    /// Settlement query failed after a successful placement. Must never be
    /// coerced to a loss; the position state is genuinely unknown.
    #[error("settlement unknown for order {order_id}: {detail}")]
    SettlementUnknown { order_id: String, detail: String },

    /// Malformed schedule or threshold configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("trade log error: {0}")]
    Log(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
