pub mod config;
pub mod evaluator;
pub mod frame;
pub mod gate;
pub mod indicators;

pub use config::{
    IndicatorParams, InstrumentConfig, InstrumentFileConfig, SessionRule, Thresholds,
    TradingHours,
};
pub use frame::{IndicatorFrame, IndicatorRow, MIN_HISTORY};
pub use gate::GateDecision;
