pub mod governor;

pub use governor::{evaluate, GovernorVerdict, HaltReason, RiskLimits, RiskState};
