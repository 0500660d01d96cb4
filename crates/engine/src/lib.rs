pub mod controller;
pub mod runner;

pub use controller::{ExecutionController, ExecutionOutcome};
pub use runner::{BotRunner, RunnerConfig};
