use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, SystemClock};
use engine::{BotRunner, ExecutionController, RunnerConfig};
use paper::PaperVenue;
use risk::{RiskLimits, RiskState};
use strategy::InstrumentFileConfig;
use tradelog::CsvTradeLog;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(stake = cfg.stake, capital = cfg.starting_capital, "PipBot starting");

    let file = InstrumentFileConfig::load(&cfg.instrument_config_path)
        .unwrap_or_else(|e| panic!("Failed to load instrument config: {e}"));
    let instruments = file.enabled_instruments();
    if instruments.is_empty() {
        panic!("No enabled instruments in '{}'", cfg.instrument_config_path);
    }
    info!(count = instruments.len(), "Instruments loaded");

    // ── Trade log ─────────────────────────────────────────────────────────────
    let log = CsvTradeLog::open(&cfg.trade_log_path)
        .unwrap_or_else(|e| panic!("Failed to open trade log: {e}"));
    info!(path = %cfg.trade_log_path, "Trade log ready");

    // ── Venue (paper: simulated feed + settlement) ────────────────────────────
    let venue = Arc::new(PaperVenue::new(cfg.paper_payout_rate));
    let clock = Arc::new(SystemClock);

    // ── Execution + runner ────────────────────────────────────────────────────
    let controller = ExecutionController::new(
        venue.clone(),
        Box::new(log),
        clock.clone(),
        cfg.stake,
        cfg.expiry_minutes,
    );
    let runner = BotRunner::new(
        instruments,
        venue,
        controller,
        clock,
        RiskLimits {
            stop_loss: cfg.stop_loss,
            daily_loss_limit: cfg.daily_loss_limit,
            max_trades_per_day: cfg.max_trades_per_day,
        },
        RiskState::new(cfg.starting_capital),
        RunnerConfig {
            tick_interval: Duration::from_secs(cfg.tick_interval_secs),
            max_runtime: Duration::from_secs(cfg.max_runtime_secs),
            ..RunnerConfig::default()
        },
    );

    tokio::select! {
        state = runner.run() => {
            info!(
                capital = state.capital,
                daily_profit = state.daily_profit,
                trades = state.daily_trades,
                "Session finished"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting.");
        }
    }
}
