use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use common::{Clock, MarketData};
use risk::{GovernorVerdict, HaltReason, RiskLimits, RiskState};
use strategy::{evaluator, gate, GateDecision, IndicatorFrame, InstrumentConfig, MIN_HISTORY};

use crate::controller::{ExecutionController, ExecutionOutcome};

/// Polling-loop settings.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Candle period in seconds (one-minute bars).
    pub period_secs: u32,
    /// Candles fetched per evaluation.
    pub candle_count: usize,
    /// Sleep between ticks.
    pub tick_interval: Duration,
    /// Run-duration budget. Checked at the top of each tick; an order
    /// already in flight is never aborted.
    pub max_runtime: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            period_secs: 60,
            candle_count: 100,
            tick_interval: Duration::from_secs(30),
            max_runtime: Duration::from_secs(7 * 60),
        }
    }
}

/// The single control task: iterates enabled instruments sequentially on
/// each tick and drives gate → indicators → evaluator → governor →
/// execution.
///
/// At most one order is outstanding at any time; while one instrument's
/// trade settles, no other instrument is evaluated. Per-instrument errors
/// are logged and skipped — they never halt the loop. A governor halt is
/// sticky for the remainder of the run.
pub struct BotRunner {
    instruments: Vec<InstrumentConfig>,
    market: Arc<dyn MarketData>,
    controller: ExecutionController,
    clock: Arc<dyn Clock>,
    limits: RiskLimits,
    state: RiskState,
    config: RunnerConfig,
}

impl BotRunner {
    pub fn new(
        instruments: Vec<InstrumentConfig>,
        market: Arc<dyn MarketData>,
        controller: ExecutionController,
        clock: Arc<dyn Clock>,
        limits: RiskLimits,
        state: RiskState,
        config: RunnerConfig,
    ) -> Self {
        Self {
            instruments,
            market,
            controller,
            clock,
            limits,
            state,
            config,
        }
    }

    /// Run until the budget is exhausted or the governor halts.
    /// Returns the final risk state.
    pub async fn run(mut self) -> RiskState {
        let pairs: Vec<&str> = self.instruments.iter().map(|i| i.pair.as_str()).collect();
        info!(?pairs, capital = self.state.capital, "Runner starting");

        let started = Instant::now();
        let instruments = self.instruments.clone();
        let mut iterations = 0u32;
        let mut executed = 0u32;
        let mut halted: Option<HaltReason> = None;

        'ticks: loop {
            if started.elapsed() >= self.config.max_runtime {
                info!("Run budget exhausted — stopping");
                break;
            }
            iterations += 1;
            debug!(iteration = iterations, "Tick");

            for instrument in &instruments {
                match self.check_instrument(instrument).await {
                    TickResult::NoTrade => {}
                    TickResult::Traded => executed += 1,
                    TickResult::Halt(reason) => {
                        warn!(%reason, "Risk governor HALTED — no further orders this run");
                        halted = Some(reason);
                        break 'ticks;
                    }
                }
            }

            let remaining = self.config.max_runtime.saturating_sub(started.elapsed());
            if remaining <= self.config.tick_interval {
                info!("Less than one tick remaining — stopping");
                break;
            }
            tokio::time::sleep(self.config.tick_interval).await;
        }

        info!(
            iterations,
            trades = executed,
            elapsed_secs = started.elapsed().as_secs(),
            capital = self.state.capital,
            daily_profit = self.state.daily_profit,
            halted = halted.is_some(),
            "Run complete"
        );
        self.state
    }

    async fn check_instrument(&mut self, instrument: &InstrumentConfig) -> TickResult {
        let pair = instrument.pair.as_str();
        let hour = self.clock.hour_utc();

        let gate_decision = gate::decide(hour, instrument);
        let GateDecision::Open(_) = gate_decision else {
            debug!(pair, hour, "Gate closed");
            return TickResult::NoTrade;
        };

        let candles = match self
            .market
            .fetch_candles(pair, self.config.period_secs, self.config.candle_count)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(pair, error = %e, "Candle fetch failed — skipping this tick");
                return TickResult::NoTrade;
            }
        };
        if candles.len() < MIN_HISTORY {
            debug!(pair, len = candles.len(), "Insufficient history");
            return TickResult::NoTrade;
        }

        let Some(frame) = IndicatorFrame::compute(&candles, &instrument.indicators) else {
            debug!(pair, "Indicators undefined");
            return TickResult::NoTrade;
        };
        let Some(row) = frame.latest() else {
            debug!(pair, "Latest indicator row still in warmup");
            return TickResult::NoTrade;
        };

        let Some(signal) =
            evaluator::evaluate(pair, &row, gate_decision, &instrument.thresholds)
        else {
            debug!(pair, "No signal");
            return TickResult::NoTrade;
        };
        info!(pair, direction = %signal.direction, price = signal.price, "Signal detected");

        // Governor check immediately before the attempt: check-then-act is
        // safe here because this task is the only RiskState writer.
        if let GovernorVerdict::Halted(reason) = risk::evaluate(&self.state, &self.limits) {
            return TickResult::Halt(reason);
        }

        match self.controller.execute(&signal, &mut self.state).await {
            Ok(ExecutionOutcome::Settled(_)) => TickResult::Traded,
            Ok(ExecutionOutcome::Rejected) => TickResult::NoTrade,
            Ok(ExecutionOutcome::SettlementUnknown(trade)) => {
                error!(
                    pair,
                    order_id = %trade.id,
                    "Trade outcome unknown — excluded from risk accounting"
                );
                TickResult::NoTrade
            }
            Err(e) => {
                error!(pair, error = %e, "Trade execution failed");
                TickResult::NoTrade
            }
        }
    }
}

enum TickResult {
    NoTrade,
    Traded,
    Halt(HaltReason),
}
