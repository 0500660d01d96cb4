use serde::{Deserialize, Serialize};

/// User-configurable risk limits, checked before every trading attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Total drawdown from starting capital that halts trading (e.g. 30.0
    /// = halt once cumulative losses reach $30).
    pub stop_loss: f64,
    /// Cumulative daily loss that halts trading for the rest of the day.
    pub daily_loss_limit: f64,
    /// Maximum settled trades per day.
    pub max_trades_per_day: u32,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            stop_loss: 30.0,
            daily_loss_limit: 15.0,
            max_trades_per_day: 10,
        }
    }
}

/// Running capital and per-day counters.
///
/// A plain value, mutated only by `apply()` after each settled trade —
/// exactly one application per trade, never concurrently. Held and updated
/// by the single control task; a parallel reimplementation must serialize
/// updates behind one writer because `evaluate` + `apply` is a
/// check-then-act sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    pub starting_capital: f64,
    pub capital: f64,
    pub daily_profit: f64,
    pub daily_trades: u32,
}

impl RiskState {
    pub fn new(starting_capital: f64) -> Self {
        Self {
            starting_capital,
            capital: starting_capital,
            daily_profit: 0.0,
            daily_trades: 0,
        }
    }

    /// Account one settled trade.
    pub fn apply(&mut self, profit: f64) {
        self.capital += profit;
        self.daily_profit += profit;
        self.daily_trades += 1;
    }

    /// Signed drawdown relative to starting capital; negative when losing.
    pub fn drawdown(&self) -> f64 {
        self.capital - self.starting_capital
    }

    /// Clear the per-day counters. The daily boundary is the caller's
    /// policy — nothing in the core invokes this.
    pub fn reset_day(&mut self) {
        self.daily_profit = 0.0;
        self.daily_trades = 0;
    }
}

/// Why the governor halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    StopLoss,
    DailyLossLimit,
    TradeCountCap,
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HaltReason::StopLoss => write!(f, "stop-loss breached"),
            HaltReason::DailyLossLimit => write!(f, "daily loss limit reached"),
            HaltReason::TradeCountCap => write!(f, "daily trade cap reached"),
        }
    }
}

/// Whether trading may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorVerdict {
    Active,
    Halted(HaltReason),
}

impl GovernorVerdict {
    pub fn is_active(&self) -> bool {
        matches!(self, GovernorVerdict::Active)
    }
}

/// Evaluate the risk limits against the current state.
///
/// Checks run in a fixed order — stop-loss, then daily loss, then trade
/// count — and the first breached condition is the reported reason, which
/// is the tie-break when several are breached at once. The caller makes a
/// halt sticky for the remainder of the day; resuming requires an external
/// day-boundary reset.
pub fn evaluate(state: &RiskState, limits: &RiskLimits) -> GovernorVerdict {
    if state.drawdown() <= -limits.stop_loss {
        return GovernorVerdict::Halted(HaltReason::StopLoss);
    }
    if state.daily_profit <= -limits.daily_loss_limit {
        return GovernorVerdict::Halted(HaltReason::DailyLossLimit);
    }
    if state.daily_trades >= limits.max_trades_per_day {
        return GovernorVerdict::Halted(HaltReason::TradeCountCap);
    }
    GovernorVerdict::Active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RiskLimits {
        RiskLimits {
            stop_loss: 30.0,
            daily_loss_limit: 15.0,
            max_trades_per_day: 10,
        }
    }

    #[test]
    fn fresh_state_is_active() {
        let state = RiskState::new(100.0);
        assert_eq!(evaluate(&state, &limits()), GovernorVerdict::Active);
    }

    #[test]
    fn stop_loss_halts_at_exact_threshold() {
        let mut state = RiskState::new(100.0);
        state.capital = 70.0; // drawdown == -30
        assert_eq!(
            evaluate(&state, &limits()),
            GovernorVerdict::Halted(HaltReason::StopLoss)
        );
    }

    #[test]
    fn daily_loss_limit_halts() {
        let mut state = RiskState::new(100.0);
        state.capital = 85.0;
        state.daily_profit = -15.0;
        assert_eq!(
            evaluate(&state, &limits()),
            GovernorVerdict::Halted(HaltReason::DailyLossLimit)
        );
    }

    #[test]
    fn trade_count_cap_halts() {
        let mut state = RiskState::new(100.0);
        state.daily_trades = 10;
        assert_eq!(
            evaluate(&state, &limits()),
            GovernorVerdict::Halted(HaltReason::TradeCountCap)
        );
    }

    #[test]
    fn stop_loss_wins_when_several_conditions_breach() {
        // Stop-loss AND trade cap breached simultaneously: the first check
        // in evaluation order is the reported reason.
        let mut state = RiskState::new(100.0);
        state.capital = 60.0;
        state.daily_profit = -40.0;
        state.daily_trades = 25;
        assert_eq!(
            evaluate(&state, &limits()),
            GovernorVerdict::Halted(HaltReason::StopLoss)
        );
    }

    #[test]
    fn daily_loss_wins_over_trade_cap() {
        let mut state = RiskState::new(100.0);
        state.capital = 85.0;
        state.daily_profit = -15.0;
        state.daily_trades = 25;
        assert_eq!(
            evaluate(&state, &limits()),
            GovernorVerdict::Halted(HaltReason::DailyLossLimit)
        );
    }

    #[test]
    fn apply_updates_capital_profit_and_count() {
        let mut state = RiskState::new(100.0);
        state.apply(-10.0);
        assert!((state.capital - 90.0).abs() < 1e-12);
        assert!((state.daily_profit + 10.0).abs() < 1e-12);
        assert_eq!(state.daily_trades, 1);

        state.apply(8.7);
        assert!((state.capital - 98.7).abs() < 1e-12);
        assert_eq!(state.daily_trades, 2);
    }

    #[test]
    fn reset_day_clears_counters_but_not_capital() {
        let mut state = RiskState::new(100.0);
        state.apply(-12.0);
        state.reset_day();
        assert!((state.capital - 88.0).abs() < 1e-12);
        assert_eq!(state.daily_profit, 0.0);
        assert_eq!(state.daily_trades, 0);
    }

    #[test]
    fn one_loss_under_limit_stays_active() {
        let mut state = RiskState::new(100.0);
        state.apply(-10.0);
        assert!(evaluate(&state, &limits()).is_active());
    }
}
