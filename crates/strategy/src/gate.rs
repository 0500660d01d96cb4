use common::Direction;

use crate::config::InstrumentConfig;

/// Result of the time-of-day eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Market is tradeable this hour and trades must take this direction.
    Open(Direction),
    Closed,
}

/// Two-stage session gate.
///
/// Stage one checks the instrument's trading-hours window (which may wrap
/// midnight). Stage two walks the session rules in configuration order; the
/// first rule whose inclusive hour range contains `hour` fixes the permitted
/// direction. Open hours with no matching rule are still Closed — "market is
/// tradeable" and "a direction is permitted this hour" are separate
/// questions.
pub fn decide(hour: u8, cfg: &InstrumentConfig) -> GateDecision {
    if !cfg.trading_hours.contains(hour) {
        return GateDecision::Closed;
    }
    for rule in &cfg.sessions {
        // Ranges were checked at startup; skip anything unparseable.
        let Ok((start, end)) = rule.parse_hours() else {
            continue;
        };
        if start <= hour && hour <= end {
            return GateDecision::Open(rule.direction);
        }
    }
    GateDecision::Closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionRule, TradingHours};

    fn instrument(hours: TradingHours, sessions: Vec<SessionRule>) -> InstrumentConfig {
        InstrumentConfig {
            pair: "EURUSD".into(),
            enabled: true,
            trading_hours: hours,
            sessions,
            thresholds: Default::default(),
            indicators: Default::default(),
        }
    }

    fn rule(hours: &str, direction: Direction) -> SessionRule {
        SessionRule { hours: hours.into(), direction }
    }

    #[test]
    fn overnight_window_is_open_at_23_closed_at_5() {
        let cfg = instrument(
            TradingHours { start: 19, end: 3 },
            vec![rule("0-23", Direction::Call)],
        );
        assert_eq!(decide(23, &cfg), GateDecision::Open(Direction::Call));
        assert_eq!(decide(5, &cfg), GateDecision::Closed);
    }

    #[test]
    fn session_rule_bounds_are_inclusive() {
        let cfg = instrument(
            TradingHours { start: 0, end: 23 },
            vec![rule("12-13", Direction::Put)],
        );
        assert_eq!(decide(12, &cfg), GateDecision::Open(Direction::Put));
        assert_eq!(decide(13, &cfg), GateDecision::Open(Direction::Put));
        assert_eq!(decide(14, &cfg), GateDecision::Closed);
    }

    #[test]
    fn open_hours_without_matching_rule_stay_closed() {
        let cfg = instrument(
            TradingHours { start: 0, end: 23 },
            vec![rule("12-13", Direction::Put)],
        );
        // Trading hours allow 10:00 but no session rule covers it
        assert_eq!(decide(10, &cfg), GateDecision::Closed);
    }

    #[test]
    fn first_matching_rule_wins() {
        let cfg = instrument(
            TradingHours { start: 0, end: 23 },
            vec![rule("10-14", Direction::Call), rule("12-13", Direction::Put)],
        );
        assert_eq!(decide(12, &cfg), GateDecision::Open(Direction::Call));
    }

    #[test]
    fn no_sessions_means_always_closed() {
        let cfg = instrument(TradingHours { start: 0, end: 23 }, vec![]);
        for hour in 0..24 {
            assert_eq!(decide(hour, &cfg), GateDecision::Closed);
        }
    }
}
