use common::{Direction, Signal};

use crate::config::Thresholds;
use crate::frame::IndicatorRow;
use crate::gate::GateDecision;

/// Evaluate the latest indicator row against the gate decision and entry
/// thresholds.
///
/// Checks short-circuit in a fixed order: trend strength (inclusive
/// minimum), momentum magnitude, distance from the moving average, then the
/// direction rule. A call requires slope > 0, momentum > 0 AND a
/// gate-permitted call; a put requires the mirror image. Trend, momentum and
/// the time-of-day bias must all agree — a two-out-of-three majority is no
/// signal.
///
/// Pure function: the same row, gate state and thresholds always yield the
/// same result.
pub fn evaluate(
    pair: &str,
    row: &IndicatorRow,
    gate: GateDecision,
    thresholds: &Thresholds,
) -> Option<Signal> {
    let GateDecision::Open(allowed) = gate else {
        return None;
    };

    if row.adx < thresholds.adx_min {
        return None; // trend too weak
    }
    if row.macd.abs() < thresholds.macd_min {
        return None; // momentum too weak
    }
    if (row.close - row.ema).abs() / row.close > thresholds.price_ema_max {
        return None; // price too extended from the mean
    }

    let direction = if row.slope > 0.0 && row.macd > 0.0 && allowed == Direction::Call {
        Direction::Call
    } else if row.slope < 0.0 && row.macd < 0.0 && allowed == Direction::Put {
        Direction::Put
    } else {
        return None;
    };

    Some(Signal {
        pair: pair.to_string(),
        direction,
        price: row.close,
        snapshot: row.snapshot(),
        at: row.timestamp,
    })
}
