/// Exponential moving average of the close series.
///
/// Seeded with the first value, then the standard recurrence
/// `ema[t] = close[t]·k + ema[t−1]·(1−k)` with `k = 2/(period+1)`.
/// Defined for every bar, but early values carry little history and are only
/// consulted after the frame-wide warmup check.
#[derive(Debug, Clone)]
pub struct EmaIndicator {
    pub period: usize,
}

impl EmaIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self { period }
    }

    /// Compute the EMA series over `closes` (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        ema_series(closes, self.period)
    }
}

pub(crate) fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(prev);
    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}
