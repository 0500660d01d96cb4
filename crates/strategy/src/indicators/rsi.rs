/// Relative Strength Index over the close series.
///
/// Average gain and loss are plain rolling means over the last `period`
/// one-bar changes (not Wilder smoothing), mapped to 0–100.
/// Output is NaN until `period` changes have accumulated, and NaN on a dead
/// flat window (zero gain and zero loss).
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// Compute the RSI series over `closes` (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut out = vec![f64::NAN; n];
        if n < self.period + 1 {
            return out;
        }

        for t in self.period..n {
            let mut gain = 0.0;
            let mut loss = 0.0;
            for i in (t - self.period)..t {
                let change = closes[i + 1] - closes[i];
                if change > 0.0 {
                    gain += change;
                } else {
                    loss -= change;
                }
            }
            let avg_gain = gain / self.period as f64;
            let avg_loss = loss / self.period as f64;

            out[t] = if avg_loss == 0.0 {
                if avg_gain == 0.0 {
                    f64::NAN
                } else {
                    100.0
                }
            } else {
                100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_is_nan_during_warmup() {
        let rsi = RsiIndicator::new(14);
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = rsi.compute(&prices);
        assert!(out[..14].iter().all(|v| v.is_nan()));
        assert!(out[14..].iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn rsi_all_gains_returns_100() {
        let rsi = RsiIndicator::new(3);
        let out = rsi.compute(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let last = *out.last().unwrap();
        assert!((last - 100.0).abs() < 1e-9, "Expected ~100, got {last}");
    }

    #[test]
    fn rsi_all_losses_returns_0() {
        let rsi = RsiIndicator::new(3);
        let out = rsi.compute(&[14.0, 13.0, 12.0, 11.0, 10.0]);
        let last = *out.last().unwrap();
        assert!(last.abs() < 1e-9, "Expected ~0, got {last}");
    }

    #[test]
    fn rsi_flat_window_is_undefined() {
        let rsi = RsiIndicator::new(3);
        let out = rsi.compute(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        assert!(out.last().unwrap().is_nan());
    }

    #[test]
    fn rsi_stays_within_bounds() {
        let rsi = RsiIndicator::new(14);
        let prices: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0)
            .collect();
        let out = rsi.compute(&prices);
        for v in out.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(v), "RSI out of range: {v}");
        }
    }
}
