/// Finite-difference trend-direction proxy:
/// `slope[t] = (close[t] − close[t−lag]) / lag`.
///
/// Only the sign is consulted downstream; magnitude is kept for the
/// indicator snapshot. NaN for the first `lag` bars.
#[derive(Debug, Clone)]
pub struct SlopeIndicator {
    pub lag: usize,
}

impl SlopeIndicator {
    pub fn new(lag: usize) -> Self {
        assert!(lag >= 1, "slope lag must be >= 1");
        Self { lag }
    }

    /// Compute the slope series over `closes` (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; closes.len()];
        for t in self.lag..closes.len() {
            out[t] = (closes[t] - closes[t - self.lag]) / self.lag as f64;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_warmup_is_nan() {
        let slope = SlopeIndicator::new(10);
        let prices: Vec<f64> = (0..15).map(|i| i as f64).collect();
        let out = slope.compute(&prices);
        assert!(out[..10].iter().all(|v| v.is_nan()));
        assert!(!out[10].is_nan());
    }

    #[test]
    fn slope_sign_follows_direction() {
        let slope = SlopeIndicator::new(10);
        let up: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.2).collect();
        let down: Vec<f64> = (0..30).map(|i| 100.0 - i as f64 * 0.2).collect();
        assert!(*slope.compute(&up).last().unwrap() > 0.0);
        assert!(*slope.compute(&down).last().unwrap() < 0.0);
    }

    #[test]
    fn slope_value_is_average_change_per_bar() {
        let slope = SlopeIndicator::new(10);
        let prices: Vec<f64> = (0..20).map(|i| i as f64 * 3.0).collect();
        let out = slope.compute(&prices);
        assert!((out[19] - 3.0).abs() < 1e-12);
    }
}
