use super::{rolling_mean, rolling_std};

/// Volatility bands: rolling SMA ± a multiple of the rolling sample
/// standard deviation. NaN until a full window is available.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub period: usize,
    pub width: f64,
}

/// Full-length band output, aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub upper: Vec<f64>,
    pub mid: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerBands {
    pub fn new(period: usize, width: f64) -> Self {
        assert!(period >= 2, "band period must be >= 2");
        assert!(width > 0.0, "band width must be positive");
        Self { period, width }
    }

    /// Compute the band series over `closes` (oldest first).
    pub fn compute(&self, closes: &[f64]) -> BandSeries {
        let mid = rolling_mean(closes, self.period);
        let std = rolling_std(closes, self.period);
        let upper: Vec<f64> = mid
            .iter()
            .zip(&std)
            .map(|(m, s)| m + self.width * s)
            .collect();
        let lower: Vec<f64> = mid
            .iter()
            .zip(&std)
            .map(|(m, s)| m - self.width * s)
            .collect();
        BandSeries { upper, mid, lower }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_nan_during_warmup() {
        let bands = BollingerBands::new(20, 2.0);
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin()).collect();
        let out = bands.compute(&prices);
        assert!(out.mid[..19].iter().all(|v| v.is_nan()));
        assert!(!out.mid[19].is_nan());
    }

    #[test]
    fn bands_collapse_on_constant_series() {
        let bands = BollingerBands::new(20, 2.0);
        let out = bands.compute(&[7.0; 40]);
        assert!((out.upper[39] - 7.0).abs() < 1e-12);
        assert!((out.lower[39] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn upper_band_above_mid_above_lower() {
        let bands = BollingerBands::new(20, 2.0);
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 2.0)
            .collect();
        let out = bands.compute(&prices);
        for t in 19..60 {
            assert!(out.upper[t] >= out.mid[t]);
            assert!(out.mid[t] >= out.lower[t]);
        }
    }
}
