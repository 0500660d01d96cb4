pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod slope;

pub use adx::{AdxIndicator, AdxSeries};
pub use bollinger::{BandSeries, BollingerBands};
pub use ema::EmaIndicator;
pub use macd::{MacdIndicator, MacdSeries};
pub use rsi::RsiIndicator;
pub use slope::SlopeIndicator;

/// Rolling mean over a fixed window. Output is NaN until a full window is
/// available, and NaN whenever the window itself contains a NaN.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for t in (window - 1)..values.len() {
        let slice = &values[t + 1 - window..=t];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[t] = slice.iter().sum::<f64>() / window as f64;
    }
    out
}

/// Rolling sample standard deviation (n − 1 denominator) over a fixed window.
/// Same NaN semantics as `rolling_mean`.
pub(crate) fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }
    for t in (window - 1)..values.len() {
        let slice = &values[t + 1 - window..=t];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        let mean = slice.iter().sum::<f64>() / window as f64;
        let var = slice.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
            / (window - 1) as f64;
        out[t] = var.sqrt();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_mean_warms_up_then_averages() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let out = rolling_mean(&values, 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < 1e-12);
        assert!((out[3] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_mean_propagates_nan_windows() {
        let values = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let out = rolling_mean(&values, 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert!((out[3] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn rolling_std_uses_sample_denominator() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&values, 8);
        // Sample stddev of this classic series is ~2.138
        assert!((out[7] - 2.1380899).abs() < 1e-6);
    }
}
