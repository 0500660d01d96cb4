use super::ema::ema_series;

/// MACD momentum oscillator over the close series.
///
/// `macd = EMA(fast) − EMA(slow)`, `signal = EMA(macd, signal_period)`,
/// `histogram = macd − signal`. The engine runs it at 5/13/3 on one-minute
/// candles — much faster than the classic 12/26/9.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Full-length MACD output, aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast < slow, "MACD fast period must be less than slow period");
        Self { fast, slow, signal }
    }

    /// Compute the MACD, signal and histogram lines over `closes`
    /// (oldest first).
    pub fn compute(&self, closes: &[f64]) -> MacdSeries {
        let fast = ema_series(closes, self.fast);
        let slow = ema_series(closes, self.slow);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_series(&macd, self.signal);
        let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
        MacdSeries { macd, signal, histogram }
    }
}
