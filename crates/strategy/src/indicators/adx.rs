use super::rolling_mean;

/// ADX trend-strength indicator with its two directional components.
///
/// True range and ±DM are smoothed with rolling means over `period` bars,
/// the DI lines are `100·mean(DM)/ATR`, and ADX is the rolling mean of
/// `DX = 100·|+DI − −DI| / (+DI + −DI)`. Full warmup takes roughly
/// `2·period` bars; earlier rows are NaN.
#[derive(Debug, Clone)]
pub struct AdxIndicator {
    pub period: usize,
}

/// Full-length ADX output, aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

impl AdxIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "ADX period must be >= 2");
        Self { period }
    }

    /// Compute ADX and the DI lines over parallel high/low/close series
    /// (oldest first). The three slices must be the same length.
    pub fn compute(&self, highs: &[f64], lows: &[f64], closes: &[f64]) -> AdxSeries {
        let n = closes.len();
        assert_eq!(highs.len(), n, "high/close length mismatch");
        assert_eq!(lows.len(), n, "low/close length mismatch");

        let mut tr = vec![f64::NAN; n];
        let mut plus_dm = vec![0.0; n];
        let mut minus_dm = vec![0.0; n];

        for t in 0..n {
            if t == 0 {
                // No previous close: true range degrades to the bar range,
                // directional movement is zero.
                tr[0] = highs[0] - lows[0];
                continue;
            }
            let hl = highs[t] - lows[t];
            let hc = (highs[t] - closes[t - 1]).abs();
            let lc = (lows[t] - closes[t - 1]).abs();
            tr[t] = hl.max(hc).max(lc);

            let up_move = highs[t] - highs[t - 1];
            let down_move = lows[t - 1] - lows[t];
            if up_move > down_move && up_move > 0.0 {
                plus_dm[t] = up_move;
            }
            if down_move > up_move && down_move > 0.0 {
                minus_dm[t] = down_move;
            }
        }

        let atr = rolling_mean(&tr, self.period);
        let plus_sm = rolling_mean(&plus_dm, self.period);
        let minus_sm = rolling_mean(&minus_dm, self.period);

        let mut plus_di = vec![f64::NAN; n];
        let mut minus_di = vec![f64::NAN; n];
        let mut dx = vec![f64::NAN; n];
        for t in 0..n {
            if atr[t].is_nan() || atr[t] == 0.0 {
                continue;
            }
            plus_di[t] = 100.0 * plus_sm[t] / atr[t];
            minus_di[t] = 100.0 * minus_sm[t] / atr[t];
            let di_sum = plus_di[t] + minus_di[t];
            if di_sum > 0.0 {
                dx[t] = 100.0 * (plus_di[t] - minus_di[t]).abs() / di_sum;
            }
        }

        let adx = rolling_mean(&dx, self.period);
        AdxSeries { adx, plus_di, minus_di }
    }
}
