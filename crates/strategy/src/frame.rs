use chrono::{DateTime, Utc};

use common::{Candle, IndicatorSnapshot};

use crate::config::IndicatorParams;
use crate::indicators::{
    AdxIndicator, BollingerBands, EmaIndicator, MacdIndicator, RsiIndicator, SlopeIndicator,
};

/// Minimum candle history before any indicator row may be consulted.
pub const MIN_HISTORY: usize = 50;

const ADX_PERIOD: usize = 14;
const MACD_FAST: usize = 5;
const MACD_SLOW: usize = 13;
const MACD_SIGNAL: usize = 3;
const SLOPE_LAG: usize = 10;

/// Derived indicator columns aligned one-to-one with the candle sequence
/// they were computed from. Rows inside an indicator's warmup window are
/// NaN and must never be consulted — `latest()` refuses to hand them out.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    timestamps: Vec<DateTime<Utc>>,
    closes: Vec<f64>,
    adx: Vec<f64>,
    plus_di: Vec<f64>,
    minus_di: Vec<f64>,
    macd: Vec<f64>,
    macd_signal: Vec<f64>,
    macd_hist: Vec<f64>,
    rsi: Vec<f64>,
    ema: Vec<f64>,
    band_upper: Vec<f64>,
    band_mid: Vec<f64>,
    band_lower: Vec<f64>,
    slope: Vec<f64>,
}

/// One fully-defined frame row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub rsi: f64,
    pub ema: f64,
    pub band_upper: f64,
    pub band_mid: f64,
    pub band_lower: f64,
    pub slope: f64,
}

impl IndicatorRow {
    fn is_defined(&self) -> bool {
        [
            self.close,
            self.adx,
            self.plus_di,
            self.minus_di,
            self.macd,
            self.macd_signal,
            self.macd_hist,
            self.rsi,
            self.ema,
            self.band_upper,
            self.band_mid,
            self.band_lower,
            self.slope,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// The values carried onto signals and trade records.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            adx: self.adx,
            macd: self.macd,
            rsi: self.rsi,
            ema: self.ema,
            slope: self.slope,
        }
    }
}

impl IndicatorFrame {
    /// Compute the full indicator set over an ordered candle sequence.
    ///
    /// Returns `None` when the sequence is shorter than `MIN_HISTORY` —
    /// callers must treat that as "no decision possible", never as zero.
    /// Pure and deterministic: the same input always produces the same
    /// output, bit for bit.
    pub fn compute(candles: &[Candle], params: &IndicatorParams) -> Option<Self> {
        if candles.len() < MIN_HISTORY {
            return None;
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        let adx = AdxIndicator::new(ADX_PERIOD).compute(&highs, &lows, &closes);
        let macd = MacdIndicator::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL).compute(&closes);
        let rsi = RsiIndicator::new(params.rsi_period).compute(&closes);
        let ema = EmaIndicator::new(params.ema_period).compute(&closes);
        let bands = BollingerBands::new(params.band_period, params.band_width).compute(&closes);
        let slope = SlopeIndicator::new(SLOPE_LAG).compute(&closes);

        Some(Self {
            timestamps: candles.iter().map(|c| c.timestamp).collect(),
            closes,
            adx: adx.adx,
            plus_di: adx.plus_di,
            minus_di: adx.minus_di,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_hist: macd.histogram,
            rsi,
            ema,
            band_upper: bands.upper,
            band_mid: bands.mid,
            band_lower: bands.lower,
            slope,
        })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    fn row(&self, i: usize) -> IndicatorRow {
        IndicatorRow {
            timestamp: self.timestamps[i],
            close: self.closes[i],
            adx: self.adx[i],
            plus_di: self.plus_di[i],
            minus_di: self.minus_di[i],
            macd: self.macd[i],
            macd_signal: self.macd_signal[i],
            macd_hist: self.macd_hist[i],
            rsi: self.rsi[i],
            ema: self.ema[i],
            band_upper: self.band_upper[i],
            band_mid: self.band_mid[i],
            band_lower: self.band_lower[i],
            slope: self.slope[i],
        }
    }

    /// The most recent row, or `None` while any column is still inside its
    /// warmup window (or otherwise undefined, e.g. a dead flat market).
    pub fn latest(&self) -> Option<IndicatorRow> {
        let i = self.len().checked_sub(1)?;
        let row = self.row(i);
        row.is_defined().then_some(row)
    }
}
