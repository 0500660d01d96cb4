use serde::{Deserialize, Serialize};

use common::{Direction, Error, Result};

/// Top-level per-instrument config file (TOML).
///
/// Example `config/instruments.toml`:
/// ```toml
/// [[instrument]]
/// pair = "EURUSD"
/// enabled = true
///
/// [instrument.trading_hours]
/// start = 19
/// end = 3
///
/// [[instrument.session]]
/// hours = "19-23"
/// direction = "call"
///
/// [[instrument.session]]
/// hours = "0-2"
/// direction = "put"
///
/// [instrument.thresholds]
/// adx_min = 20.0
/// macd_min = 0.0001
/// price_ema_max = 0.002
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentFileConfig {
    #[serde(rename = "instrument")]
    pub instruments: Vec<InstrumentConfig>,
}

impl InstrumentFileConfig {
    /// Load and validate from a TOML file. Any malformed entry is fatal —
    /// the engine must not run with partially-valid configuration.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read '{path}': {e}")))?;
        let file: InstrumentFileConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse '{path}': {e}")))?;
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.instruments.is_empty() {
            return Err(Error::Config("no instruments configured".into()));
        }
        for inst in &self.instruments {
            inst.validate()?;
        }
        Ok(())
    }

    /// Instruments with `enabled = true`, in file order.
    pub fn enabled_instruments(&self) -> Vec<InstrumentConfig> {
        self.instruments
            .iter()
            .filter(|i| i.enabled)
            .cloned()
            .collect()
    }
}

/// Static per-pair configuration. Loaded once at startup, read-only during
/// a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentConfig {
    pub pair: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub trading_hours: TradingHours,
    /// Session rules in file order; the first matching rule wins.
    #[serde(rename = "session", default)]
    pub sessions: Vec<SessionRule>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub indicators: IndicatorParams,
}

impl InstrumentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pair.trim().is_empty() {
            return Err(Error::Config("instrument with empty pair".into()));
        }
        if self.trading_hours.start > 23 || self.trading_hours.end > 23 {
            return Err(Error::Config(format!(
                "{}: trading hours must be within 0-23",
                self.pair
            )));
        }
        for rule in &self.sessions {
            let (start, end) = rule.parse_hours().map_err(|e| {
                Error::Config(format!("{}: {e}", self.pair))
            })?;
            if start > end || end > 23 {
                return Err(Error::Config(format!(
                    "{}: session range '{}' must be ascending within 0-23",
                    self.pair, rule.hours
                )));
            }
        }
        self.thresholds.validate(&self.pair)?;
        self.indicators.validate(&self.pair)?;
        Ok(())
    }
}

/// Trading-hours window `[start, end)` in UTC hours; `start > end` wraps
/// across midnight (overnight session).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TradingHours {
    pub start: u8,
    pub end: u8,
}

impl TradingHours {
    pub fn contains(&self, hour: u8) -> bool {
        if self.start > self.end {
            hour >= self.start || hour < self.end
        } else {
            self.start <= hour && hour < self.end
        }
    }
}

/// One session rule: an inclusive hour range mapped to the direction trades
/// are permitted to take during those hours.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionRule {
    /// Inclusive hour range in "A-B" form, e.g. "12-13".
    pub hours: String,
    pub direction: Direction,
}

impl SessionRule {
    /// Parse the "A-B" range. Checked once during validation; gate lookups
    /// treat an unparseable rule as non-matching.
    pub fn parse_hours(&self) -> Result<(u8, u8)> {
        let mut parts = self.hours.splitn(2, '-');
        let start = parts.next().and_then(|s| s.trim().parse().ok());
        let end = parts.next().and_then(|s| s.trim().parse().ok());
        match (start, end) {
            (Some(s), Some(e)) => Ok((s, e)),
            _ => Err(Error::Config(format!(
                "session range '{}' is not of the form \"A-B\"",
                self.hours
            ))),
        }
    }
}

/// Entry thresholds applied by the signal evaluator.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Thresholds {
    /// Minimum trend strength (inclusive).
    #[serde(default = "default_adx_min")]
    pub adx_min: f64,
    /// Minimum absolute momentum-oscillator value (inclusive).
    #[serde(default = "default_macd_min")]
    pub macd_min: f64,
    /// Maximum fractional distance between close and the moving average.
    #[serde(default = "default_price_ema_max")]
    pub price_ema_max: f64,
}

impl Thresholds {
    fn validate(&self, pair: &str) -> Result<()> {
        if self.adx_min < 0.0 || self.macd_min < 0.0 || self.price_ema_max <= 0.0 {
            return Err(Error::Config(format!(
                "{pair}: thresholds must be non-negative (price_ema_max > 0)"
            )));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            adx_min: default_adx_min(),
            macd_min: default_macd_min(),
            price_ema_max: default_price_ema_max(),
        }
    }
}

/// Configurable indicator periods. The trend-strength (14), momentum
/// oscillator (5/13/3) and slope (10) windows are fixed engine constants.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct IndicatorParams {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_ema_period")]
    pub ema_period: usize,
    #[serde(default = "default_band_period")]
    pub band_period: usize,
    #[serde(default = "default_band_width")]
    pub band_width: f64,
}

impl IndicatorParams {
    fn validate(&self, pair: &str) -> Result<()> {
        if self.rsi_period < 2 || self.band_period < 2 || self.ema_period < 1 {
            return Err(Error::Config(format!(
                "{pair}: indicator periods too small"
            )));
        }
        if self.band_width <= 0.0 {
            return Err(Error::Config(format!(
                "{pair}: band width must be positive"
            )));
        }
        Ok(())
    }
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            ema_period: default_ema_period(),
            band_period: default_band_period(),
            band_width: default_band_width(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_adx_min() -> f64 {
    20.0
}
fn default_macd_min() -> f64 {
    0.0001
}
fn default_price_ema_max() -> f64 {
    0.002
}
fn default_rsi_period() -> usize {
    14
}
fn default_ema_period() -> usize {
    20
}
fn default_band_period() -> usize {
    20
}
fn default_band_width() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
            [[instrument]]
            pair = "EURUSD"

            [instrument.trading_hours]
            start = 19
            end = 3

            [[instrument.session]]
            hours = "19-23"
            direction = "call"

            [[instrument.session]]
            hours = "12-13"
            direction = "put"
        "#
    }

    #[test]
    fn parses_and_validates_sample_file() {
        let file: InstrumentFileConfig = toml::from_str(sample_toml()).unwrap();
        assert!(file.validate().is_ok());
        let inst = &file.instruments[0];
        assert_eq!(inst.pair, "EURUSD");
        assert!(inst.enabled);
        assert_eq!(inst.sessions.len(), 2);
        assert_eq!(inst.sessions[0].direction, Direction::Call);
        // Defaults fill in when sections are omitted
        assert_eq!(inst.indicators.ema_period, 20);
        assert!((inst.thresholds.adx_min - 20.0).abs() < 1e-12);
    }

    #[test]
    fn session_rules_keep_file_order() {
        let file: InstrumentFileConfig = toml::from_str(sample_toml()).unwrap();
        let hours: Vec<&str> = file.instruments[0]
            .sessions
            .iter()
            .map(|s| s.hours.as_str())
            .collect();
        assert_eq!(hours, vec!["19-23", "12-13"]);
    }

    #[test]
    fn malformed_session_range_is_fatal() {
        let toml_src = r#"
            [[instrument]]
            pair = "EURUSD"
            [instrument.trading_hours]
            start = 0
            end = 23
            [[instrument.session]]
            hours = "12:13"
            direction = "put"
        "#;
        let file: InstrumentFileConfig = toml::from_str(toml_src).unwrap();
        assert!(file.validate().is_err());
    }

    #[test]
    fn descending_session_range_is_fatal() {
        let toml_src = r#"
            [[instrument]]
            pair = "EURUSD"
            [instrument.trading_hours]
            start = 0
            end = 23
            [[instrument.session]]
            hours = "13-12"
            direction = "put"
        "#;
        let file: InstrumentFileConfig = toml::from_str(toml_src).unwrap();
        assert!(file.validate().is_err());
    }

    #[test]
    fn out_of_range_trading_hours_are_fatal() {
        let toml_src = r#"
            [[instrument]]
            pair = "EURUSD"
            [instrument.trading_hours]
            start = 25
            end = 3
        "#;
        let file: InstrumentFileConfig = toml::from_str(toml_src).unwrap();
        assert!(file.validate().is_err());
    }

    #[test]
    fn disabled_instruments_are_filtered() {
        let toml_src = r#"
            [[instrument]]
            pair = "EURUSD"
            enabled = false
            [instrument.trading_hours]
            start = 0
            end = 23

            [[instrument]]
            pair = "GBPUSD"
            [instrument.trading_hours]
            start = 0
            end = 23
        "#;
        let file: InstrumentFileConfig = toml::from_str(toml_src).unwrap();
        let enabled = file.enabled_instruments();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].pair, "GBPUSD");
    }

    #[test]
    fn trading_hours_window_semantics() {
        let plain = TradingHours { start: 8, end: 17 };
        assert!(plain.contains(8));
        assert!(plain.contains(16));
        assert!(!plain.contains(17));

        let overnight = TradingHours { start: 19, end: 3 };
        assert!(overnight.contains(23));
        assert!(overnight.contains(0));
        assert!(!overnight.contains(5));
    }
}
