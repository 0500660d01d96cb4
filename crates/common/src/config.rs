/// All process configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
///
/// Per-instrument schedules and thresholds live in a separate TOML file
/// (`strategy::InstrumentFileConfig`), pointed at by `INSTRUMENT_CONFIG_PATH`.
#[derive(Debug, Clone)]
pub struct Config {
    // Files
    pub instrument_config_path: String,
    pub trade_log_path: String,

    // Trading
    pub stake: f64,
    pub starting_capital: f64,
    pub expiry_minutes: u32,

    // Polling loop
    pub tick_interval_secs: u64,
    pub max_runtime_secs: u64,

    // Risk limits
    pub stop_loss: f64,
    pub daily_loss_limit: f64,
    pub max_trades_per_day: u32,

    // Paper venue
    pub paper_payout_rate: f64,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing or unparseable
    /// required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            instrument_config_path: optional_env("INSTRUMENT_CONFIG_PATH")
                .unwrap_or_else(|| "config/instruments.toml".to_string()),
            trade_log_path: optional_env("TRADE_LOG_PATH")
                .unwrap_or_else(|| "trades.csv".to_string()),
            stake: required_parsed("STAKE_USD"),
            starting_capital: required_parsed("STARTING_CAPITAL_USD"),
            expiry_minutes: optional_parsed("EXPIRY_MINUTES").unwrap_or(1),
            tick_interval_secs: optional_parsed("TICK_INTERVAL_SECS").unwrap_or(30),
            max_runtime_secs: optional_parsed("MAX_RUNTIME_SECS").unwrap_or(7 * 60),
            stop_loss: optional_parsed("STOP_LOSS_USD").unwrap_or(30.0),
            daily_loss_limit: optional_parsed("DAILY_LOSS_LIMIT_USD").unwrap_or(15.0),
            max_trades_per_day: optional_parsed("MAX_TRADES_PER_DAY").unwrap_or(10),
            paper_payout_rate: optional_parsed("PAPER_PAYOUT_RATE").unwrap_or(0.87),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn required_parsed<T: std::str::FromStr>(key: &str) -> T {
    required_env(key).parse().unwrap_or_else(|_| {
        panic!("Environment variable '{key}' is not a valid number")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn optional_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    optional_env(key).and_then(|v| v.parse().ok())
}
