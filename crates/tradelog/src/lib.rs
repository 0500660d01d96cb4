use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::info;

use common::{Result, Trade};

/// Durable sink for settled trades.
///
/// Append-only: each run adds rows, prior rows are never rewritten. The
/// header is stable across runs so downstream consumers can rely on column
/// positions.
pub trait TradeLog: Send {
    fn append(&mut self, trade: &Trade) -> Result<()>;
}

/// Column order of the trade log. Written once when the file is created.
const COLUMNS: [&str; 12] = [
    "trade_id",
    "time",
    "pair",
    "direction",
    "result",
    "profit",
    "capital",
    "stake",
    "entry_price",
    "adx",
    "macd",
    "rsi",
];

/// CSV-backed trade log. Opens the file in append mode; the header row is
/// written only when the file is new (or empty), so repeated runs keep
/// appending under the same header.
pub struct CsvTradeLog {
    writer: csv::Writer<std::fs::File>,
}

impl CsvTradeLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_new = !path.exists() || std::fs::metadata(path)?.len() == 0;

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(COLUMNS)?;
            writer.flush()?;
        }
        info!(path = %path.display(), new = is_new, "Trade log opened");
        Ok(Self { writer })
    }
}

impl TradeLog for CsvTradeLog {
    fn append(&mut self, trade: &Trade) -> Result<()> {
        self.writer.write_record([
            trade.id.clone(),
            trade.opened_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            trade.pair.clone(),
            trade.direction.to_string(),
            trade.outcome.to_string(),
            format!("{:.2}", trade.profit),
            format!("{:.2}", trade.capital_after),
            format!("{:.2}", trade.stake),
            format!("{:.5}", trade.entry_price),
            format!("{:.4}", trade.snapshot.adx),
            format!("{:.6}", trade.snapshot.macd),
            format!("{:.4}", trade.snapshot.rsi),
        ])?;
        // Flush per trade: the log must survive an abrupt exit
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory trade log for tests. The shared handle stays readable after
/// the log itself moves into the execution controller.
#[derive(Default)]
pub struct MemoryTradeLog {
    trades: Arc<Mutex<Vec<Trade>>>,
}

impl MemoryTradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Trade>>> {
        self.trades.clone()
    }
}

impl TradeLog for MemoryTradeLog {
    fn append(&mut self, trade: &Trade) -> Result<()> {
        self.trades
            .lock()
            .map_err(|_| common::Error::Other("trade log mutex poisoned".into()))?
            .push(trade.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::{Direction, IndicatorSnapshot, Outcome};

    fn trade(id: &str, profit: f64) -> Trade {
        Trade {
            id: id.to_string(),
            opened_at: Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap(),
            pair: "EURUSD".into(),
            direction: Direction::Call,
            stake: 10.0,
            entry_price: 1.1000,
            outcome: if profit > 0.0 { Outcome::Win } else { Outcome::Loss },
            profit,
            capital_after: 100.0 + profit,
            snapshot: IndicatorSnapshot {
                adx: 25.0,
                macd: 0.002,
                rsi: 60.0,
                ema: 1.0995,
                slope: 0.0001,
            },
        }
    }

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tradelog-{}.csv", uuid::Uuid::new_v4()))
    }

    #[test]
    fn header_written_once_and_rows_accumulate_across_reopens() {
        let path = temp_path();

        {
            let mut log = CsvTradeLog::open(&path).unwrap();
            log.append(&trade("t1", 8.7)).unwrap();
        }
        {
            // Second run appends under the existing header
            let mut log = CsvTradeLog::open(&path).unwrap();
            log.append(&trade("t2", -10.0)).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3, "header + two trades:\n{content}");
        assert!(lines[0].starts_with("trade_id,time,pair,direction,result,profit,capital"));
        assert!(lines[1].contains("t1"));
        assert!(lines[1].contains("win"));
        assert!(lines[2].contains("t2"));
        assert!(lines[2].contains("loss"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn row_fields_are_in_header_order() {
        let path = temp_path();
        let mut log = CsvTradeLog::open(&path).unwrap();
        log.append(&trade("t1", 8.7)).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let row: Vec<&str> = content.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(row[0], "t1");
        assert_eq!(row[2], "EURUSD");
        assert_eq!(row[3], "call");
        assert_eq!(row[4], "win");
        assert_eq!(row[5], "8.70");
        assert_eq!(row[6], "108.70");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn memory_log_is_readable_through_handle() {
        let log = MemoryTradeLog::new();
        let handle = log.handle();
        let mut boxed: Box<dyn TradeLog> = Box::new(log);
        boxed.append(&trade("t1", 8.7)).unwrap();

        let trades = handle.lock().unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "t1");
    }
}
