use chrono::{DateTime, Timelike, Utc};

/// Wall-clock provider consumed by the session gate.
///
/// Injectable so that gate decisions are deterministic under test — no core
/// logic may call a non-overridable "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC hour of day, 0–23.
    fn hour_utc(&self) -> u8 {
        self.now().hour() as u8
    }
}

/// Production clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
