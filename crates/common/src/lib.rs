pub mod clock;
pub mod config;
pub mod error;
pub mod types;
pub mod venue;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
pub use venue::{MarketData, OrderVenue};
