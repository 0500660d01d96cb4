use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use common::{Candle, Direction, Error, MarketData, OrderTicket, OrderVenue, Result};

/// Default starting price for a pair the feed has never seen.
const SEED_PRICE: f64 = 1.1000;

/// Random-walk step size in basis points of the current price.
const STEP_BPS: f64 = 3.0;

/// Simulated venue for paper trading.
///
/// The candle feed is a per-pair random walk that grows by one bar per
/// fetch; settlement is deterministic given the feed: a call wins when the
/// latest close is above the entry close (a put when below), a winner pays
/// `stake · payout_rate`, an exact tie pays zero, and a loser costs the
/// stake. No real orders are ever sent anywhere.
pub struct PaperVenue {
    feeds: RwLock<HashMap<String, Vec<Candle>>>,
    open_orders: RwLock<HashMap<String, PaperOrder>>,
    rng: Mutex<StdRng>,
    payout_rate: f64,
}

#[derive(Debug, Clone)]
struct PaperOrder {
    pair: String,
    direction: Direction,
    stake: f64,
    entry_price: f64,
}

impl PaperVenue {
    pub fn new(payout_rate: f64) -> Self {
        info!(payout_rate, "PaperVenue initialized");
        Self {
            feeds: RwLock::new(HashMap::new()),
            open_orders: RwLock::new(HashMap::new()),
            rng: Mutex::new(StdRng::from_entropy()),
            payout_rate,
        }
    }

    /// Seed the random walk, for reproducible runs and tests.
    pub fn with_seed(payout_rate: f64, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..Self::new(payout_rate)
        }
    }

    /// Append one candle closing at `price`, for tests that need an exact
    /// feed instead of the random walk.
    pub async fn push_close(&self, pair: &str, price: f64) {
        let mut feeds = self.feeds.write().await;
        let feed = feeds.entry(pair.to_string()).or_default();
        let timestamp = next_timestamp(feed);
        feed.push(bar(timestamp, price));
    }

    async fn latest_close(&self, pair: &str) -> Option<f64> {
        self.feeds
            .read()
            .await
            .get(pair)
            .and_then(|feed| feed.last())
            .map(|c| c.close)
    }
}

fn next_timestamp(feed: &[Candle]) -> DateTime<Utc> {
    match feed.last() {
        Some(c) => c.timestamp + ChronoDuration::seconds(60),
        None => Utc::now() - ChronoDuration::minutes(1),
    }
}

fn bar(timestamp: DateTime<Utc>, close: f64) -> Candle {
    Candle {
        timestamp,
        open: close,
        high: close,
        low: close,
        close,
        volume: 0.0,
    }
}

#[async_trait]
impl MarketData for PaperVenue {
    async fn fetch_candles(
        &self,
        pair: &str,
        _period_secs: u32,
        count: usize,
    ) -> Result<Vec<Candle>> {
        let mut feeds = self.feeds.write().await;
        let feed = feeds.entry(pair.to_string()).or_default();
        let mut rng = self.rng.lock().await;

        // Backfill the warmup window, then advance one bar per fetch so the
        // series keeps moving between ticks.
        let target = feed.len().max(count) + 1;
        while feed.len() < target {
            let last = feed.last().map(|c| c.close).unwrap_or(SEED_PRICE);
            let step = rng.gen_range(-STEP_BPS..=STEP_BPS) / 10_000.0;
            let close = last * (1.0 + step);
            let timestamp = next_timestamp(feed);
            feed.push(Candle {
                timestamp,
                open: last,
                high: last.max(close),
                low: last.min(close),
                close,
                volume: rng.gen_range(50.0..150.0),
            });
        }

        let start = feed.len() - count;
        Ok(feed[start..].to_vec())
    }
}

#[async_trait]
impl OrderVenue for PaperVenue {
    async fn place_order(
        &self,
        pair: &str,
        direction: Direction,
        stake: f64,
        _expiry_minutes: u32,
    ) -> Result<OrderTicket> {
        let entry_price = self.latest_close(pair).await.ok_or_else(|| {
            Error::Venue(format!(
                "no price for pair '{pair}' — ensure candles were fetched first"
            ))
        })?;

        let order_id = uuid::Uuid::new_v4().to_string();
        debug!(pair, %direction, stake, entry_price, order_id, "Paper order placed");
        self.open_orders.write().await.insert(
            order_id.clone(),
            PaperOrder {
                pair: pair.to_string(),
                direction,
                stake,
                entry_price,
            },
        );
        Ok(OrderTicket { accepted: true, order_id })
    }

    async fn get_settlement(&self, order_id: &str) -> Result<f64> {
        let order = self
            .open_orders
            .write()
            .await
            .remove(order_id)
            .ok_or_else(|| Error::Venue(format!("unknown order id '{order_id}'")))?;

        let expiry_price = self.latest_close(&order.pair).await.ok_or_else(|| {
            Error::Venue(format!("no expiry price for pair '{}'", order.pair))
        })?;

        let won = match order.direction {
            Direction::Call => expiry_price > order.entry_price,
            Direction::Put => expiry_price < order.entry_price,
        };

        let profit = if expiry_price == order.entry_price {
            0.0
        } else if won {
            order.stake * self.payout_rate
        } else {
            -order.stake
        };
        debug!(
            pair = %order.pair,
            entry = order.entry_price,
            expiry = expiry_price,
            profit,
            "Paper order settled"
        );
        Ok(profit)
    }
}
