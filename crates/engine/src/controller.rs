use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use common::{Clock, Error, Outcome, OrderVenue, Result, Signal, Trade};
use risk::RiskState;
use tradelog::TradeLog;

/// Settlement queries attempted before a trade is recorded with outcome
/// "unknown" and excluded from risk accounting.
pub const SETTLEMENT_ATTEMPTS: u32 = 3;

/// Extra wait after expiry before querying settlement, so the venue has
/// finalized the order.
const SETTLEMENT_BUFFER_SECS: u64 = 5;

/// What happened to one trading attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// Venue declined the placement. The order never happened: no risk
    /// mutation, no trade record.
    Rejected,
    /// Order expired and settled normally; risk state was updated and the
    /// trade appended to the log.
    Settled(Trade),
    /// Placement succeeded but settlement could not be determined after
    /// bounded retries. The trade is persisted with outcome "unknown" for
    /// reconciliation; risk state is deliberately left untouched.
    SettlementUnknown(Trade),
}

/// Places a directional order for a signal, suspends until expiry, and
/// classifies the settled result.
///
/// This is the ONLY component that talks to the order venue, and the only
/// mutator of `RiskState`. At most one order is outstanding at any time —
/// the settlement wait suspends the whole control loop by design.
pub struct ExecutionController {
    venue: Arc<dyn OrderVenue>,
    log: Box<dyn TradeLog>,
    clock: Arc<dyn Clock>,
    stake: f64,
    expiry_minutes: u32,
    /// Wall time to wait between placement and the settlement query.
    /// Injectable so tests don't sleep through a real expiry.
    settlement_wait: Duration,
    retry_backoff: Duration,
}

impl ExecutionController {
    pub fn new(
        venue: Arc<dyn OrderVenue>,
        log: Box<dyn TradeLog>,
        clock: Arc<dyn Clock>,
        stake: f64,
        expiry_minutes: u32,
    ) -> Self {
        Self {
            venue,
            log,
            clock,
            stake,
            expiry_minutes,
            settlement_wait: Duration::from_secs(
                u64::from(expiry_minutes) * 60 + SETTLEMENT_BUFFER_SECS,
            ),
            retry_backoff: Duration::from_secs(2),
        }
    }

    /// Override the settlement wait and retry backoff (tests).
    pub fn with_waits(mut self, settlement_wait: Duration, retry_backoff: Duration) -> Self {
        self.settlement_wait = settlement_wait;
        self.retry_backoff = retry_backoff;
        self
    }

    /// Execute one trading attempt for an approved signal.
    ///
    /// Suspends until the order has expired and settled. Exactly one of the
    /// three `ExecutionOutcome` variants comes back; risk state is mutated
    /// only on `Settled`.
    pub async fn execute(
        &mut self,
        signal: &Signal,
        risk_state: &mut RiskState,
    ) -> Result<ExecutionOutcome> {
        let opened_at = self.clock.now();
        info!(
            pair = %signal.pair,
            direction = %signal.direction,
            stake = self.stake,
            price = signal.price,
            "Placing order"
        );

        let ticket = match self
            .venue
            .place_order(&signal.pair, signal.direction, self.stake, self.expiry_minutes)
            .await
        {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!(pair = %signal.pair, error = %e, "Order placement failed — attempt skipped");
                return Ok(ExecutionOutcome::Rejected);
            }
        };
        if !ticket.accepted {
            warn!(pair = %signal.pair, "Order rejected by venue — attempt skipped");
            return Ok(ExecutionOutcome::Rejected);
        }

        info!(order_id = %ticket.order_id, "Order accepted — waiting for settlement");
        tokio::time::sleep(self.settlement_wait).await;

        let settlement = match self.query_settlement(&ticket.order_id).await {
            Ok(profit) => profit,
            Err(e) => {
                error!(
                    order_id = %ticket.order_id,
                    error = %e,
                    "Settlement unknown — recording trade as unknown, risk state untouched"
                );
                let trade = self.build_trade(
                    signal,
                    &ticket.order_id,
                    opened_at,
                    Outcome::Unknown,
                    0.0,
                    risk_state.capital,
                );
                self.log.append(&trade)?;
                return Ok(ExecutionOutcome::SettlementUnknown(trade));
            }
        };

        let (outcome, profit) = classify(settlement, self.stake);
        risk_state.apply(profit);
        let trade = self.build_trade(
            signal,
            &ticket.order_id,
            opened_at,
            outcome,
            profit,
            risk_state.capital,
        );
        info!(
            pair = %trade.pair,
            outcome = %trade.outcome,
            profit = trade.profit,
            capital = trade.capital_after,
            "Trade settled"
        );
        self.log.append(&trade)?;
        Ok(ExecutionOutcome::Settled(trade))
    }

    async fn query_settlement(&self, order_id: &str) -> Result<f64> {
        let mut last_error = String::new();
        for attempt in 1..=SETTLEMENT_ATTEMPTS {
            match self.venue.get_settlement(order_id).await {
                Ok(profit) => return Ok(profit),
                Err(e) => {
                    warn!(order_id, attempt, error = %e, "Settlement query failed");
                    last_error = e.to_string();
                    if attempt < SETTLEMENT_ATTEMPTS {
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                }
            }
        }
        Err(Error::SettlementUnknown {
            order_id: order_id.to_string(),
            detail: last_error,
        })
    }

    fn build_trade(
        &self,
        signal: &Signal,
        order_id: &str,
        opened_at: chrono::DateTime<Utc>,
        outcome: Outcome,
        profit: f64,
        capital_after: f64,
    ) -> Trade {
        Trade {
            id: order_id.to_string(),
            opened_at,
            pair: signal.pair.clone(),
            direction: signal.direction,
            stake: self.stake,
            entry_price: signal.price,
            outcome,
            profit,
            capital_after,
            snapshot: signal.snapshot,
        }
    }
}

/// Classify a signed settlement result. A loss records the full stake as
/// the negative profit regardless of what the venue reported.
pub fn classify(settlement: f64, stake: f64) -> (Outcome, f64) {
    if settlement > 0.0 {
        (Outcome::Win, settlement)
    } else if settlement == 0.0 {
        (Outcome::Tie, 0.0)
    } else {
        (Outcome::Loss, -stake)
    }
}
