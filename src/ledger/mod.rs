//! Ledger state machine
//!
//! Owns cash, per-symbol positions, and the equity history. Converts
//! signals into orders via a sizing policy and applies fills to
//! positions and cash. Cash and positions change only inside fill
//! handling; order generation never mutates state.

mod position;
mod sizing;

pub use position::Position;
pub use sizing::{FixedLot, SizePolicy, DEFAULT_LOT_SIZE};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{DataError, PriceLookup};
use crate::event::{Fill, Order, Signal};

/// One mark-to-market snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
    /// Cash plus the marked value of all open positions
    pub equity: f64,
}

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Fill rejected before any state was touched
    #[error("invalid fill for {symbol}: {reason}")]
    InvalidFill {
        /// Symbol of the rejected fill
        symbol: String,
        /// Why it was rejected
        reason: String,
    },
    /// Mutation or second finalize after the run was finalized
    #[error("ledger already finalized")]
    AlreadyFinalized,
    /// Price lookup failed while marking to market
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Cash, positions, and equity history for one simulation run.
///
/// Created once with the initial capital, mutated exclusively by the
/// dispatch loop feeding it market ticks, signals, and fills, and
/// finalized exactly once when the run ends.
pub struct Ledger {
    cash: f64,
    // BTreeMap keeps mark-to-market summation order deterministic,
    // so replaying the same inputs yields byte-identical equity curves
    positions: BTreeMap<String, Position>,
    equity_curve: Vec<EquityPoint>,
    sizer: Box<dyn SizePolicy>,
    finalized: bool,
}

impl Ledger {
    /// Create a ledger with the default fixed-lot sizing policy and an
    /// initial equity snapshot at `start_time`.
    pub fn new(initial_capital: f64, start_time: DateTime<Utc>) -> Self {
        Self::with_sizer(initial_capital, start_time, Box::new(FixedLot::default()))
    }

    /// Create a ledger with an explicit sizing policy
    pub fn with_sizer(
        initial_capital: f64,
        start_time: DateTime<Utc>,
        sizer: Box<dyn SizePolicy>,
    ) -> Self {
        tracing::debug!(initial_capital, policy = sizer.mode_name(), "ledger created");
        Self {
            cash: initial_capital,
            positions: BTreeMap::new(),
            equity_curve: vec![EquityPoint {
                timestamp: start_time,
                equity: initial_capital,
            }],
            sizer,
            finalized: false,
        }
    }

    fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.finalized {
            return Err(LedgerError::AlreadyFinalized);
        }
        Ok(())
    }

    /// Append a mark-to-market snapshot for one market tick.
    ///
    /// Equity is cash plus quantity times the latest known price for
    /// every symbol with a nonzero position. Enqueues nothing.
    pub fn on_market(
        &mut self,
        timestamp: DateTime<Utc>,
        prices: &dyn PriceLookup,
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;

        let mut equity = self.cash;
        for (symbol, position) in &self.positions {
            if !position.is_flat() {
                equity += position.quantity as f64 * prices.latest_price(symbol)?;
            }
        }

        if let Some(last) = self.equity_curve.last() {
            debug_assert!(timestamp >= last.timestamp, "market ticks must not go backwards");
        }
        self.equity_curve.push(EquityPoint { timestamp, equity });
        tracing::debug!(%timestamp, equity, "mark-to-market snapshot");
        Ok(())
    }

    /// Size an order for a signal, or nothing when the current position
    /// already satisfies the signal's intent. Never mutates the ledger.
    pub fn on_signal(&self, signal: &Signal) -> Option<Order> {
        let held = self
            .positions
            .get(&signal.symbol)
            .copied()
            .unwrap_or_default()
            .quantity;

        let (quantity, direction) = self
            .sizer
            .target_order(signal.intent, signal.strength, held)?;

        let order = Order::market(signal.symbol.clone(), quantity, direction);
        tracing::debug!(
            symbol = %order.symbol,
            quantity,
            ?direction,
            intent = ?signal.intent,
            "sized order from signal"
        );
        Some(order)
    }

    /// Apply a fill to positions and cash.
    ///
    /// Rejects fills with zero quantity or a non-finite / negative fill
    /// cost or commission before touching any state, so a defective
    /// execution handler cannot corrupt the equity curve.
    pub fn on_fill(&mut self, fill: &Fill) -> Result<(), LedgerError> {
        self.ensure_active()?;

        let reject = |reason: String| LedgerError::InvalidFill {
            symbol: fill.symbol.clone(),
            reason,
        };
        if fill.quantity == 0 {
            return Err(reject("zero quantity".to_string()));
        }
        if !fill.fill_cost.is_finite() || fill.fill_cost < 0.0 {
            return Err(reject(format!("fill cost {} is not a finite non-negative number", fill.fill_cost)));
        }
        if !fill.commission.is_finite() || fill.commission < 0.0 {
            return Err(reject(format!("commission {} is not a finite non-negative number", fill.commission)));
        }

        let sign = fill.direction.sign();
        let position = self.positions.entry(fill.symbol.clone()).or_default();
        position.quantity += sign * fill.quantity as i64;

        // Commission always reduces cash, regardless of direction
        self.cash -= sign as f64 * fill.quantity as f64 * fill.fill_cost + fill.commission;

        tracing::debug!(
            symbol = %fill.symbol,
            quantity = fill.quantity,
            direction = ?fill.direction,
            fill_cost = fill.fill_cost,
            commission = fill.commission,
            position = position.quantity,
            cash = self.cash,
            "fill applied"
        );
        Ok(())
    }

    /// Freeze the ledger and return the equity history.
    ///
    /// Callable exactly once per run; a second call, or any mutation
    /// afterward, fails with [`LedgerError::AlreadyFinalized`].
    pub fn finalize(&mut self) -> Result<Vec<EquityPoint>, LedgerError> {
        self.ensure_active()?;
        self.finalized = true;
        Ok(self.equity_curve.clone())
    }

    /// Current cash balance
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Current position for a symbol (flat if never traded)
    pub fn position(&self, symbol: &str) -> Position {
        self.positions.get(symbol).copied().unwrap_or_default()
    }

    /// Equity snapshots recorded so far
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }
}
