//! Event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order identifier
pub type OrderId = Uuid;

/// Intent carried by a strategy signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalIntent {
    /// Target a long position
    Long,
    /// Target a short position
    Short,
    /// Flatten any open position
    Exit,
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Buying, position delta +quantity
    Buy,
    /// Selling, position delta -quantity
    Sell,
}

impl Direction {
    /// Signed unit multiplier: +1 for buys, -1 for sells
    pub fn sign(self) -> i64 {
        match self {
            Direction::Buy => 1,
            Direction::Sell => -1,
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Market order (immediate execution)
    Market,
    /// Limit order (price specified)
    Limit,
}

/// A trading signal emitted by a strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Symbol the signal applies to
    pub symbol: String,
    /// Bar timestamp at which the signal was generated
    pub timestamp: DateTime<Utc>,
    /// What the strategy wants to hold
    pub intent: SignalIntent,
    /// Advisory strength in [0, 1]; hook for risk-weighted sizing
    pub strength: f64,
}

/// An order produced by the ledger's sizing policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,
    /// Symbol to trade
    pub symbol: String,
    /// Order type
    pub kind: OrderKind,
    /// Unsigned quantity
    pub quantity: u64,
    /// Trade direction
    pub direction: Direction,
}

impl Order {
    /// Create a market order with a fresh identifier
    pub fn market(symbol: impl Into<String>, quantity: u64, direction: Direction) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            kind: OrderKind::Market,
            quantity,
            direction,
        }
    }
}

/// A fill (executed order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Order that produced this fill
    pub order_id: OrderId,
    /// Bar timestamp at which the order was filled
    pub timestamp: DateTime<Utc>,
    /// Symbol traded
    pub symbol: String,
    /// Venue the order was filled on
    pub venue: String,
    /// Unsigned quantity filled
    pub quantity: u64,
    /// Trade direction
    pub direction: Direction,
    /// Price paid per unit
    pub fill_cost: f64,
    /// Commission charged, always >= 0
    pub commission: f64,
}

/// The closed set of events flowing through the dispatch loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Simulated time advanced by one tick
    Market,
    /// Strategy decision
    Signal(Signal),
    /// Sized order awaiting execution
    Order(Order),
    /// Executed order awaiting settlement
    Fill(Fill),
}

/// Payload-free event tag, used for counting and dispatch inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Market,
    Signal,
    Order,
    Fill,
}

impl Event {
    /// Tag for this event
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Market => EventKind::Market,
            Event::Signal(_) => EventKind::Signal,
            Event::Order(_) => EventKind::Order,
            Event::Fill(_) => EventKind::Fill,
        }
    }
}
