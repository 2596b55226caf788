//! Event model and queue
//!
//! The closed set of events that flow through the dispatch loop, plus
//! the single-consumer FIFO queue they travel on.

mod queue;
mod types;

pub use queue::{EventQueue, EventSink};
pub use types::{
    Direction, Event, EventKind, Fill, Order, OrderId, OrderKind, Signal, SignalIntent,
};
