//! Market data boundary
//!
//! The data source produces one Market event per simulated tick and
//! answers latest-bar queries for strategies and the ledger. Concrete
//! ingestion (CSV files, web APIs) lives outside the core; the
//! in-memory source here is the reference implementation of the
//! boundary.

mod bar;
mod memory;

pub use bar::Bar;
pub use memory::InMemoryBars;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::EventSink;

/// Data boundary errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Queried for a symbol never loaded into the source
    #[error("no data loaded for symbol {symbol}")]
    DataUnavailable {
        /// The unknown symbol
        symbol: String,
    },
    /// Source constructed without any bars
    #[error("data source has no bars")]
    EmptyFeed,
}

/// Capability to price a symbol at the current simulated time
pub trait PriceLookup {
    /// Latest known price (adjusted close) for a symbol
    fn latest_price(&self, symbol: &str) -> Result<f64, DataError>;
}

/// The advance-tick boundary the dispatch loop drives
pub trait DataSource: PriceLookup {
    /// Advance simulated time by one tick.
    ///
    /// Enqueues at most one Market event on `sink` and returns `true`
    /// once the feed is exhausted (in which case nothing is enqueued).
    /// Exhaustion is the normal termination signal, not an error.
    fn advance(&mut self, sink: &EventSink) -> bool;

    /// Timestamp of the latest bar for a symbol
    fn latest_timestamp(&self, symbol: &str) -> Result<DateTime<Utc>, DataError>;

    /// Up to `n` most recent adjusted closes for a symbol, oldest first.
    /// Returns fewer than `n` values early in the feed.
    fn latest_closes(&self, symbol: &str, n: usize) -> Vec<f64>;

    /// Symbols carried by this source
    fn symbols(&self) -> &[String];
}
