//! OHLCV bar type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a symbol at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Dividend/split adjusted closing price
    pub adj_close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Bar {
    /// Flat bar: every price field set to `price`, zero volume.
    /// Convenient for tests and synthetic feeds.
    pub fn flat(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            adj_close: price,
            volume: 0.0,
        }
    }
}
