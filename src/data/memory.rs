//! In-memory bar source

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{Bar, DataError, DataSource, PriceLookup};
use crate::event::{Event, EventSink};

/// In-memory data source advancing all symbols in lockstep by index.
///
/// Historical handlers pad every symbol's series onto one combined
/// index before replay, so lockstep-by-index advancement models the
/// same behavior: tick i exposes bar i of every symbol, and one Market
/// event is produced per tick regardless of symbol count.
pub struct InMemoryBars {
    symbols: Vec<String>,
    bars: HashMap<String, Vec<Bar>>,
    /// Number of bars revealed so far; bar `cursor - 1` is the latest
    cursor: usize,
    ticks: usize,
}

impl InMemoryBars {
    /// Build a source from per-symbol bar series.
    ///
    /// Fails with [`DataError::EmptyFeed`] if no symbols or no bars are
    /// supplied. Series of unequal length are truncated to the
    /// shortest.
    pub fn new(series: Vec<(String, Vec<Bar>)>) -> Result<Self, DataError> {
        if series.is_empty() {
            return Err(DataError::EmptyFeed);
        }
        let ticks = series.iter().map(|(_, bars)| bars.len()).min().unwrap_or(0);
        if ticks == 0 {
            return Err(DataError::EmptyFeed);
        }

        let symbols = series.iter().map(|(s, _)| s.clone()).collect();
        let bars = series.into_iter().collect();
        Ok(Self {
            symbols,
            bars,
            cursor: 0,
            ticks,
        })
    }

    /// Single-symbol source over a series of flat-priced bars
    pub fn single(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, DataError> {
        Self::new(vec![(symbol.into(), bars)])
    }

    fn latest_bar(&self, symbol: &str) -> Result<&Bar, DataError> {
        let series = self.bars.get(symbol).ok_or_else(|| DataError::DataUnavailable {
            symbol: symbol.to_string(),
        })?;
        // Before the first advance there is no latest bar
        series
            .get(self.cursor.checked_sub(1).ok_or_else(|| DataError::DataUnavailable {
                symbol: symbol.to_string(),
            })?)
            .ok_or_else(|| DataError::DataUnavailable {
                symbol: symbol.to_string(),
            })
    }
}

impl PriceLookup for InMemoryBars {
    fn latest_price(&self, symbol: &str) -> Result<f64, DataError> {
        Ok(self.latest_bar(symbol)?.adj_close)
    }
}

impl DataSource for InMemoryBars {
    fn advance(&mut self, sink: &EventSink) -> bool {
        if self.cursor >= self.ticks {
            return true;
        }
        self.cursor += 1;
        sink.send(Event::Market);
        false
    }

    fn latest_timestamp(&self, symbol: &str) -> Result<DateTime<Utc>, DataError> {
        Ok(self.latest_bar(symbol)?.timestamp)
    }

    fn latest_closes(&self, symbol: &str, n: usize) -> Vec<f64> {
        let Some(series) = self.bars.get(symbol) else {
            return Vec::new();
        };
        let end = self.cursor.min(series.len());
        let start = end.saturating_sub(n);
        series[start..end].iter().map(|bar| bar.adj_close).collect()
    }

    fn symbols(&self) -> &[String] {
        &self.symbols
    }
}
