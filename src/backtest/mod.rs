//! Backtesting module
//!
//! The dispatch loop that replays historical bars through strategies,
//! the ledger, and the execution simulator, plus run configuration and
//! equity-curve analytics.

mod analytics;
mod simulator;

pub use analytics::{drawdowns, returns, sharpe_ratio, BacktestSummary, StatsError};
pub use simulator::{Backtest, BacktestResult, DispatchCounts, EngineError};

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::ledger::DEFAULT_LOT_SIZE;

/// Trading periods per year for daily bars
pub const DAILY_PERIODS: u32 = 252;

/// Backtest configuration
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    /// Starting cash
    pub initial_capital: f64,
    /// Fixed lot size for the default sizing policy
    pub lot_size: u64,
    /// Timestamp of the initial equity snapshot
    pub start_time: DateTime<Utc>,
    /// Optional pause between ticks for live-like pacing
    pub heartbeat: Option<Duration>,
    /// Periods per year used to annualize the Sharpe ratio
    pub periods_per_year: u32,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            lot_size: DEFAULT_LOT_SIZE,
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            heartbeat: None,
            periods_per_year: DAILY_PERIODS,
        }
    }
}
