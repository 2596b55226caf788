//! Strategy boundary
//!
//! Strategies consume market ticks and enqueue zero or more signals.
//! They never touch the ledger; position targeting goes through signal
//! intent and the ledger's sizing policy.

mod buy_and_hold;
mod ma_cross;

pub use buy_and_hold::BuyAndHold;
pub use ma_cross::MovingAverageCross;

use crate::data::DataSource;
use crate::event::EventSink;

/// Trait for strategy implementations.
///
/// Invoked once per Market event, before the ledger marks to market.
/// Errors are fatal to the run.
pub trait Strategy {
    /// Inspect the latest bars and enqueue any resulting signals
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        sink: &EventSink,
    ) -> anyhow::Result<()>;

    /// Strategy name for reporting
    fn name(&self) -> &'static str;
}
