//! Execution boundary
//!
//! Consumes orders and produces fills. The shipped handler is a
//! zero-latency, zero-slippage simulator; live brokers or richer
//! microstructure models plug in behind the same trait.

mod commission;
mod simulated;

pub use commission::{CommissionModel, PerShareCommission, ZeroCommission};
pub use simulated::SimulatedExecution;

use thiserror::Error;

use crate::data::{DataError, DataSource};
use crate::event::{EventSink, Order};

/// Execution boundary errors
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Reference price or timestamp lookup failed
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Trait for execution handler implementations.
///
/// Contract: every call must enqueue exactly one Fill on `sink`. The
/// dispatch loop verifies this and treats any other count as a fatal
/// contract violation.
pub trait ExecutionHandler {
    /// Execute an order against the current market state
    fn execute_order(
        &mut self,
        order: &Order,
        data: &dyn DataSource,
        sink: &EventSink,
    ) -> Result<(), ExecutionError>;
}
