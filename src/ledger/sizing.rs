//! Position sizing policies
//!
//! A sizing policy turns signal intent plus the current holding into an
//! order quantity and direction. The default is fixed-lot sizing;
//! signal strength is passed through as a hook for risk-weighted
//! policies but the default ignores it.

use crate::event::{Direction, SignalIntent};

/// Default lot size in units
pub const DEFAULT_LOT_SIZE: u64 = 100;

/// Trait for position sizing policy implementations
pub trait SizePolicy {
    /// Quantity and direction of the order that moves the current
    /// signed `position` toward the signal's intent, or `None` when no
    /// order is needed (the position already satisfies the intent).
    fn target_order(
        &self,
        intent: SignalIntent,
        strength: f64,
        position: i64,
    ) -> Option<(u64, Direction)>;

    /// Policy name for reporting
    fn mode_name(&self) -> &'static str;
}

/// Fixed lot size policy.
///
/// Long and Short enter with one lot from flat, or a doubled lot when
/// flipping an opposite position in a single order. Exit flattens
/// exactly. Repeated signals that would not change the target state
/// produce no order, so duplicate signals cannot generate runaway
/// orders.
#[derive(Debug, Clone)]
pub struct FixedLot {
    /// Units per entry order
    pub lot: u64,
}

impl FixedLot {
    /// Create a policy with the given lot size
    pub fn new(lot: u64) -> Self {
        Self { lot }
    }
}

impl Default for FixedLot {
    fn default() -> Self {
        Self {
            lot: DEFAULT_LOT_SIZE,
        }
    }
}

impl SizePolicy for FixedLot {
    fn target_order(
        &self,
        intent: SignalIntent,
        _strength: f64,
        position: i64,
    ) -> Option<(u64, Direction)> {
        match intent {
            SignalIntent::Long => match position {
                0 => Some((self.lot, Direction::Buy)),
                p if p < 0 => Some((self.lot * 2, Direction::Buy)),
                _ => None,
            },
            SignalIntent::Short => match position {
                0 => Some((self.lot, Direction::Sell)),
                p if p > 0 => Some((self.lot * 2, Direction::Sell)),
                _ => None,
            },
            SignalIntent::Exit => match position {
                0 => None,
                p if p > 0 => Some((p.unsigned_abs(), Direction::Sell)),
                p => Some((p.unsigned_abs(), Direction::Buy)),
            },
        }
    }

    fn mode_name(&self) -> &'static str {
        "fixed-lot"
    }
}
