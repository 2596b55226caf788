//! Position tracking

use serde::{Deserialize, Serialize};

/// Net holding in one symbol, accumulated purely from fills.
///
/// The signed quantity is the whole position state: positive is long,
/// negative is short, zero is flat. Long/short/flat are derived from
/// the sign rather than tracked separately, so the state cannot
/// desynchronize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Signed net quantity
    pub quantity: i64,
}

impl Position {
    /// No holding
    pub fn is_flat(self) -> bool {
        self.quantity == 0
    }

    /// Positive net quantity
    pub fn is_long(self) -> bool {
        self.quantity > 0
    }

    /// Negative net quantity
    pub fn is_short(self) -> bool {
        self.quantity < 0
    }
}
