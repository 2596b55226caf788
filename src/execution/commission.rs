//! Commission models

/// Pluggable execution cost function
pub trait CommissionModel {
    /// Commission for filling `quantity` units at `fill_cost` per unit.
    /// Must return a finite, non-negative number.
    fn commission(&self, quantity: u64, fill_cost: f64) -> f64;
}

/// Per-unit commission with a minimum charge per fill
#[derive(Debug, Clone)]
pub struct PerShareCommission {
    /// Minimum charge per fill
    pub min: f64,
    /// Charge per unit
    pub rate: f64,
}

impl Default for PerShareCommission {
    fn default() -> Self {
        Self {
            min: 1.5,
            rate: 0.015,
        }
    }
}

impl CommissionModel for PerShareCommission {
    fn commission(&self, quantity: u64, _fill_cost: f64) -> f64 {
        (self.rate * quantity as f64).max(self.min)
    }
}

/// Free execution, useful in tests
#[derive(Debug, Clone, Default)]
pub struct ZeroCommission;

impl CommissionModel for ZeroCommission {
    fn commission(&self, _quantity: u64, _fill_cost: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_charge_applies_to_small_fills() {
        let model = PerShareCommission::default();
        // 100 * 0.015 = 1.5, right at the minimum
        assert_eq!(model.commission(100, 10.0), 1.5);
        assert_eq!(model.commission(10, 10.0), 1.5);
    }

    #[test]
    fn test_rate_applies_above_minimum() {
        let model = PerShareCommission::default();
        assert_eq!(model.commission(1_000, 10.0), 15.0);
    }

    #[test]
    fn test_zero_commission() {
        assert_eq!(ZeroCommission.commission(1_000, 10.0), 0.0);
    }
}
