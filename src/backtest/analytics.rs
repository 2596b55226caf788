//! Backtest analytics and reporting
//!
//! Consumes the finalized equity history: period returns, Sharpe
//! ratio against a zero benchmark, and peak-to-trough drawdowns with
//! durations measured in ticks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::EquityPoint;

/// Analytics errors
#[derive(Debug, Error)]
pub enum StatsError {
    /// Fewer equity points than the statistic needs
    #[error("need at least {required} equity points, got {actual}")]
    InsufficientData {
        /// Minimum number of points
        required: usize,
        /// Points supplied
        actual: usize,
    },
}

/// Period-over-period percentage returns of an equity curve
pub fn returns(curve: &[EquityPoint]) -> Result<Vec<f64>, StatsError> {
    if curve.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: curve.len(),
        });
    }
    Ok(curve
        .windows(2)
        .map(|pair| pair[1].equity / pair[0].equity - 1.0)
        .collect())
}

/// Annualized Sharpe ratio over a zero risk-free benchmark.
///
/// `periods` is the number of return periods per year: 252 for daily
/// bars, 252 * 6.5 for hourly, and so on. A flat return series has zero
/// volatility and yields a Sharpe of 0.
pub fn sharpe_ratio(period_returns: &[f64], periods: u32) -> Result<f64, StatsError> {
    if period_returns.is_empty() {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let n = period_returns.len() as f64;
    let mean = period_returns.iter().sum::<f64>() / n;
    let variance = period_returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Ok(0.0);
    }
    Ok((periods as f64).sqrt() * mean / std_dev)
}

/// Drawdown series, maximum drawdown, and longest drawdown duration.
///
/// Walks the curve tracking the high water mark; drawdown at each point
/// is the absolute decline from the peak, and duration counts
/// consecutive underwater ticks.
pub fn drawdowns(curve: &[EquityPoint]) -> Result<(Vec<f64>, f64, u32), StatsError> {
    if curve.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: curve.len(),
        });
    }

    let mut high_water_mark = curve[0].equity;
    let mut series = vec![0.0];
    let mut duration = 0u32;
    let mut max_drawdown = 0.0f64;
    let mut max_duration = 0u32;

    for point in &curve[1..] {
        high_water_mark = high_water_mark.max(point.equity);
        let drawdown = high_water_mark - point.equity;
        duration = if drawdown == 0.0 { 0 } else { duration + 1 };
        max_drawdown = max_drawdown.max(drawdown);
        max_duration = max_duration.max(duration);
        series.push(drawdown);
    }
    Ok((series, max_drawdown, max_duration))
}

/// Summary statistics from a finalized equity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    /// Total return over the run, in percent
    pub total_return_pct: f64,
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
    /// Maximum peak-to-trough drawdown (absolute)
    pub max_drawdown: f64,
    /// Longest drawdown duration in ticks
    pub max_drawdown_duration: u32,
    /// Equity at the end of the run
    pub final_equity: f64,
}

impl BacktestSummary {
    /// Compute summary statistics from a finalized equity curve.
    /// Requires at least two points.
    pub fn from_equity_curve(curve: &[EquityPoint], periods: u32) -> Result<Self, StatsError> {
        let period_returns = returns(curve)?;
        let sharpe = sharpe_ratio(&period_returns, periods)?;
        let (_, max_drawdown, max_duration) = drawdowns(curve)?;

        let first = curve[0].equity;
        let last = curve[curve.len() - 1].equity;
        Ok(Self {
            total_return_pct: (last / first - 1.0) * 100.0,
            sharpe_ratio: sharpe,
            max_drawdown,
            max_drawdown_duration: max_duration,
            final_equity: last,
        })
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════
Total Return:       {:+.2}%
Sharpe Ratio:       {:.2}
Max Drawdown:       {:.2}
Drawdown Duration:  {} ticks
Final Equity:       {:.2}
══════════════════════════════════════════════════════
"#,
            self.total_return_pct,
            self.sharpe_ratio,
            self.max_drawdown,
            self.max_drawdown_duration,
            self.final_equity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, Utc};

    fn curve(equities: &[f64]) -> Vec<EquityPoint> {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        equities
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                timestamp: start + Duration::days(i as i64),
                equity,
            })
            .collect()
    }

    #[test]
    fn test_returns_needs_two_points() {
        let err = returns(&curve(&[100.0])).unwrap_err();
        assert!(matches!(err, StatsError::InsufficientData { required: 2, actual: 1 }));
    }

    #[test]
    fn test_returns_are_percentage_changes() {
        let result = returns(&curve(&[100.0, 110.0, 99.0])).unwrap();
        assert_relative_eq!(result[0], 0.10, max_relative = 1e-12);
        assert_relative_eq!(result[1], -0.10, max_relative = 1e-12);
    }

    #[test]
    fn test_sharpe_zero_for_flat_curve() {
        let result = returns(&curve(&[100.0, 100.0, 100.0])).unwrap();
        assert_eq!(sharpe_ratio(&result, 252).unwrap(), 0.0);
    }

    #[test]
    fn test_sharpe_positive_for_rising_curve() {
        let result = returns(&curve(&[100.0, 101.0, 103.0, 104.0])).unwrap();
        assert!(sharpe_ratio(&result, 252).unwrap() > 0.0);
    }

    #[test]
    fn test_sharpe_annualization_scales_with_sqrt_periods() {
        let result = returns(&curve(&[100.0, 101.0, 103.0, 104.0])).unwrap();
        let daily = sharpe_ratio(&result, 252).unwrap();
        let single = sharpe_ratio(&result, 1).unwrap();
        assert_relative_eq!(daily, single * (252.0f64).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_drawdowns_track_high_water_mark() {
        let (series, max_dd, max_dur) =
            drawdowns(&curve(&[100.0, 110.0, 105.0, 102.0, 112.0])).unwrap();
        assert_eq!(series, vec![0.0, 0.0, 5.0, 8.0, 0.0]);
        assert_eq!(max_dd, 8.0);
        assert_eq!(max_dur, 2);
    }

    #[test]
    fn test_drawdowns_never_recovering() {
        let (_, max_dd, max_dur) = drawdowns(&curve(&[100.0, 90.0, 80.0])).unwrap();
        assert_eq!(max_dd, 20.0);
        assert_eq!(max_dur, 2);
    }

    #[test]
    fn test_summary_insufficient_data() {
        let err = BacktestSummary::from_equity_curve(&curve(&[100.0]), 252).unwrap_err();
        assert!(matches!(err, StatsError::InsufficientData { .. }));
    }

    #[test]
    fn test_summary_fields() {
        let summary =
            BacktestSummary::from_equity_curve(&curve(&[100.0, 110.0, 105.0]), 252).unwrap();
        assert_relative_eq!(summary.total_return_pct, 5.0, max_relative = 1e-12);
        assert_eq!(summary.max_drawdown, 5.0);
        assert_eq!(summary.max_drawdown_duration, 1);
        assert_eq!(summary.final_equity, 105.0);

        let table = summary.format_table();
        assert!(table.contains("BACKTEST RESULTS"));
        assert!(table.contains("Sharpe Ratio"));
    }
}
