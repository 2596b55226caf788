//! Simulated execution handler

use super::{CommissionModel, ExecutionError, ExecutionHandler, PerShareCommission};
use crate::data::DataSource;
use crate::event::{Event, EventSink, Fill, Order};

/// Zero-latency, zero-slippage execution simulator.
///
/// Fills every order in full at the latest adjusted close of its
/// symbol, stamped with the latest bar timestamp. No wall-clock reads,
/// so replaying the same inputs yields identical fills.
pub struct SimulatedExecution {
    venue: String,
    commission: Box<dyn CommissionModel>,
}

impl SimulatedExecution {
    /// Simulator with the default per-share commission model
    pub fn new() -> Self {
        Self::with_commission(Box::new(PerShareCommission::default()))
    }

    /// Simulator with an explicit commission model
    pub fn with_commission(commission: Box<dyn CommissionModel>) -> Self {
        Self {
            venue: "sim".to_string(),
            commission,
        }
    }
}

impl Default for SimulatedExecution {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionHandler for SimulatedExecution {
    fn execute_order(
        &mut self,
        order: &Order,
        data: &dyn DataSource,
        sink: &EventSink,
    ) -> Result<(), ExecutionError> {
        let fill_cost = data.latest_price(&order.symbol)?;
        let timestamp = data.latest_timestamp(&order.symbol)?;
        let commission = self.commission.commission(order.quantity, fill_cost);

        let fill = Fill {
            order_id: order.id,
            timestamp,
            symbol: order.symbol.clone(),
            venue: self.venue.clone(),
            quantity: order.quantity,
            direction: order.direction,
            fill_cost,
            commission,
        };
        tracing::debug!(
            symbol = %fill.symbol,
            quantity = fill.quantity,
            direction = ?fill.direction,
            fill_cost,
            commission,
            "order filled"
        );
        sink.send(Event::Fill(fill));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, DataError, InMemoryBars};
    use crate::event::{Direction, EventQueue};
    use crate::execution::ZeroCommission;
    use chrono::{TimeZone, Utc};

    fn source_at(price: f64) -> InMemoryBars {
        let bar = Bar::flat(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(), price);
        let mut source = InMemoryBars::single("TQQQ", vec![bar]).unwrap();
        let queue = EventQueue::new();
        source.advance(&queue.sink());
        source
    }

    #[test]
    fn test_fills_at_latest_price_with_commission() {
        let source = source_at(10.0);
        let mut queue = EventQueue::new();
        let sink = queue.sink();
        let mut exec = SimulatedExecution::new();

        let order = Order::market("TQQQ", 100, Direction::Buy);
        exec.execute_order(&order, &source, &sink).unwrap();

        assert_eq!(queue.len(), 1);
        let Some(Event::Fill(fill)) = queue.dequeue() else {
            panic!("expected a fill event");
        };
        assert_eq!(fill.order_id, order.id);
        assert_eq!(fill.fill_cost, 10.0);
        assert_eq!(fill.quantity, 100);
        assert_eq!(fill.direction, Direction::Buy);
        assert_eq!(fill.commission, 1.5);
        assert_eq!(fill.venue, "sim");
    }

    #[test]
    fn test_fill_timestamp_comes_from_the_bar() {
        let source = source_at(10.0);
        let mut queue = EventQueue::new();
        let sink = queue.sink();
        let mut exec = SimulatedExecution::with_commission(Box::new(ZeroCommission));

        exec.execute_order(&Order::market("TQQQ", 1, Direction::Sell), &source, &sink)
            .unwrap();

        let Some(Event::Fill(fill)) = queue.dequeue() else {
            panic!("expected a fill event");
        };
        assert_eq!(
            fill.timestamp,
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(fill.commission, 0.0);
    }

    #[test]
    fn test_unknown_symbol_fails_without_enqueueing() {
        let source = source_at(10.0);
        let queue = EventQueue::new();
        let sink = queue.sink();
        let mut exec = SimulatedExecution::new();

        let err = exec
            .execute_order(&Order::market("SPY", 1, Direction::Buy), &source, &sink)
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Data(DataError::DataUnavailable { .. })));
        assert!(queue.is_empty());
    }
}
