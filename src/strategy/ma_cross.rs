//! Moving average crossover strategy

use std::collections::HashMap;

use super::Strategy;
use crate::data::DataSource;
use crate::event::{Event, EventSink, Signal, SignalIntent};

/// Simple moving average crossover.
///
/// Emits a Long signal when the short SMA crosses above the long SMA
/// and an Exit signal on the reverse cross. Default windows are 100/400
/// periods. Needs at least `long_window` bars of history before it
/// trades a symbol.
#[derive(Debug)]
pub struct MovingAverageCross {
    short_window: usize,
    long_window: usize,
    in_market: HashMap<String, bool>,
}

impl MovingAverageCross {
    /// Create the strategy with explicit lookback windows
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            in_market: HashMap::new(),
        }
    }
}

impl Default for MovingAverageCross {
    fn default() -> Self {
        Self::new(100, 400)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl Strategy for MovingAverageCross {
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        sink: &EventSink,
    ) -> anyhow::Result<()> {
        for symbol in data.symbols().to_vec() {
            let closes = data.latest_closes(&symbol, self.long_window);
            if closes.len() < self.long_window {
                continue;
            }

            let short_sma = mean(&closes[closes.len() - self.short_window..]);
            let long_sma = mean(&closes);
            let timestamp = data.latest_timestamp(&symbol)?;
            let held = self.in_market.entry(symbol.clone()).or_insert(false);

            if short_sma > long_sma && !*held {
                tracing::info!(%symbol, %timestamp, short_sma, long_sma, "long entry");
                sink.send(Event::Signal(Signal {
                    symbol: symbol.clone(),
                    timestamp,
                    intent: SignalIntent::Long,
                    strength: 1.0,
                }));
                *held = true;
            } else if short_sma < long_sma && *held {
                tracing::info!(%symbol, %timestamp, short_sma, long_sma, "exit");
                sink.send(Event::Signal(Signal {
                    symbol: symbol.clone(),
                    timestamp,
                    intent: SignalIntent::Exit,
                    strength: 1.0,
                }));
                *held = false;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ma-cross"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, InMemoryBars};
    use crate::event::EventQueue;
    use chrono::{Duration, TimeZone, Utc};

    fn source_from(prices: &[f64]) -> InMemoryBars {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let bars = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Bar::flat(start + Duration::days(i as i64), price))
            .collect();
        InMemoryBars::single("TQQQ", bars).unwrap()
    }

    fn drain_signals(queue: &mut EventQueue) -> Vec<SignalIntent> {
        let mut intents = Vec::new();
        while let Some(event) = queue.dequeue() {
            if let Event::Signal(signal) = event {
                intents.push(signal.intent);
            }
        }
        intents
    }

    #[test]
    fn test_no_signal_before_full_lookback() {
        let mut source = source_from(&[1.0, 2.0, 3.0, 4.0]);
        let mut queue = EventQueue::new();
        let sink = queue.sink();
        let mut strategy = MovingAverageCross::new(2, 4);

        source.advance(&sink);
        let _market = queue.dequeue();
        strategy.calculate_signals(&source, &sink).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cross_up_then_down_emits_long_then_exit() {
        // Rising prices push the short SMA above the long SMA once the
        // lookback fills; the collapse at the end drags it back under.
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.5, 0.25, 0.1];
        let mut source = source_from(&prices);
        let mut queue = EventQueue::new();
        let sink = queue.sink();
        let mut strategy = MovingAverageCross::new(2, 4);

        let mut intents = Vec::new();
        while !source.advance(&sink) {
            let _market = queue.dequeue();
            strategy.calculate_signals(&source, &sink).unwrap();
            intents.extend(drain_signals(&mut queue));
        }

        assert_eq!(intents, vec![SignalIntent::Long, SignalIntent::Exit]);
    }
}
