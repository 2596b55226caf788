//! Buy-and-hold benchmark strategy

use std::collections::HashSet;

use super::Strategy;
use crate::data::DataSource;
use crate::event::{Event, EventSink, Signal, SignalIntent};

/// Goes long every symbol on its first bar and never exits.
///
/// Primarily a testing mechanism and a benchmark to compare other
/// strategies against.
#[derive(Debug, Default)]
pub struct BuyAndHold {
    bought: HashSet<String>,
}

impl BuyAndHold {
    /// Create the strategy
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for BuyAndHold {
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        sink: &EventSink,
    ) -> anyhow::Result<()> {
        for symbol in data.symbols().to_vec() {
            if self.bought.contains(&symbol) {
                continue;
            }
            let timestamp = data.latest_timestamp(&symbol)?;
            tracing::info!(%symbol, %timestamp, "entering long position");
            sink.send(Event::Signal(Signal {
                symbol: symbol.clone(),
                timestamp,
                intent: SignalIntent::Long,
                strength: 1.0,
            }));
            self.bought.insert(symbol);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "buy-and-hold"
    }
}
