//! Backtest dispatch loop
//!
//! Orchestrates the tick-by-tick cycle: ask the data source to advance,
//! then drain the event queue dispatching each event to exactly one
//! handler. Strict FIFO ordering means that within one tick every
//! signal is sized before any order executes and every order executes
//! before any fill settles.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BacktestConfig, BacktestSummary, StatsError};
use crate::data::{DataError, DataSource};
use crate::event::{Event, EventQueue, EventSink};
use crate::execution::{ExecutionError, ExecutionHandler};
use crate::ledger::{EquityPoint, FixedLot, Ledger, LedgerError};
use crate::strategy::Strategy;

/// Dispatch loop errors; all fatal, the run terminates with no retry
#[derive(Debug, Error)]
pub enum EngineError {
    /// Ledger rejected an update
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// Data source failure
    #[error(transparent)]
    Data(#[from] DataError),
    /// Execution handler failure
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// A strategy failed; strategy errors always abort the run
    #[error("strategy failed: {0}")]
    Strategy(#[source] anyhow::Error),
    /// Execution handler broke the one-fill-per-order contract
    #[error("execution handler produced {produced} fills for one order, expected exactly 1")]
    FillContract {
        /// Fills actually enqueued
        produced: usize,
    },
    /// Summary statistics could not be computed
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Running counts of dispatched events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCounts {
    /// Market events processed
    pub ticks: u64,
    /// Signals dispatched
    pub signals: u64,
    /// Orders dispatched
    pub orders: u64,
    /// Fills dispatched
    pub fills: u64,
}

/// Complete backtest results
#[derive(Debug, Clone)]
pub struct BacktestResult {
    /// Summary statistics
    pub summary: BacktestSummary,
    /// Finalized equity history, one point per tick plus the seed
    pub equity_curve: Vec<EquityPoint>,
    /// Event counts over the whole run
    pub counts: DispatchCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Finished,
}

/// The event-driven simulation core.
///
/// Exclusively owns the event queue and the ledger; strategies, the
/// data source, and the execution handler only ever see an enqueue-only
/// [`EventSink`]. Single-threaded and deterministic: the same inputs
/// always replay to an identical equity curve.
pub struct Backtest {
    queue: EventQueue,
    sink: EventSink,
    data: Box<dyn DataSource>,
    strategies: Vec<Box<dyn Strategy>>,
    execution: Box<dyn ExecutionHandler>,
    ledger: Ledger,
    heartbeat: Option<Duration>,
    periods_per_year: u32,
    counts: DispatchCounts,
    state: LoopState,
}

impl Backtest {
    /// Wire up a backtest from its collaborators
    pub fn new(
        config: BacktestConfig,
        data: Box<dyn DataSource>,
        strategies: Vec<Box<dyn Strategy>>,
        execution: Box<dyn ExecutionHandler>,
    ) -> Self {
        let queue = EventQueue::new();
        let sink = queue.sink();
        let ledger = Ledger::with_sizer(
            config.initial_capital,
            config.start_time,
            Box::new(FixedLot::new(config.lot_size)),
        );
        Self {
            queue,
            sink,
            data,
            strategies,
            execution,
            ledger,
            heartbeat: config.heartbeat,
            periods_per_year: config.periods_per_year,
            counts: DispatchCounts::default(),
            state: LoopState::Running,
        }
    }

    /// Event counts so far
    pub fn counts(&self) -> DispatchCounts {
        self.counts
    }

    /// Timestamp for the current tick: the latest bar of the first
    /// symbol, which every symbol shares under lockstep advancement.
    fn mark_timestamp(&self) -> Result<DateTime<Utc>, DataError> {
        let symbol = self.data.symbols().first().ok_or(DataError::EmptyFeed)?;
        self.data.latest_timestamp(symbol)
    }

    /// Dispatch one event to its handler
    fn dispatch(&mut self, event: Event) -> Result<(), EngineError> {
        match event {
            Event::Market => {
                self.counts.ticks += 1;
                for strategy in &mut self.strategies {
                    strategy
                        .calculate_signals(&*self.data, &self.sink)
                        .map_err(EngineError::Strategy)?;
                }
                let timestamp = self.mark_timestamp()?;
                self.ledger.on_market(timestamp, &*self.data)?;
            }
            Event::Signal(signal) => {
                self.counts.signals += 1;
                if let Some(order) = self.ledger.on_signal(&signal) {
                    self.sink.send(Event::Order(order));
                }
            }
            Event::Order(order) => {
                self.counts.orders += 1;
                let queued_before = self.queue.len();
                self.execution
                    .execute_order(&order, &*self.data, &self.sink)?;
                let produced = self.queue.len() - queued_before;
                if produced != 1 {
                    return Err(EngineError::FillContract { produced });
                }
            }
            Event::Fill(fill) => {
                self.counts.fills += 1;
                self.ledger.on_fill(&fill)?;
            }
        }
        Ok(())
    }

    /// Drain the queue, dispatching until empty
    fn drain(&mut self) -> Result<(), EngineError> {
        while let Some(event) = self.queue.dequeue() {
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// One outer iteration: advance the data source, then drain.
    /// Returns `true` when the source is exhausted.
    fn tick(&mut self) -> Result<bool, EngineError> {
        let exhausted = self.data.advance(&self.sink);
        self.drain()?;
        Ok(exhausted)
    }

    /// Run the simulation to completion.
    ///
    /// Loops until the data source reports exhaustion and the queue has
    /// drained empty, then finalizes the ledger exactly once and
    /// computes summary statistics from the equity history.
    pub fn run(mut self) -> Result<BacktestResult, EngineError> {
        let strategy_names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        tracing::info!(
            symbols = ?self.data.symbols(),
            strategies = ?strategy_names,
            "starting backtest"
        );

        while self.state == LoopState::Running {
            let exhausted = self.tick()?;
            if exhausted && self.queue.is_empty() {
                self.state = LoopState::Finished;
            } else if let Some(pause) = self.heartbeat {
                thread::sleep(pause);
            }
        }

        let equity_curve = self.ledger.finalize()?;
        let summary = BacktestSummary::from_equity_curve(&equity_curve, self.periods_per_year)?;
        tracing::info!(
            ticks = self.counts.ticks,
            signals = self.counts.signals,
            orders = self.counts.orders,
            fills = self.counts.fills,
            final_equity = summary.final_equity,
            "backtest finished"
        );

        Ok(BacktestResult {
            summary,
            equity_curve,
            counts: self.counts,
        })
    }
}
