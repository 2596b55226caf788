//! barsim: event-driven backtesting engine
//!
//! Replays a finite sequence of market observations through one or more
//! strategies and turns the resulting trading decisions into a
//! consistent, auditable ledger of cash, positions, and equity over
//! time.
//!
//! This library provides the core components for:
//! - A closed event model (market / signal / order / fill)
//! - A single-consumer FIFO event queue with enqueue-only producer handles
//! - A ledger state machine with a pluggable position-sizing policy
//! - Zero-slippage simulated execution with a pluggable commission model
//! - The tick-by-tick dispatch loop orchestrating the event cascade
//! - Equity-curve analytics (Sharpe ratio, drawdowns)

pub mod backtest;
pub mod data;
pub mod event;
pub mod execution;
pub mod ledger;
pub mod strategy;
