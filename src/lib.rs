#![doc(test(attr(deny(warnings))))]

//! Tracky Core offers the monthly ledger, action processing, and payday
//! rollover primitives that power a household budgeting app.

pub mod assistant;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

/// Initializes global tracing and emits a startup info log. Safe to call
/// more than once.
pub fn init() {
    utils::init_tracing();
    tracing::info!("Tracky Core tracing initialized.");
}
