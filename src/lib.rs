#![doc(test(attr(deny(warnings))))]

//! Expense Tracker records personal expenses in a local SQLite ledger,
//! compares spending against monthly category budgets and drives a small
//! command shell on top of both.

pub mod cli;
pub mod core;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "expense tracker starting");
    });
}
