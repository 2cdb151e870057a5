//! exptrack-domain
//!
//! Pure domain models for the expense ledger (entries, filters, settings, summaries).
//! No I/O, no CLI, no storage. Only data types and their invariants.

pub mod common;
pub mod expense;
pub mod settings;
pub mod summary;

pub use common::*;
pub use expense::*;
pub use settings::*;
pub use summary::*;
