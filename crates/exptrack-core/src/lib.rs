//! exptrack-core
//!
//! Ledger store contract and the aggregation/budget engine.
//! Depends on exptrack-domain. No CLI, no terminal I/O, no SQL.

pub mod budget_service;
pub mod error;
pub mod expense_service;
pub mod memory;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod trend_service;

pub use budget_service::*;
pub use error::{CoreError, CoreResult};
pub use expense_service::*;
pub use memory::InMemoryExpenseStore;
pub use storage::ExpenseStore;
pub use summary_service::*;
pub use time::{Clock, FixedClock};
pub use trend_service::*;
