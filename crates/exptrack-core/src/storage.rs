use std::collections::BTreeMap;

use chrono::NaiveDate;
use exptrack_domain::{DailyTotal, DateWindow, ExpenseEntry, ExpenseFilter, NewExpense};

use crate::CoreResult;

/// Durable, queryable storage of expense entries.
///
/// Every failure is reported as [`crate::CoreError::Storage`] and is final for
/// the attempted call; implementations never retry.
pub trait ExpenseStore: Send {
    /// Records a new entry and returns its store-assigned id.
    fn insert(&mut self, expense: NewExpense) -> CoreResult<i64>;

    /// Deletes the entry with `id`. Returns `false` when no such entry exists.
    fn delete(&mut self, id: i64) -> CoreResult<bool>;

    /// Deletes every entry whose date and amount both equal the arguments.
    ///
    /// Unrelated entries that happen to share the pair are removed together;
    /// prefer [`ExpenseStore::delete`] when the id is known.
    fn delete_matching(&mut self, date: NaiveDate, amount: f64) -> CoreResult<usize>;

    fn get(&self, id: i64) -> CoreResult<Option<ExpenseEntry>>;

    /// Filtered queries return every match; `None` returns the
    /// [`exptrack_domain::RECENT_LIMIT`] most recent entries. Results are
    /// ordered by date descending, then id descending.
    fn query(&self, filter: Option<&ExpenseFilter>) -> CoreResult<Vec<ExpenseEntry>>;

    /// The whole ledger in the same order as [`ExpenseStore::query`].
    fn all_entries(&self) -> CoreResult<Vec<ExpenseEntry>>;

    fn sum_by_category(&self, window: Option<DateWindow>) -> CoreResult<BTreeMap<String, f64>>;

    /// Total of all amounts in `window`, `0.0` when nothing matches.
    fn sum_total(&self, window: Option<DateWindow>) -> CoreResult<f64>;

    /// One total per date with at least one entry, ascending. Empty dates are omitted.
    fn daily_totals(&self, window: DateWindow) -> CoreResult<Vec<DailyTotal>>;

    fn count(&self) -> CoreResult<usize>;
}
