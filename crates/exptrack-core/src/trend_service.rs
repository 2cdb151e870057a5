use chrono::NaiveDate;
use exptrack_domain::{DailyTotal, DateWindow};

use crate::{CoreResult, ExpenseStore};

/// Length of the spending trend shown by default.
pub const DEFAULT_TREND_DAYS: u32 = 30;

pub struct TrendService;

impl TrendService {
    /// Daily totals for `[reference - days, reference]`. Days without spending
    /// are absent rather than zero; an empty ledger yields an empty series.
    pub fn trend<S>(store: &S, reference: NaiveDate, days: u32) -> CoreResult<Vec<DailyTotal>>
    where
        S: ExpenseStore + ?Sized,
    {
        let window = DateWindow::trailing_days(reference, days);
        let series = store.daily_totals(window)?;
        tracing::debug!(%window, points = series.len(), "computed spending trend");
        Ok(series)
    }
}
