//! Vector-backed [`ExpenseStore`] for embedding and tests.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use exptrack_domain::{
    sort_newest_first, DailyTotal, DateWindow, ExpenseEntry, ExpenseFilter, NewExpense,
    RECENT_LIMIT,
};

use crate::{CoreResult, ExpenseStore};

/// Keeps entries in insertion order, which is also id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    entries: Vec<ExpenseEntry>,
    last_id: i64,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_window<'a>(
        &'a self,
        window: Option<DateWindow>,
    ) -> impl Iterator<Item = &'a ExpenseEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| window.map_or(true, |w| w.contains(entry.date)))
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn insert(&mut self, expense: NewExpense) -> CoreResult<i64> {
        self.last_id += 1;
        let id = self.last_id;
        self.entries.push(expense.into_entry(id, Utc::now().naive_utc()));
        Ok(id)
    }

    fn delete(&mut self, id: i64) -> CoreResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        Ok(self.entries.len() != before)
    }

    fn delete_matching(&mut self, date: NaiveDate, amount: f64) -> CoreResult<usize> {
        let before = self.entries.len();
        self.entries.retain(|entry| !(entry.date == date && entry.amount == amount));
        Ok(before - self.entries.len())
    }

    fn get(&self, id: i64) -> CoreResult<Option<ExpenseEntry>> {
        Ok(self.entries.iter().find(|entry| entry.id == id).cloned())
    }

    fn query(&self, filter: Option<&ExpenseFilter>) -> CoreResult<Vec<ExpenseEntry>> {
        let mut rows: Vec<ExpenseEntry> = match filter {
            Some(filter) => self
                .entries
                .iter()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect(),
            None => self.entries.clone(),
        };
        sort_newest_first(&mut rows);
        if filter.is_none() {
            rows.truncate(RECENT_LIMIT);
        }
        Ok(rows)
    }

    fn all_entries(&self) -> CoreResult<Vec<ExpenseEntry>> {
        let mut rows = self.entries.clone();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn sum_by_category(&self, window: Option<DateWindow>) -> CoreResult<BTreeMap<String, f64>> {
        let mut totals = BTreeMap::new();
        for entry in self.in_window(window) {
            *totals.entry(entry.category.clone()).or_insert(0.0) += entry.amount;
        }
        Ok(totals)
    }

    fn sum_total(&self, window: Option<DateWindow>) -> CoreResult<f64> {
        Ok(self.in_window(window).map(|entry| entry.amount).sum())
    }

    fn daily_totals(&self, window: DateWindow) -> CoreResult<Vec<DailyTotal>> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for entry in self.in_window(Some(window)) {
            *by_date.entry(entry.date).or_insert(0.0) += entry.amount;
        }
        Ok(by_date
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect())
    }

    fn count(&self) -> CoreResult<usize> {
        Ok(self.entries.len())
    }
}
