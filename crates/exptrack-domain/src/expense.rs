//! Domain models for expense entries and ledger queries.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::common::{DateWindow, DATE_FORMAT};

/// Number of rows returned by an unfiltered ledger query.
pub const RECENT_LIMIT: usize = 50;

/// A recorded expense. Entries are only ever inserted or deleted, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl ExpenseEntry {
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Insert payload; identity and creation time are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Materializes the entry a store would hold for this payload.
    pub fn into_entry(self, id: i64, created_at: NaiveDateTime) -> ExpenseEntry {
        ExpenseEntry {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            description: self.description,
            created_at,
        }
    }
}

/// Conjunction of a date range, an optional category and an optional text search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub window: DateWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ExpenseFilter {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            category: None,
            search: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Blank search terms are dropped so they never narrow the result.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    pub fn matches(&self, entry: &ExpenseEntry) -> bool {
        self.window.contains(entry.date) && self.matches_category(entry) && self.matches_text(entry)
    }

    pub fn matches_category(&self, entry: &ExpenseEntry) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| entry.category == category)
    }

    /// Case-insensitive substring match against description or category.
    pub fn matches_text(&self, entry: &ExpenseEntry) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let needle = term.to_lowercase();
        entry.description.to_lowercase().contains(&needle)
            || entry.category.to_lowercase().contains(&needle)
    }
}

/// Orders entries newest first, ties broken by the most recent insertion.
pub fn sort_newest_first(entries: &mut [ExpenseEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}
