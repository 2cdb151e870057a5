//! Result types produced by the aggregation and budget engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spending for one category compared against its configured budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub spent: f64,
    pub budget: f64,
    /// Absolute distance between `spent` and `budget`.
    pub delta: f64,
    pub over_budget: bool,
}

impl CategorySummary {
    pub fn from_parts(category: impl Into<String>, spent: f64, budget: f64) -> Self {
        Self {
            category: category.into(),
            spent,
            budget,
            delta: (spent - budget).abs(),
            over_budget: spent > budget,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.over_budget {
            "Over budget by"
        } else {
            "Under budget by"
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpendingSummary {
    pub total: f64,
    pub per_category: Vec<CategorySummary>,
}

impl SpendingSummary {
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.per_category.iter().find(|entry| entry.category == name)
    }
}

/// A category whose spending this month exceeds its budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: f64,
    pub budget: f64,
}

impl BudgetAlert {
    pub fn overrun(&self) -> f64 {
        self.spent - self.budget
    }
}

/// Sum of all expenses recorded on one date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// One slice of a proportional view of spending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionSlice {
    pub category: String,
    pub total: f64,
    pub percent: f64,
}
