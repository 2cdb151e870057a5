//! Budget comparisons and over-budget alerts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use exptrack_domain::{BudgetAlert, CategorySummary, DateWindow, Settings};

use crate::{CoreResult, ExpenseStore};

/// Stateless budgeting utilities evaluated against explicit [`Settings`].
pub struct BudgetService;

impl BudgetService {
    pub fn category_status(category: impl Into<String>, spent: f64, budget: f64) -> CategorySummary {
        CategorySummary::from_parts(category, spent, budget)
    }

    /// Alerts for the calendar month containing `reference`.
    pub fn budget_alerts<S>(
        store: &S,
        settings: &Settings,
        reference: NaiveDate,
    ) -> CoreResult<Vec<BudgetAlert>>
    where
        S: ExpenseStore + ?Sized,
    {
        let window = DateWindow::month_containing(reference);
        let spent = store.sum_by_category(Some(window))?;
        let alerts = Self::evaluate(settings, &spent);
        tracing::debug!(%window, alerts = alerts.len(), "evaluated budget alerts");
        Ok(alerts)
    }

    /// Every budgeted category whose spending strictly exceeds its limit, in
    /// [`Settings::budget_categories`] order. Spending in categories without a
    /// configured budget is never alerted.
    pub fn evaluate(settings: &Settings, spent: &BTreeMap<String, f64>) -> Vec<BudgetAlert> {
        settings
            .budget_categories()
            .into_iter()
            .filter_map(|category| {
                let spent = *spent.get(category)?;
                let budget = settings.budget_for(category);
                Self::category_status(category, spent, budget)
                    .over_budget
                    .then(|| BudgetAlert {
                        category: category.to_string(),
                        spent,
                        budget,
                    })
            })
            .collect()
    }
}
