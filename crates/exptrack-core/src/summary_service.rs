//! Aggregation helpers for spending summaries and category distributions.

use std::collections::BTreeMap;

use exptrack_domain::{DateWindow, DistributionSlice, Settings, SpendingSummary};

use crate::{BudgetService, CoreResult, ExpenseStore};

/// Aggregates ledger totals into the numbers the summary views render.
pub struct SummaryService;

impl SummaryService {
    /// Totals for `window` (all time when `None`) with a budget comparison per
    /// category that has recorded spending. Budgeted categories without
    /// spending are not listed.
    pub fn summary<S>(
        store: &S,
        settings: &Settings,
        window: Option<DateWindow>,
    ) -> CoreResult<SpendingSummary>
    where
        S: ExpenseStore + ?Sized,
    {
        let total = store.sum_total(window)?;
        let per_category = store
            .sum_by_category(window)?
            .into_iter()
            .map(|(category, spent)| {
                let budget = settings.budget_for(&category);
                BudgetService::category_status(category, spent, budget)
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            total,
            categories = per_category.len(),
            "summarized spending"
        );
        Ok(SpendingSummary {
            total,
            per_category,
        })
    }

    /// Category totals for a proportional view. Zero totals are dropped.
    pub fn category_distribution<S>(
        store: &S,
        window: Option<DateWindow>,
    ) -> CoreResult<BTreeMap<String, f64>>
    where
        S: ExpenseStore + ?Sized,
    {
        let mut totals = store.sum_by_category(window)?;
        totals.retain(|_, total| *total != 0.0);
        Ok(totals)
    }

    /// Converts a distribution into percentage slices. Nothing is emitted when
    /// the grand total is not positive, since no meaningful proportion exists.
    pub fn distribution_shares(distribution: &BTreeMap<String, f64>) -> Vec<DistributionSlice> {
        let grand_total: f64 = distribution.values().sum();
        if grand_total <= 0.0 {
            return Vec::new();
        }
        distribution
            .iter()
            .map(|(category, total)| DistributionSlice {
                category: category.clone(),
                total: *total,
                percent: total / grand_total * 100.0,
            })
            .collect()
    }
}
