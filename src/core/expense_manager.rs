use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use exptrack_config::SettingsManager;
use exptrack_core::{
    BudgetService, Clock, CoreError, ExpenseService, ExpenseStore, Selection, SummaryService,
    TrendService,
};
use exptrack_domain::{
    BudgetAlert, DailyTotal, ExpenseEntry, ExpenseFilter, NewExpense, Settings,
    SpendingSummary,
};
use exptrack_storage_sqlite::SqliteExpenseStore;

use crate::core::utils::PathResolver;
use crate::errors::Result;
use crate::utils::export;

/// Owns the ledger, the loaded settings and the clock, and exposes one method
/// per user gesture. Nothing here touches the terminal.
pub struct ExpenseManager {
    store: Box<dyn ExpenseStore>,
    settings: Settings,
    settings_manager: SettingsManager,
    clock: Box<dyn Clock>,
}

impl ExpenseManager {
    /// Loads settings (writing the default document if absent) and wraps `store`.
    pub fn new(
        store: Box<dyn ExpenseStore>,
        settings_manager: SettingsManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let settings = settings_manager.load()?;
        Ok(Self {
            store,
            settings,
            settings_manager,
            clock,
        })
    }

    /// Opens the SQLite ledger and settings document under `paths`.
    pub fn open(paths: &PathResolver, clock: Box<dyn Clock>) -> Result<Self> {
        let store = SqliteExpenseStore::open(paths.database_path())?;
        let settings_manager = SettingsManager::new(paths.settings_path());
        Self::new(Box::new(store), settings_manager, clock)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn ExpenseStore {
        self.store.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates `amount_text` and records the expense. Nothing is written on failure.
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: &str,
        amount_text: &str,
        description: &str,
    ) -> Result<i64> {
        let amount = ExpenseService::parse_amount(amount_text)?;
        if amount <= 0.0 {
            tracing::warn!(amount, category, "recording a non-positive expense amount");
        }
        let expense = NewExpense::new(date, category, amount).with_description(description);
        let id = self.store.insert(expense)?;
        tracing::info!(id, %date, category, "expense added");
        Ok(id)
    }

    /// The newest entries, capped at [`exptrack_domain::RECENT_LIMIT`].
    pub fn recent(&self) -> Result<Vec<ExpenseEntry>> {
        Ok(self.store.query(None)?)
    }

    pub fn filter(&self, filter: &ExpenseFilter) -> Result<Vec<ExpenseEntry>> {
        Ok(self.store.query(Some(filter))?)
    }

    /// Deletes the entry identified by a display block (or an `#<id>` line).
    ///
    /// Blocks without an id fall back to date-and-amount matching, which
    /// removes every entry sharing that pair.
    pub fn delete_selected(&mut self, selection_text: &str) -> Result<usize> {
        let removed = match ExpenseService::parse_selection(selection_text)? {
            Selection::Id(id) => usize::from(self.store.delete(id)?),
            Selection::DateAmount { date, amount } => self.delete_matching(date, amount)?,
        };
        tracing::info!(removed, "deleted selected expense");
        Ok(removed)
    }

    /// Removes every entry with this exact date and amount.
    pub fn delete_matching(&mut self, date: NaiveDate, amount: f64) -> Result<usize> {
        Ok(self.store.delete_matching(date, amount)?)
    }

    /// All-time totals compared with the configured budgets.
    pub fn summary(&self) -> Result<SpendingSummary> {
        Ok(SummaryService::summary(
            self.store.as_ref(),
            &self.settings,
            None,
        )?)
    }

    /// Over-budget categories for the current calendar month.
    pub fn budget_alerts(&self) -> Result<Vec<BudgetAlert>> {
        Ok(BudgetService::budget_alerts(
            self.store.as_ref(),
            &self.settings,
            self.clock.today(),
        )?)
    }

    /// Daily totals for the `days` days ending today.
    pub fn trend(&self, days: u32) -> Result<Vec<DailyTotal>> {
        Ok(TrendService::trend(
            self.store.as_ref(),
            self.clock.today(),
            days,
        )?)
    }

    pub fn distribution(&self) -> Result<BTreeMap<String, f64>> {
        Ok(SummaryService::category_distribution(
            self.store.as_ref(),
            None,
        )?)
    }

    /// Applies budget edits all-or-nothing, persists them and returns the
    /// alerts recomputed against the new limits.
    pub fn set_budgets(&mut self, updates: &[(&str, &str)]) -> Result<Vec<BudgetAlert>> {
        let parsed = updates
            .iter()
            .map(|(category, text)| {
                ExpenseService::parse_budget(category, text).map(|limit| (*category, limit))
            })
            .collect::<std::result::Result<Vec<_>, CoreError>>()?;

        let mut next = self.settings.clone();
        for (category, limit) in parsed {
            next.set_budget(category, limit);
        }
        self.settings_manager.save(&next)?;
        self.settings = next;
        tracing::info!(updated = updates.len(), "budgets saved");
        self.budget_alerts()
    }

    /// Adds `name` to the category list. Returns `false` when it already exists.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Category name cannot be empty".into()).into());
        }
        Ok(self.settings.add_category(name))
    }

    /// Writes every entry, newest first, to a fresh CSV file in `dir`.
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf> {
        let entries = self.store.all_entries()?;
        export::write_csv(dir, self.clock.now(), &entries)
    }

    /// Persists the in-memory settings.
    pub fn shutdown(&self) -> Result<()> {
        self.settings_manager.save(&self.settings)?;
        tracing::info!(path = %self.settings_manager.path().display(), "settings saved");
        Ok(())
    }
}
