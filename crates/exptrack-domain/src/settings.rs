//! User-editable category list and monthly budget limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_BUDGETS: [(&str, f64); 7] = [
    ("Food", 500.0),
    ("Transport", 200.0),
    ("Bills", 1000.0),
    ("Entertainment", 300.0),
    ("Shopping", 400.0),
    ("Health", 200.0),
    ("Other", 300.0),
];

/// Category names offered for new entries plus the monthly budget of each.
///
/// The two collections are allowed to disagree: a category without a budget
/// reads as a zero budget, and a budget without a listed category is still
/// honored by alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub budgets: BTreeMap<String, f64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budgets: DEFAULT_BUDGETS
                .iter()
                .map(|(name, limit)| ((*name).to_string(), *limit))
                .collect(),
            categories: DEFAULT_BUDGETS
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn budget_for(&self, category: &str) -> f64 {
        self.budgets.get(category).copied().unwrap_or(0.0)
    }

    pub fn set_budget(&mut self, category: impl Into<String>, limit: f64) {
        self.budgets.insert(category.into(), limit);
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|name| name == category)
    }

    /// Appends `category` if missing and seeds a zero budget. Returns `false` when already present.
    pub fn add_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.has_category(&category) {
            return false;
        }
        self.budgets.entry(category.clone()).or_insert(0.0);
        self.categories.push(category);
        true
    }

    /// Budgeted categories in display order: listed categories first, then
    /// budget-only keys in lexical order. Each name appears once even when a
    /// hand-edited document lists it twice.
    pub fn budget_categories(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = Vec::new();
        for name in &self.categories {
            if self.budgets.contains_key(name) && !ordered.contains(&name.as_str()) {
                ordered.push(name.as_str());
            }
        }
        for name in self.budgets.keys() {
            if !self.has_category(name) {
                ordered.push(name.as_str());
            }
        }
        ordered
    }
}
