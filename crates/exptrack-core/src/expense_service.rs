//! Parsing and display helpers for the add/delete expense flows.

use chrono::NaiveDate;
use exptrack_domain::{ExpenseEntry, DATE_FORMAT};

use crate::{CoreError, CoreResult};

const SEPARATOR_WIDTH: usize = 40;
const INVALID_AMOUNT: &str = "Please enter a valid amount";
const INVALID_SELECTION: &str = "Please select an expense to delete";

/// Identity recovered from a selected entry block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Id(i64),
    /// Legacy selections carry no id; they address every entry sharing the pair.
    DateAmount { date: NaiveDate, amount: f64 },
}

pub struct ExpenseService;

impl ExpenseService {
    /// Parses a user-typed amount. A leading `$` is tolerated; the sign is not checked.
    pub fn parse_amount(text: &str) -> CoreResult<f64> {
        parse_money(text).ok_or_else(|| CoreError::Validation(INVALID_AMOUNT.into()))
    }

    /// Budgets are non-negative limits; a negative value is rejected like text.
    pub fn parse_budget(category: &str, text: &str) -> CoreResult<f64> {
        parse_money(text)
            .filter(|limit| *limit >= 0.0)
            .ok_or_else(|| CoreError::Validation(format!("Invalid budget value for {category}")))
    }

    pub fn parse_date(text: &str) -> CoreResult<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
            CoreError::Validation(format!(
                "Invalid date `{}`; expected YYYY-MM-DD",
                text.trim()
            ))
        })
    }

    /// Renders the entry block shown in listings; [`Self::parse_selection`] reads it back.
    pub fn format_entry(entry: &ExpenseEntry) -> String {
        format!(
            "#{id}\nDate: {date}\nCategory: {category}\nAmount: ${amount:.2}\nDescription: {description}\n{separator}\n",
            id = entry.id,
            date = entry.display_date(),
            category = entry.category,
            amount = entry.amount,
            description = entry.description,
            separator = "-".repeat(SEPARATOR_WIDTH),
        )
    }

    /// Recovers which entry a selected block refers to.
    ///
    /// An `#<id>` line wins. Without one, the `Date:` and `Amount: $` lines are
    /// used, matching blocks rendered before ids were displayed.
    pub fn parse_selection(text: &str) -> CoreResult<Selection> {
        let mut date = None;
        let mut amount = None;
        for line in text.lines().map(str::trim) {
            if let Some(raw) = line.strip_prefix('#') {
                if let Ok(id) = raw.trim().parse::<i64>() {
                    return Ok(Selection::Id(id));
                }
            } else if let Some(raw) = line.strip_prefix("Date:") {
                date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok();
            } else if let Some(raw) = line.strip_prefix("Amount:") {
                amount = raw
                    .split_once('$')
                    .and_then(|(_, value)| value.trim().parse::<f64>().ok());
            }
        }
        match (date, amount) {
            (Some(date), Some(amount)) => Ok(Selection::DateAmount { date, amount }),
            _ => Err(CoreError::InvalidSelection(INVALID_SELECTION.into())),
        }
    }
}

fn parse_money(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exptrack_domain::NewExpense;

    fn sample() -> ExpenseEntry {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        NewExpense::new(date, "Food", 42.5)
            .with_description("lunch")
            .into_entry(7, date.and_hms_opt(9, 30, 0).unwrap())
    }

    #[test]
    fn amounts_accept_dollar_prefix_and_negatives() {
        assert_eq!(ExpenseService::parse_amount(" $12.50 ").unwrap(), 12.5);
        assert_eq!(ExpenseService::parse_amount("-3").unwrap(), -3.0);
        assert_eq!(ExpenseService::parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn amounts_reject_text_and_non_finite_values() {
        for raw in ["", "abc", "12,50", "NaN", "inf"] {
            let err = ExpenseService::parse_amount(raw).unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid amount", "input {raw:?}");
        }
    }

    #[test]
    fn budget_errors_name_the_category() {
        let err = ExpenseService::parse_budget("Food", "lots").unwrap_err();
        assert_eq!(err.to_string(), "Invalid budget value for Food");
    }

    #[test]
    fn negative_budgets_are_rejected() {
        let err = ExpenseService::parse_budget("Food", "-100").unwrap_err();
        assert_eq!(err.to_string(), "Invalid budget value for Food");
        assert_eq!(ExpenseService::parse_budget("Food", "0").unwrap(), 0.0);
        assert_eq!(ExpenseService::parse_budget("Food", "$250").unwrap(), 250.0);
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(ExpenseService::parse_date("2024-03-01").is_ok());
        assert!(matches!(
            ExpenseService::parse_date("03/01/2024"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn formatted_block_round_trips_through_selection() {
        let block = ExpenseService::format_entry(&sample());
        assert!(block.contains("Amount: $42.50"));
        assert_eq!(ExpenseService::parse_selection(&block).unwrap(), Selection::Id(7));
    }

    #[test]
    fn legacy_block_selects_by_date_and_amount() {
        let block = "Date: 2024-03-01\nCategory: Food\nAmount: $42.50\nDescription: lunch\n";
        let selection = ExpenseService::parse_selection(block).unwrap();
        assert_eq!(
            selection,
            Selection::DateAmount {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                amount: 42.5,
            }
        );
    }

    #[test]
    fn partial_selection_is_rejected() {
        for text in ["", "Category: Food", "Date: 2024-03-01\nCategory: Food"] {
            let err = ExpenseService::parse_selection(text).unwrap_err();
            assert!(matches!(err, CoreError::InvalidSelection(_)));
        }
    }
}
