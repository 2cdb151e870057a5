//! Dispatch, error reporting and argument helpers shared by the command handlers.

use dialoguer::Confirm;
use exptrack_core::CoreError;
use exptrack_domain::DateWindowError;

use crate::errors::{CliError, TrackerError};

use super::commands::report;
use super::output;
use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Tracker(TrackerError::Core(err))
    }
}

impl From<DateWindowError> for CommandError {
    fn from(err: DateWindowError) -> Self {
        CommandError::from(CoreError::from(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Tracker(inner) => CliError::Tracker(inner),
            other => CliError::Input(other.to_string()),
        }
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenises and runs one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    /// Prints this month's over-budget categories, if any, when the shell opens.
    pub(crate) fn announce_alerts(&self) {
        match self.manager.budget_alerts() {
            Ok(alerts) => report::print_alerts(&alerts, false),
            Err(err) => self.report_error(err.into()),
        }
    }

    /// Asks before destructive actions; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Tracker(TrackerError::Core(CoreError::Storage(message))) => {
                tracing::error!(%message, "ledger operation failed");
                output::error(format!("Storage error: {message}"));
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use exptrack_config::SettingsManager;
    use exptrack_core::{ExpenseStore, FixedClock, InMemoryExpenseStore};
    use tempfile::TempDir;

    use super::*;
    use crate::core::ExpenseManager;

    fn script_context(today: NaiveDate) -> (ShellContext, TempDir) {
        let dir = TempDir::new().unwrap();
        let manager = ExpenseManager::new(
            Box::new(InMemoryExpenseStore::new()),
            SettingsManager::in_dir(dir.path()),
            Box::new(FixedClock(today.and_hms_opt(9, 0, 0).unwrap())),
        )
        .unwrap();
        let context = ShellContext::with_manager(CliMode::Script, manager, dir.path().to_path_buf());
        (context, dir)
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn run(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
        context.process_line(line)
    }

    #[test]
    fn add_records_quoted_description() {
        let (mut context, _dir) = script_context(june(15));
        run(&mut context, r#"add 2024-06-02 Food 12.50 "team lunch""#).unwrap();
        let entries = context.manager.recent().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "team lunch");
        assert_eq!(entries[0].amount, 12.5);
    }

    #[test]
    fn add_with_bad_amount_is_a_validation_error() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "add 2024-06-02 Food abc").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid amount");
        assert_eq!(context.manager.store().count().unwrap(), 0);
    }

    #[test]
    fn missing_arguments_report_usage() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "add 2024-06-02").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn delete_by_id_keeps_twins() {
        let (mut context, _dir) = script_context(june(15));
        run(&mut context, "add 2024-06-02 Food 12").unwrap();
        run(&mut context, "add 2024-06-02 Bills 12").unwrap();
        run(&mut context, "delete 1").unwrap();
        let left = context.manager.recent().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].category, "Bills");
    }

    #[test]
    fn delete_by_date_and_amount_validates_before_deleting() {
        let (mut context, _dir) = script_context(june(15));
        run(&mut context, "add 2024-06-02 Food 12").unwrap();

        let err = run(&mut context, "delete 2024-06-31 12").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Tracker(TrackerError::Core(CoreError::Validation(_)))
        ));
        let err = run(&mut context, "delete 2024-06-02 twelve").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid amount");
        assert_eq!(context.manager.store().count().unwrap(), 1);

        run(&mut context, "delete 2024-06-02 $12").unwrap();
        assert_eq!(context.manager.store().count().unwrap(), 0);
    }

    #[test]
    fn delete_match_removes_all_twins() {
        let (mut context, _dir) = script_context(june(15));
        run(&mut context, "add 2024-06-02 Food 12").unwrap();
        run(&mut context, "add 2024-06-02 Bills 12").unwrap();
        run(&mut context, "delete-match 2024-06-02 12").unwrap();
        assert_eq!(context.manager.store().count().unwrap(), 0);
    }

    #[test]
    fn filter_rejects_reversed_window() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "filter 2024-06-30 2024-06-01").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Tracker(TrackerError::Core(CoreError::InvalidWindow(_)))
        ));
    }

    #[test]
    fn filter_flag_without_value_is_rejected() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "filter 2024-06-01 2024-06-30 --category").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn budget_with_invalid_value_changes_nothing() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "budget Food 600 Transport nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid budget value for Transport");
        assert_eq!(context.manager.settings().budget_for("Food"), 500.0);
    }

    #[test]
    fn budget_requires_pairs() {
        let (mut context, _dir) = script_context(june(15));
        let err = run(&mut context, "budget Food").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn category_add_extends_list() {
        let (mut context, _dir) = script_context(june(15));
        run(&mut context, "category add Pet Care").unwrap();
        assert!(context.manager.settings().has_category("Pet Care"));
    }

    #[test]
    fn trend_rejects_non_numeric_days() {
        let (mut context, _dir) = script_context(june(15));
        assert!(run(&mut context, "trend soon").is_err());
        assert!(run(&mut context, "trend 7").is_ok());
    }

    #[test]
    fn unknown_command_continues_and_exit_stops() {
        let (mut context, _dir) = script_context(june(15));
        assert_eq!(run(&mut context, "sumary").unwrap(), LoopControl::Continue);
        assert_eq!(run(&mut context, "EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn unbalanced_quotes_are_reported_not_fatal() {
        let (mut context, _dir) = script_context(june(15));
        assert_eq!(
            run(&mut context, r#"add 2024-06-02 Food 1 "oops"#).unwrap(),
            LoopControl::Continue
        );
        assert_eq!(context.manager.store().count().unwrap(), 0);
    }

    #[test]
    fn registry_suggests_close_names() {
        let (context, _dir) = script_context(june(15));
        assert_eq!(context.registry.suggest("sumary"), Some("summary"));
        assert_eq!(context.registry.suggest("xyzzyxyzzy"), None);
    }

    #[test]
    fn reports_run_on_empty_ledger() {
        let (mut context, _dir) = script_context(june(15));
        for line in ["list", "summary", "alerts", "trend", "distribution", "budgets", "categories", "help", "help add", "version"] {
            assert_eq!(run(&mut context, line).unwrap(), LoopControl::Continue, "{line}");
        }
    }
}
