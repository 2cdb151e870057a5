use std::path::PathBuf;

use exptrack_core::ExpenseService;
use exptrack_domain::{DateWindow, ExpenseEntry, ExpenseFilter};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::format_amount;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::report;

const ADD_USAGE: &str = "add <date> <category> <amount> [description]";
const FILTER_USAGE: &str = "filter <start> <end> [--category <name>] [--search <text>]";
const DELETE_USAGE: &str = "delete <id> | delete <date> <amount>";
const DELETE_MATCH_USAGE: &str = "delete-match <date> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an expense", ADD_USAGE, cmd_add),
        CommandEntry::new("list", "Show the most recent expenses", "list", cmd_list),
        CommandEntry::new(
            "filter",
            "Show expenses in a date range, optionally by category or text",
            FILTER_USAGE,
            cmd_filter,
        ),
        CommandEntry::new("delete", "Delete one expense", DELETE_USAGE, cmd_delete),
        CommandEntry::new(
            "delete-match",
            "Delete every expense with this date and amount",
            DELETE_MATCH_USAGE,
            cmd_delete_match,
        ),
        CommandEntry::new(
            "export",
            "Write all expenses to a new CSV file",
            "export [directory]",
            cmd_export,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, category, amount, description @ ..] = args else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let date = ExpenseService::parse_date(date)?;
    let description = description.join(" ");
    let id = context
        .manager
        .add_expense(date, category, amount, &description)?;

    output::success(format!("Expense #{id} added."));
    if !context.manager.settings().has_category(category) {
        output::hint(format!(
            "`{category}` is not a configured category. Use `category add {category}` to keep it."
        ));
    }
    let alerts = context.manager.budget_alerts()?;
    report::print_alerts(&alerts, false);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entries = context.manager.recent()?;
    output::section("Recent expenses");
    print_entries(&entries);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut positional = Vec::new();
    let mut category = None;
    let mut search = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--category" => category = Some(flag_value(&mut iter, "--category")?),
            "--search" => search = Some(flag_value(&mut iter, "--search")?),
            other => positional.push(other),
        }
    }
    let [start, end] = positional.as_slice() else {
        return Err(CommandError::usage(FILTER_USAGE));
    };

    let window = DateWindow::new(
        ExpenseService::parse_date(start)?,
        ExpenseService::parse_date(end)?,
    )?;
    let mut filter = ExpenseFilter::new(window);
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(search) = search {
        filter = filter.with_search(search);
    }

    let entries = context.manager.filter(&filter)?;
    output::section(format!("Expenses {window}"));
    print_entries(&entries);
    output::info(format!(
        "{} matching, {} total",
        entries.len(),
        format_amount(entries.iter().map(|entry| entry.amount).sum())
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selection = match args {
        [id] => format!("#{}", id.trim_start_matches('#')),
        [date, amount] => {
            let date = ExpenseService::parse_date(date)?;
            let amount = ExpenseService::parse_amount(amount)?;
            let prompt = format!(
                "Delete every expense on {date} for {}?",
                format_amount(amount)
            );
            if !context.confirm(&prompt)? {
                return Ok(());
            }
            format!("Date: {date}\nAmount: ${amount}")
        }
        _ => return Err(CommandError::usage(DELETE_USAGE)),
    };
    let removed = context.manager.delete_selected(&selection)?;
    report_removed(removed);
    Ok(())
}

fn cmd_delete_match(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, amount] = args else {
        return Err(CommandError::usage(DELETE_MATCH_USAGE));
    };
    let date = ExpenseService::parse_date(date)?;
    let amount = ExpenseService::parse_amount(amount)?;
    let prompt = format!(
        "Delete every expense on {date} for {}?",
        format_amount(amount)
    );
    if !context.confirm(&prompt)? {
        return Ok(());
    }
    let removed = context.manager.delete_matching(date, amount)?;
    report_removed(removed);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context.export_dir.clone(),
        [dir] => PathBuf::from(dir),
        _ => return Err(CommandError::usage("export [directory]")),
    };
    let path = context.manager.export_csv(&dir)?;
    output::success(format!("Exported expenses to {}", path.display()));
    Ok(())
}

fn flag_value<'a>(
    iter: &mut std::slice::Iter<'_, &'a str>,
    flag: &str,
) -> Result<&'a str, CommandError> {
    iter.next()
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("{flag} requires a value")))
}

fn print_entries(entries: &[ExpenseEntry]) {
    if entries.is_empty() {
        output::info("No expenses found.");
        return;
    }
    for entry in entries {
        output::plain(ExpenseService::format_entry(entry).trim_end());
    }
}

fn report_removed(removed: usize) {
    match removed {
        0 => output::warning("No matching expense found."),
        1 => output::success("Deleted 1 expense."),
        n => output::success(format!("Deleted {n} expenses.")),
    }
}
