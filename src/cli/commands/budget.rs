use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::format_amount;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::report;

const BUDGET_USAGE: &str = "budget <category> <amount> [<category> <amount> ...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Set monthly budgets and save them",
            BUDGET_USAGE,
            cmd_budget,
        ),
        CommandEntry::new("budgets", "Show monthly budgets", "budgets", cmd_budgets),
        CommandEntry::new(
            "categories",
            "Show configured categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "category",
            "Add a category to the configured list",
            "category add <name>",
            cmd_category,
        ),
    ]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(CommandError::usage(BUDGET_USAGE));
    }
    let updates: Vec<(&str, &str)> = args.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    let alerts = context.manager.set_budgets(&updates)?;
    output::success("Budgets saved.");
    report::print_alerts(&alerts, false);
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let settings = context.manager.settings();
    output::section("Monthly budgets");
    let categories = settings.budget_categories();
    if categories.is_empty() {
        output::info("No budgets configured.");
    }
    for category in categories {
        output::plain(format!(
            "  {category:<16} {:>10}",
            format_amount(settings.budget_for(category))
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for category in &context.manager.settings().categories {
        output::plain(format!("  {category}"));
    }
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args {
        [action, rest @ ..] if action.eq_ignore_ascii_case("add") && !rest.is_empty() => {
            rest.join(" ")
        }
        _ => return Err(CommandError::usage("category add <name>")),
    };
    if context.manager.add_category(&name)? {
        output::success(format!("Category `{}` added.", name.trim()));
    } else {
        output::warning(format!("Category `{}` already exists.", name.trim()));
    }
    Ok(())
}
