use exptrack_core::{SummaryService, DEFAULT_TREND_DAYS};
use exptrack_domain::BudgetAlert;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::{bar, format_amount, format_percent};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Total spending and per-category budget status",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "alerts",
            "Categories over budget this month",
            "alerts",
            cmd_alerts,
        ),
        CommandEntry::new(
            "trend",
            "Daily spending over recent days",
            "trend [days]",
            cmd_trend,
        ),
        CommandEntry::new(
            "distribution",
            "Share of spending per category",
            "distribution",
            cmd_distribution,
        ),
    ]
}

/// Prints alerts in the order given. `announce_clear` also reports an empty list.
pub(crate) fn print_alerts(alerts: &[BudgetAlert], announce_clear: bool) {
    if alerts.is_empty() {
        if announce_clear {
            output::success("No categories are over budget this month.");
        }
        return;
    }
    output::warning("The following categories are over budget:");
    for alert in alerts {
        output::plain(format!(
            "  {}: {} / {} (over by {})",
            alert.category,
            format_amount(alert.spent),
            format_amount(alert.budget),
            format_amount(alert.overrun())
        ));
    }
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.manager.summary()?;
    output::section("Spending summary");
    output::plain(format!("Total spending: {}", format_amount(summary.total)));
    if summary.per_category.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    for category in &summary.per_category {
        output::plain(format!(
            "  {:<16} spent {:>10}  budget {:>10}  {} {}",
            category.category,
            format_amount(category.spent),
            format_amount(category.budget),
            category.status_label(),
            format_amount(category.delta)
        ));
    }
    Ok(())
}

fn cmd_alerts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let alerts = context.manager.budget_alerts()?;
    print_alerts(&alerts, true);
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let days = match args {
        [] => DEFAULT_TREND_DAYS,
        [raw] => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a number of days"))
        })?,
        _ => return Err(CommandError::usage("trend [days]")),
    };
    let series = context.manager.trend(days)?;
    output::section(format!("Spending over the last {days} days"));
    if series.is_empty() {
        output::info("No spending in this period.");
        return Ok(());
    }
    let max = series.iter().map(|point| point.total).fold(0.0, f64::max);
    for point in &series {
        output::plain(format!(
            "  {}  {:>10}  {}",
            point.date,
            format_amount(point.total),
            bar(point.total, max)
        ));
    }
    Ok(())
}

fn cmd_distribution(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let distribution = context.manager.distribution()?;
    output::section("Spending by category");
    if distribution.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    let slices = SummaryService::distribution_shares(&distribution);
    if slices.is_empty() {
        for (category, total) in &distribution {
            output::plain(format!("  {category:<16} {:>10}", format_amount(*total)));
        }
        output::warning("Net spending is not positive; shares are unavailable.");
        return Ok(());
    }
    let max = slices.iter().map(|slice| slice.percent).fold(0.0, f64::max);
    for slice in &slices {
        output::plain(format!(
            "  {:<16} {:>10} {:>7}  {}",
            slice.category,
            format_amount(slice.total),
            format_percent(slice.percent),
            bar(slice.percent, max)
        ));
    }
    Ok(())
}
