//! `td stats`: ticket reporting view.

use clap::Args;
use std::io::Write;
use ticketdesk_core::stats::StatsReport;

use crate::cmd::Context;
use crate::output::render_mode;

/// Arguments for `td stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `td stats`.
pub fn run_stats(_args: &StatsArgs, ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let report = store.stats();
    tracing::debug!(
        total = report.summary.total,
        months = report.status_per_month.len(),
        "computed ticket stats"
    );

    render_mode(ctx.output, &report, render_stats_text, render_stats_human)
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "section\tkey\tstatus\tcount")?;
    writeln!(w, "summary\ttotal\t-\t{}", report.summary.total)?;
    for (status, count) in report.summary.by_status.iter() {
        writeln!(w, "summary\tstatus\t{status}\t{count}")?;
    }
    for bar in &report.status_per_month {
        writeln!(w, "month\t{}\t{}\t{}", bar.month, bar.status, bar.count)?;
    }
    for (priority, count) in report.priorities.iter() {
        writeln!(w, "priority\t{priority}\t-\t{count}")?;
    }
    Ok(())
}

fn render_stats_human(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Ticket statistics")?;

    writeln!(w, "\nNumber of tickets: {}", report.summary.total)?;
    writeln!(w, "Number of open tickets: {}", report.summary.open())?;

    writeln!(w, "\nTicket status per month:")?;
    if report.status_per_month.is_empty() {
        writeln!(w, "  (no tickets)")?;
    }
    let mut last_month = "";
    for bar in &report.status_per_month {
        if bar.month != last_month {
            writeln!(w, "  {}", bar.month)?;
            last_month = bar.month.as_str();
        }
        writeln!(w, "    {:<12} {}", bar.status.as_str(), bar.count)?;
    }

    writeln!(w, "\nCurrent ticket priorities:")?;
    for (priority, count) in report.priorities.iter() {
        writeln!(w, "  {:<7} {count}", priority.as_str())?;
    }

    Ok(())
}
