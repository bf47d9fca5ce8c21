//! `td list`: show the ticket grid.

use clap::Args;
use std::io::{self, Write};
use ticketdesk_core::{IssueType, Priority, Status, Ticket, TicketError};

use crate::cmd::Context;
use crate::output::{self, TicketRow, pretty_section, render_list};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only tickets with this status (Open, In Progress, Closed).
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only tickets with this priority (High, Medium, Low).
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Only tickets of this issue type (Bug, Request, Requirement).
    #[arg(short = 't', long)]
    pub issue_type: Option<String>,

    /// Show at most this many tickets.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Parsed filter for the grid view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Filter {
    status: Option<Status>,
    priority: Option<Priority>,
    issue_type: Option<IssueType>,
    limit: Option<usize>,
}

impl Filter {
    fn from_args(args: &ListArgs) -> Result<Self, TicketError> {
        Ok(Self {
            status: args.status.as_deref().map(str::parse).transpose()?,
            priority: args.priority.as_deref().map(str::parse).transpose()?,
            issue_type: args.issue_type.as_deref().map(str::parse).transpose()?,
            limit: args.limit,
        })
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        self.status.is_none_or(|s| ticket.status == s)
            && self.priority.is_none_or(|p| ticket.priority == p)
            && self.issue_type.is_none_or(|k| ticket.issue_type == k)
    }

    fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets
            .iter()
            .filter(|t| self.matches(t))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Execute `td list`.
pub fn run_list(args: &ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let filter = Filter::from_args(args).map_err(|e| output::fail(ctx.output, &e))?;
    let store = ctx.open_store()?;
    let tickets = filter.apply(store.snapshot());
    tracing::debug!(shown = tickets.len(), total = store.len(), "listing tickets");

    let rows: Vec<TicketRow<'_>> = tickets.into_iter().map(TicketRow).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.output == output::OutputMode::Pretty {
        pretty_section(
            &mut out,
            &format!("Existing tickets ({} of {})", rows.len(), store.len()),
        )?;
    }
    render_list(&mut out, &rows, ctx.output)?;
    out.flush()?;
    Ok(())
}
