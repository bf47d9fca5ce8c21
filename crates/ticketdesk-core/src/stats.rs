//! Group-by-count aggregates over a ticket snapshot.
//!
//! Everything here works on a plain slice so callers can chart a grid
//! that has been edited but not yet applied to the store.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Priority, Status, Ticket};

/// Tickets per priority. Always carries all three priorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriorityCounts(BTreeMap<Priority, usize>);

impl PriorityCounts {
    #[must_use]
    pub fn get(&self, priority: Priority) -> usize {
        self.0.get(&priority).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Priority, usize)> + '_ {
        self.0.iter().map(|(priority, count)| (*priority, *count))
    }
}

/// Tickets per status. Always carries all three statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<Status, usize>);

impl StatusCounts {
    #[must_use]
    pub fn get(&self, status: Status) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        self.0.iter().map(|(status, count)| (*status, *count))
    }
}

/// One bar of the status-per-month chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthStatusCount {
    /// Submission month as `YYYY-MM`.
    pub month: String,
    pub status: Status,
    pub count: usize,
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub by_status: StatusCounts,
}

impl Summary {
    #[must_use]
    pub fn open(&self) -> usize {
        self.by_status.get(Status::Open)
    }
}

/// Everything the statistics view needs in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub summary: Summary,
    pub status_per_month: Vec<MonthStatusCount>,
    pub priorities: PriorityCounts,
}

#[must_use]
pub fn count_by_status(tickets: &[Ticket], status: Status) -> usize {
    tickets.iter().filter(|t| t.status == status).count()
}

#[must_use]
pub fn count_by_priority(tickets: &[Ticket]) -> PriorityCounts {
    let mut counts: BTreeMap<Priority, usize> = Priority::ALL.iter().map(|p| (*p, 0)).collect();
    for ticket in tickets {
        *counts.entry(ticket.priority).or_default() += 1;
    }
    PriorityCounts(counts)
}

#[must_use]
pub fn status_breakdown(tickets: &[Ticket]) -> StatusCounts {
    let mut counts: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
    for ticket in tickets {
        *counts.entry(ticket.status).or_default() += 1;
    }
    StatusCounts(counts)
}

/// Counts grouped by (submission month, status), ordered by month then
/// status. Empty groups are omitted.
#[must_use]
pub fn status_per_month(tickets: &[Ticket]) -> Vec<MonthStatusCount> {
    let mut groups: BTreeMap<((i32, u32), Status), usize> = BTreeMap::new();
    for ticket in tickets {
        let month = (ticket.date_submitted.year(), ticket.date_submitted.month());
        *groups.entry((month, ticket.status)).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(((year, month), status), count)| MonthStatusCount {
            month: format!("{year:04}-{month:02}"),
            status,
            count,
        })
        .collect()
}

#[must_use]
pub fn summary(tickets: &[Ticket]) -> Summary {
    Summary {
        total: tickets.len(),
        by_status: status_breakdown(tickets),
    }
}

#[must_use]
pub fn report(tickets: &[Ticket]) -> StatsReport {
    StatsReport {
        summary: summary(tickets),
        status_per_month: status_per_month(tickets),
        priorities: count_by_priority(tickets),
    }
}
