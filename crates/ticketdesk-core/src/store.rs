//! The per-session ticket table.
//!
//! # Ordering
//!
//! Index 0 is the most recently created ticket. The seed batch keeps the
//! order it was generated in, so its highest id sits at index 0 and ids
//! count down from there; tickets created afterwards are prepended.
//!
//! # Identity
//!
//! New ids are `TICKET-<max existing number + 1>`, which keeps ids unique
//! and increasing in creation order regardless of where the seed batch
//! started. An empty store hands out [`EMPTY_STORE_NEXT_NUMBER`] first.
//!
//! # Edits
//!
//! Only `status` and `priority` are writable after creation. Edits arrive
//! as a whole edited snapshot and are applied all-or-nothing.

use serde::Serialize;
use std::fmt;

use crate::clock::{Clock, SystemClock};
use crate::config::SeedConfig;
use crate::error::TicketError;
use crate::model::{GridEdit, NewTicket, Priority, Status, Ticket, TicketId};
use crate::seed;
use crate::stats::{self, PriorityCounts, StatsReport};

/// Id number handed out when the store holds no tickets.
pub const EMPTY_STORE_NEXT_NUMBER: u64 = 1000;

/// Outcome of [`TicketStore::apply_edits`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditReport {
    /// Ids whose status or priority changed, in snapshot order.
    pub changed: Vec<TicketId>,
}

impl EditReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

pub struct TicketStore {
    tickets: Vec<Ticket>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for TicketStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketStore")
            .field("tickets", &self.tickets.len())
            .finish_non_exhaustive()
    }
}

impl TicketStore {
    /// A store with no tickets, stamping new tickets with the local date.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_clock(SystemClock)
    }

    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tickets: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// Start a session with the default seed batch drawn from `seed`.
    #[must_use]
    pub fn initialize(seed: u64) -> Self {
        // `with_seed` keeps the default batch shape, which always validates.
        Self::seeded(&SeedConfig::with_seed(seed), SystemClock)
    }

    /// Start a session with a seed batch described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidSeed`] when `config` fails
    /// [`SeedConfig::validate`].
    pub fn from_config(config: &SeedConfig) -> Result<Self, TicketError> {
        Self::from_config_with_clock(config, SystemClock)
    }

    /// # Errors
    ///
    /// Returns [`TicketError::InvalidSeed`] when `config` fails
    /// [`SeedConfig::validate`].
    pub fn from_config_with_clock(
        config: &SeedConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, TicketError> {
        config.validate()?;
        Ok(Self::seeded(config, clock))
    }

    /// Seed from a config that has already passed [`SeedConfig::validate`].
    pub(crate) fn seeded(config: &SeedConfig, clock: impl Clock + 'static) -> Self {
        let tickets = seed::generate(config);
        tracing::info!(seed = config.seed, tickets = tickets.len(), "initialized ticket store");
        Self {
            tickets,
            clock: Box::new(clock),
        }
    }

    /// Create a ticket from the form fields and put it at index 0.
    ///
    /// New tickets always start [`Status::Open`] and are dated by the
    /// store's clock.
    pub fn create(&mut self, new: NewTicket) -> Ticket {
        let number = self.next_number();
        let ticket = Ticket {
            id: TicketId::from_number(number),
            issue_type: new.issue_type,
            issue: new.issue,
            status: Status::Open,
            priority: new.priority,
            date_submitted: self.clock.today(),
            attachment: new.attachment,
        };

        tracing::debug!(
            id = %ticket.id,
            issue_type = %ticket.issue_type,
            priority = %ticket.priority,
            "created ticket"
        );
        self.tickets.insert(0, ticket.clone());
        ticket
    }

    /// Current tickets, most recent first.
    #[must_use]
    pub fn snapshot(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Write back status and priority from an edited copy of the snapshot.
    ///
    /// `edited` must list the same ids in the same positions as the store.
    /// Differences in any other column are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Consistency`] when the length or id sequence
    /// diverges; the store is left untouched in that case.
    pub fn apply_edits(&mut self, edited: &[Ticket]) -> Result<EditReport, TicketError> {
        self.check_alignment(edited)?;

        let mut report = EditReport::default();
        for (current, edit) in self.tickets.iter_mut().zip(edited) {
            if read_only_changed(current, edit) {
                tracing::warn!(id = %current.id, "ignoring edits to read-only ticket fields");
            }
            if current.status == edit.status && current.priority == edit.priority {
                continue;
            }
            tracing::debug!(
                id = %current.id,
                from_status = %current.status,
                to_status = %edit.status,
                from_priority = %current.priority,
                to_priority = %edit.priority,
                "applying ticket edit"
            );
            current.status = edit.status;
            current.priority = edit.priority;
            report.changed.push(current.id.clone());
        }

        Ok(report)
    }

    /// Validate raw grid rows, then apply them like [`Self::apply_edits`].
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Validation`] when any status or priority is
    /// outside its option list, or [`TicketError::Consistency`] when the
    /// rows do not line up with the store. Nothing is written on error.
    pub fn apply_grid_edits(&mut self, rows: &[GridEdit]) -> Result<EditReport, TicketError> {
        let parsed = rows
            .iter()
            .map(|row| Ok((row.status.parse::<Status>()?, row.priority.parse::<Priority>()?)))
            .collect::<Result<Vec<_>, TicketError>>()?;
        if rows.len() != self.tickets.len() {
            return Err(length_mismatch(self.tickets.len(), rows.len()));
        }

        let edited: Vec<Ticket> = self
            .tickets
            .iter()
            .zip(rows)
            .zip(parsed)
            .map(|((current, row), (status, priority))| Ticket {
                id: row.id.clone(),
                status,
                priority,
                ..current.clone()
            })
            .collect();
        self.apply_edits(&edited)
    }

    #[must_use]
    pub fn count_by_status(&self, status: Status) -> usize {
        stats::count_by_status(&self.tickets, status)
    }

    #[must_use]
    pub fn count_by_priority(&self) -> PriorityCounts {
        stats::count_by_priority(&self.tickets)
    }

    #[must_use]
    pub fn stats(&self) -> StatsReport {
        stats::report(&self.tickets)
    }

    fn next_number(&self) -> u64 {
        self.tickets
            .iter()
            .filter_map(|t| t.id.number())
            .max()
            .map_or(EMPTY_STORE_NEXT_NUMBER, |max| max.saturating_add(1))
    }

    fn check_alignment(&self, edited: &[Ticket]) -> Result<(), TicketError> {
        if edited.len() != self.tickets.len() {
            return Err(length_mismatch(self.tickets.len(), edited.len()));
        }

        if let Some((index, (current, edit))) = self
            .tickets
            .iter()
            .zip(edited)
            .enumerate()
            .find(|(_, (current, edit))| current.id != edit.id)
        {
            return Err(TicketError::Consistency {
                reason: format!(
                    "position {index} holds {} but the store has {}",
                    edit.id, current.id
                ),
            });
        }

        Ok(())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn length_mismatch(expected: usize, got: usize) -> TicketError {
    TicketError::Consistency {
        reason: format!("expected {expected} tickets, got {got}"),
    }
}

fn read_only_changed(current: &Ticket, edit: &Ticket) -> bool {
    current.date_submitted != edit.date_submitted
        || current.attachment != edit.attachment
        || current.issue_type != edit.issue_type
        || current.issue != edit.issue
}
