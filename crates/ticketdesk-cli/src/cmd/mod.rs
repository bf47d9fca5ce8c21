pub mod completions;
pub mod create;
pub mod list;
pub mod schema;
pub mod session;
pub mod stats;

use ticketdesk_core::TicketStore;
use ticketdesk_core::config::SeedConfig;

use crate::output::{self, OutputMode};

/// Settings shared by every command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub seed: SeedConfig,
    pub output: OutputMode,
}

impl Context {
    /// Fresh seeded store for a one-shot command. Each invocation is its
    /// own session. A seed batch that fails validation is rendered in the
    /// current output mode before the error is returned.
    pub fn open_store(&self) -> anyhow::Result<TicketStore> {
        TicketStore::from_config(&self.seed).map_err(|e| output::fail(self.output, &e))
    }
}
