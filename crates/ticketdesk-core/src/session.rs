//! Per-session store ownership.
//!
//! Each session gets its own [`TicketStore`], created on open and dropped on
//! close. Stores are never shared between sessions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::clock::{Clock, SystemClock};
use crate::config::SeedConfig;
use crate::error::TicketError;
use crate::store::TicketStore;

/// Opaque session identifier chosen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new("default")
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type ClockFactory = Box<dyn Fn() -> Box<dyn Clock> + Send>;

/// Owns one seeded store per open session.
pub struct SessionRegistry {
    seed: SeedConfig,
    clock: ClockFactory,
    sessions: HashMap<SessionId, TicketStore>,
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("seed", &self.seed)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Registry whose stores use the local date for new tickets.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidSeed`] when `seed` fails
    /// [`SeedConfig::validate`].
    pub fn new(seed: SeedConfig) -> Result<Self, TicketError> {
        Self::with_clock(seed, || SystemClock)
    }

    /// Registry whose stores take their clock from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidSeed`] when `seed` fails
    /// [`SeedConfig::validate`].
    pub fn with_clock<C, F>(seed: SeedConfig, clock: F) -> Result<Self, TicketError>
    where
        C: Clock + 'static,
        F: Fn() -> C + Send + 'static,
    {
        seed.validate()?;
        Ok(Self {
            seed,
            clock: Box::new(move || Box::new(clock()) as Box<dyn Clock>),
            sessions: HashMap::new(),
        })
    }

    /// Open a session, seeding a fresh store. Returns `true` when a new
    /// store was created and `false` when the session was already open.
    pub fn open(&mut self, id: &SessionId) -> bool {
        if self.sessions.contains_key(id) {
            return false;
        }
        let store = TicketStore::seeded(&self.seed, (self.clock)());
        self.sessions.insert(id.clone(), store);
        tracing::info!(session = %id, "opened session");
        true
    }

    /// # Errors
    ///
    /// Returns [`TicketError::SessionNotFound`] for an unknown id.
    pub fn get(&self, id: &SessionId) -> Result<&TicketStore, TicketError> {
        self.sessions.get(id).ok_or_else(|| not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`TicketError::SessionNotFound`] for an unknown id.
    pub fn get_mut(&mut self, id: &SessionId) -> Result<&mut TicketStore, TicketError> {
        self.sessions.get_mut(id).ok_or_else(|| not_found(id))
    }

    /// Discard a session's store.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::SessionNotFound`] for an unknown id.
    pub fn close(&mut self, id: &SessionId) -> Result<(), TicketError> {
        self.sessions.remove(id).ok_or_else(|| not_found(id))?;
        tracing::info!(session = %id, "closed session");
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn not_found(id: &SessionId) -> TicketError {
    TicketError::SessionNotFound {
        session: id.to_string(),
    }
}
