#![forbid(unsafe_code)]

//! ticketdesk-core library.
//!
//! # Conventions
//!
//! - **Errors**: store operations return [`error::TicketError`]; config
//!   loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;

pub use error::{ErrorCode, TicketError};
pub use model::{AttachmentName, GridEdit, IssueType, NewTicket, Priority, Status, Ticket, TicketId};
pub use session::{SessionId, SessionRegistry};
pub use store::{EditReport, TicketStore};
