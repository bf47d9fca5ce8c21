//! `td session`: JSON-lines request loop over a session registry.
//!
//! Each stdin line is one request object with an `op` field and an optional
//! `session` (default `"default"`). Each request gets exactly one response
//! line on stdout:
//!
//! ```text
//! {"op":"open","session":"s1"}
//! {"ok":true,"session":"s1","opened":true,"ticket_count":100}
//! ```
//!
//! Failures answer `{"ok":false,"error":{...}}` and the loop keeps going.

use clap::Args;
use serde::Deserialize;
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use ticketdesk_core::{
    AttachmentName, ErrorCode, GridEdit, NewTicket, SessionId, SessionRegistry, Status,
    TicketError, schema,
};

use crate::cmd::Context;
use crate::output::{self, CliError};

#[derive(Args, Debug, Default)]
pub struct SessionArgs {}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    session: SessionId,
    #[serde(flatten)]
    request: Request,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    Open,
    Create {
        issue_type: String,
        #[serde(default)]
        issue: String,
        priority: String,
        #[serde(default)]
        attachment: Option<String>,
    },
    Snapshot,
    ApplyEdits {
        tickets: Vec<GridEdit>,
    },
    CountByStatus {
        status: String,
    },
    CountByPriority,
    Stats,
    Schema,
    Close,
}

/// Execute `td session`.
pub fn run_session(_args: &SessionArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut registry =
        SessionRegistry::new(ctx.seed.clone()).map_err(|e| output::fail(ctx.output, &e))?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), &mut registry)
}

/// Answer every request line from `reader` until EOF.
///
/// # Errors
///
/// Only I/O failures on `reader` or `writer` end the loop early. A line that
/// is not valid UTF-8 gets a malformed-request response like any other bad
/// line.
pub fn serve(
    mut reader: impl BufRead,
    mut writer: impl Write,
    registry: &mut SessionRegistry,
) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() {
                    continue;
                }
                respond(registry, line)
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejecting request line that is not UTF-8");
                failure(&malformed(err))
            }
        };
        serde_json::to_writer(&mut writer, &response)?;
        writeln!(writer)?;
        writer.flush()?;
    }
    tracing::debug!(open_sessions = registry.len(), "session input closed");
    Ok(())
}

fn respond(registry: &mut SessionRegistry, line: &str) -> Value {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(error = %err, "rejecting malformed request");
            return failure(&malformed(err));
        }
    };

    let session = envelope.session;
    match handle(registry, &session, envelope.request) {
        Ok(Value::Object(mut body)) => {
            body.insert("ok".into(), Value::Bool(true));
            body.insert("session".into(), Value::String(session.to_string()));
            Value::Object(body)
        }
        Ok(other) => json!({ "ok": true, "session": session, "result": other }),
        Err(err) => {
            tracing::debug!(session = %session, error = %err, "request failed");
            failure(&CliError::from(&err))
        }
    }
}

fn malformed(err: impl std::fmt::Display) -> CliError {
    let code = ErrorCode::MalformedRequest;
    CliError::with_details(
        format!("{}: {err}", code.message()),
        code.hint().unwrap_or_default(),
        code.code(),
    )
}

fn failure(error: &CliError) -> Value {
    json!({ "ok": false, "error": error })
}

fn handle(
    registry: &mut SessionRegistry,
    id: &SessionId,
    request: Request,
) -> Result<Value, TicketError> {
    let body = match request {
        Request::Open => {
            let opened = registry.open(id);
            json!({ "opened": opened, "ticket_count": registry.get(id)?.len() })
        }
        Request::Create {
            issue_type,
            issue,
            priority,
            attachment,
        } => {
            let store = registry.get_mut(id)?;
            let mut new = NewTicket::new(issue_type.parse()?, issue, priority.parse()?);
            if let Some(name) = attachment.as_deref() {
                new = new.with_attachment(AttachmentName::parse(name)?);
            }
            let ticket = store.create(new);
            json!({ "ticket": ticket, "ticket_count": store.len() })
        }
        Request::Snapshot => json!({ "tickets": registry.get(id)?.snapshot() }),
        Request::ApplyEdits { tickets } => {
            let report = registry.get_mut(id)?.apply_grid_edits(&tickets)?;
            json!({ "changed": report.changed })
        }
        Request::CountByStatus { status } => {
            let store = registry.get(id)?;
            let status: Status = status.parse()?;
            json!({ "status": status, "count": store.count_by_status(status) })
        }
        Request::CountByPriority => json!({ "counts": registry.get(id)?.count_by_priority() }),
        Request::Stats => json!({ "stats": registry.get(id)?.stats() }),
        Request::Schema => json!({ "schema": schema::schema() }),
        Request::Close => {
            registry.close(id)?;
            json!({ "closed": true })
        }
    };
    Ok(body)
}
