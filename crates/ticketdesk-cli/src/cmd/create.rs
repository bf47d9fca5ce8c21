//! `td create`: submit a ticket through the creation form.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use ticketdesk_core::{AttachmentName, NewTicket, Ticket, TicketError};

use crate::cmd::Context;
use crate::output::{self, Renderable, TicketRow, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue type: Bug, Request, or Requirement.
    #[arg(short = 't', long, default_value = "Bug")]
    pub issue_type: String,

    /// Description of the issue.
    #[arg(short, long, default_value = "")]
    pub issue: String,

    /// Priority: High, Medium, or Low.
    #[arg(short, long, default_value = "High")]
    pub priority: String,

    /// File name of an attachment (pdf, docx, png, jpg, jpeg). Only the
    /// name is recorded.
    #[arg(short, long)]
    pub attachment: Option<String>,
}

impl CreateArgs {
    fn to_new_ticket(&self) -> Result<NewTicket, TicketError> {
        let mut new = NewTicket::new(
            self.issue_type.parse()?,
            self.issue.clone(),
            self.priority.parse()?,
        );
        if let Some(name) = &self.attachment {
            new = new.with_attachment(AttachmentName::parse(name)?);
        }
        Ok(new)
    }
}

#[derive(Debug, Serialize)]
struct Created {
    ticket: Ticket,
    ticket_count: usize,
}

/// Execute `td create`.
pub fn run_create(args: &CreateArgs, ctx: &Context) -> anyhow::Result<()> {
    let new = args
        .to_new_ticket()
        .map_err(|e| output::fail(ctx.output, &e))?;

    let mut store = ctx.open_store()?;
    let ticket = store.create(new);
    tracing::info!(id = %ticket.id, "ticket submitted");

    let payload = Created {
        ticket,
        ticket_count: store.len(),
    };
    render_mode(
        ctx.output,
        &payload,
        |p, w| TicketRow(&p.ticket).render_table(w),
        |p, w| render_created_human(p, w),
    )
}

fn render_created_human(created: &Created, w: &mut dyn Write) -> std::io::Result<()> {
    let t = &created.ticket;
    pretty_section(w, "Ticket submitted! Here are the ticket details:")?;
    pretty_kv(w, "ID", t.id.as_str())?;
    pretty_kv(w, "Issue Type", t.issue_type.as_str())?;
    pretty_kv(w, "Issue", &t.issue)?;
    pretty_kv(w, "Status", t.status.as_str())?;
    pretty_kv(w, "Priority", t.priority.as_str())?;
    pretty_kv(w, "Date Submitted", t.date_submitted.format("%m-%d-%Y").to_string())?;
    pretty_kv(w, "Attachment", t.attachment_label())?;
    writeln!(w)?;
    writeln!(w, "Number of tickets: {}", created.ticket_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ticketdesk_core::clock::FixedClock;
    use ticketdesk_core::config::SeedConfig;
    use ticketdesk_core::{IssueType, Priority, TicketStore};

    fn fixed_store() -> TicketStore {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 5, 17).expect("valid date");
        TicketStore::from_config_with_clock(&SeedConfig::default(), FixedClock(date))
            .expect("default batch validates")
    }

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CreateArgs,
    }

    #[test]
    fn create_args_defaults_match_form() {
        let w = Wrapper::parse_from(["test"]);
        assert_eq!(w.args.issue_type, "Bug");
        assert_eq!(w.args.priority, "High");
        assert_eq!(w.args.issue, "");
        assert!(w.args.attachment.is_none());
    }

    #[test]
    fn args_convert_to_form_fields() {
        let w = Wrapper::parse_from([
            "test",
            "--issue-type",
            "request",
            "--issue",
            "More docs",
            "--priority",
            "low",
            "--attachment",
            "notes.docx",
        ]);
        let new = w.args.to_new_ticket().unwrap();
        assert_eq!(new.issue_type, IssueType::Request);
        assert_eq!(new.priority, Priority::Low);
        assert_eq!(new.issue, "More docs");
        assert_eq!(new.attachment.map(String::from).as_deref(), Some("notes.docx"));
    }

    #[test]
    fn bad_priority_is_a_validation_error() {
        let w = Wrapper::parse_from(["test", "--priority", "Critical"]);
        let err = w.args.to_new_ticket().unwrap_err();
        assert_eq!(err.error_code().code(), "E2005");
    }

    #[test]
    fn bad_attachment_is_rejected() {
        let w = Wrapper::parse_from(["test", "--attachment", "malware.exe"]);
        assert!(w.args.to_new_ticket().unwrap_err().is_validation());
    }

    #[test]
    fn human_render_uses_month_first_date() {
        let mut store = fixed_store();
        let ticket = store.create(NewTicket::new(IssueType::Bug, "x", Priority::High));
        let created = Created {
            ticket,
            ticket_count: store.len(),
        };
        let mut buf = Vec::new();
        render_created_human(&created, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("TICKET-1101"));
        assert!(s.contains("05-17-2026"));
        assert!(s.contains("No attachment"));
        assert!(s.contains("Number of tickets: 101"));
    }
}
