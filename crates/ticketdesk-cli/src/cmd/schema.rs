//! `td schema`: describe the creation form and the editable grid.

use clap::Args;
use std::io::Write;
use ticketdesk_core::schema::{self, FieldKind, Schema};

use crate::cmd::Context;
use crate::output::{pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

pub fn run_schema(_args: &SchemaArgs, ctx: &Context) -> anyhow::Result<()> {
    render_mode(ctx.output, &schema::schema(), render_schema_text, render_schema_human)
}

const fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Choice => "choice",
        FieldKind::Text => "text",
        FieldKind::File => "file",
    }
}

fn render_schema_text(schema: &Schema, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "surface\tname\tkind\teditable\toptions")?;
    for field in &schema.form {
        writeln!(
            w,
            "form\t{}\t{}\ttrue\t{}",
            field.name,
            kind_label(field.kind),
            field.options.join("|")
        )?;
    }
    for column in &schema.grid {
        writeln!(
            w,
            "grid\t{}\t-\t{}\t{}",
            column.label,
            column.editable,
            column.options.map(|o| o.join("|")).unwrap_or_default()
        )?;
    }
    Ok(())
}

fn render_schema_human(schema: &Schema, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Add a ticket")?;
    for field in &schema.form {
        let required = if field.required { "" } else { " (optional)" };
        if field.options.is_empty() {
            writeln!(w, "  {}{required}: {}", field.label, kind_label(field.kind))?;
        } else {
            writeln!(w, "  {}{required}: {}", field.label, field.options.join(", "))?;
        }
    }

    writeln!(w)?;
    pretty_section(w, "Ticket grid")?;
    for column in &schema.grid {
        let access = if column.editable {
            "editable"
        } else if column.locked {
            "locked"
        } else {
            "read-only"
        };
        match column.options {
            Some(options) => writeln!(w, "  {:<16} {access}: {}", column.label, options.join(", "))?,
            None => writeln!(w, "  {:<16} {access}", column.label)?,
        }
    }
    Ok(())
}
