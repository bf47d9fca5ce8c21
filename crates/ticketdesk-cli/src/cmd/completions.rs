//! `td completions`: shell completion scripts.

use clap::Args;
use clap_complete::{Shell, generate};
use std::io::Write;

/// Arguments for `td completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_completions(args.shell, command, &mut stdout.lock())
}

fn write_completions(
    shell: Shell,
    command: &mut clap::Command,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    generate(shell, command, "td", out);
    out.flush()?;
    Ok(())
}
