#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use std::path::PathBuf;
use ticketdesk_core::ErrorCode;
use ticketdesk_core::config::{self, TicketdeskConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "td: support ticket desk with seeded sample data",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides `--json`, `FORMAT` and the config file.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Read settings from this config file instead of the per-user one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the sample ticket batch.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List tickets",
        long_about = "Seed a session and list its tickets, most recent first.",
        after_help = "EXAMPLES:\n    # Show every ticket\n    td list\n\n    # Only open high-priority tickets\n    td list --status open --priority high\n\n    # Emit machine-readable output\n    td list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Write",
        about = "Submit a ticket",
        long_about = "Seed a session, submit one ticket through the creation form and print it.",
        after_help = "EXAMPLES:\n    # Report a bug\n    td create --issue \"Login page times out\"\n\n    # A low-priority request with an attachment\n    td create -t request -p low -i \"Export to CSV\" -a mockup.png"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show ticket statistics",
        long_about = "Summary counts, ticket status per month and current priorities.",
        after_help = "EXAMPLES:\n    # Show the statistics view\n    td stats\n\n    # Emit machine-readable output\n    td stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Describe the form and grid",
        long_about = "Print the creation form fields and grid columns with their option lists."
    )]
    Schema(cmd::schema::SchemaArgs),

    #[command(
        next_help_heading = "Sessions",
        about = "Serve JSON-lines requests on stdin",
        long_about = "Read one JSON request per line from stdin and answer each on stdout.",
        after_help = "EXAMPLES:\n    printf '%s\\n' '{\"op\":\"open\"}' '{\"op\":\"count_by_priority\"}' | td session"
    )]
    Session(cmd::session::SessionArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    td completions bash > ~/.local/share/bash-completion/completions/td"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TICKETDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "ticketdesk_core=debug,td=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("TICKETDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<TicketdeskConfig> {
    let mut settings = match config::load_config(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            let mode = output::resolve_output_mode(cli.format, cli.json, None);
            let code = ErrorCode::ConfigParseError;
            output::render_error(
                mode,
                &CliError::with_details(
                    format!("{err:#}"),
                    code.hint().unwrap_or_else(|| code.message()),
                    code.code(),
                ),
            )?;
            return Err(err);
        }
    };

    if let Some(seed) = cli.seed {
        settings.seed.seed = seed;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let settings = load_settings(&cli)?;
    let ctx = cmd::Context {
        output: output::resolve_output_mode(cli.format, cli.json, settings.output.as_deref()),
        seed: settings.seed,
    };

    match &cli.command {
        Commands::List(args) => cmd::list::run_list(args, &ctx),
        Commands::Create(args) => cmd::create::run_create(args, &ctx),
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Schema(args) => cmd::schema::run_schema(args, &ctx),
        Commands::Session(args) => cmd::session::run_session(args, &ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
