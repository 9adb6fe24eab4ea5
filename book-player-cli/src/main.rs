use book_player_cli::{CliError, LogConfig, ReplayScript, Result};
use book_player_core::ProgressReport;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "bookplayer")]
#[command(version, about = "Book player CLI - replay reading sessions and inspect analytics")]
struct Cli {
    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level for the player crates (overrides --verbose)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<tracing::Level>,

    /// Nothing on stderr; only the JSON output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session and print the progress report as JSON
    Replay {
        /// Path to the replay script
        script: PathBuf,

        /// Also print the player event log
        #[arg(short, long)]
        events: bool,
    },

    /// Print a JSON schema
    Schema {
        #[arg(value_enum, default_value = "script")]
        target: SchemaTarget,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaTarget {
    Script,
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LogConfig::from_flags(cli.verbose, cli.log_level, cli.quiet).init()?;

    match cli.command {
        Commands::Replay { script, events } => replay(script, events),
        Commands::Schema { target } => print_schema(target),
    }
}

fn replay(path: PathBuf, with_events: bool) -> Result<()> {
    info!("📖 Replaying {}", path.display());
    let outcome = ReplayScript::from_file(&path)?.run()?;
    info!("✅ Replay finished with {} events", outcome.events.len());

    let output = if with_events {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome.report)?
    };
    println!("{}", output);
    Ok(())
}

fn print_schema(target: SchemaTarget) -> Result<()> {
    let schema = match target {
        SchemaTarget::Script => schemars::schema_for!(ReplayScript),
        SchemaTarget::Report => schemars::schema_for!(ProgressReport),
    };
    let rendered = serde_json::to_string_pretty(&schema).map_err(CliError::from)?;
    println!("{}", rendered);
    Ok(())
}
