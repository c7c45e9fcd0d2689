mod commands;
mod io;
mod target;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{convert::ConvertArgs, parse::ParseArgs, schema::SchemaArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omsvalue", about = "Parse, inspect and convert omsconnect value literals")]
struct Cli {
    /// Log parser decisions (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a literal and print it back in normalized form
    Parse(ParseArgs),
    /// Print the inferred schema of a literal
    Schema(SchemaArgs),
    /// Convert a literal to another type
    Convert(ConvertArgs),
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the default `warn` level.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Parse(args) => args.run(),
        Commands::Schema(args) => args.run(),
        Commands::Convert(args) => args.run(),
    }
}
