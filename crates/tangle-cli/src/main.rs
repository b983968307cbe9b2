//! tangle-dump - export the transactions of a tangle store to a text file

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "tangle-dump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that contains the store file
    #[arg(short, long, alias = "dbPath")]
    db_path: PathBuf,

    /// Output file to store the dump
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Name of the store file inside the database directory
    #[arg(long, default_value = "tangle.db")]
    store_file: String,

    /// Append to the output file instead of replacing it
    #[arg(long)]
    append: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let cfg = tangle_core::ExportConfig::new(cli.db_path)
        .with_store_file(cli.store_file)
        .with_output(cli.output)
        .with_append(cli.append);

    commands::export::execute(cfg)?;

    Ok(())
}
