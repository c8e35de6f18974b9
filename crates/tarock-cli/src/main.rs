mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides; warnings only by default so they don't drown the output
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tarock=warn,tarock_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.config();

    match args.command {
        Some(Command::Submit {
            table,
            round,
            seats,
        }) => commands::submit::run(config, &table, round, seats),
        Some(Command::List) => commands::list::run(config),
        Some(Command::Rank { json }) => commands::rank::run(config, json),
        Some(Command::Mapping { action }) => commands::mapping::run(config, action),
        None => commands::session::run(config),
    }
}
