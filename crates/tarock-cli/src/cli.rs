//! CLI argument definitions for tarock.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tarock_core::config::files;
use tarock_core::{Config, SeatInput};

#[derive(Parser)]
#[command(name = "tarock")]
#[command(about = "Tarock tournament recorder", version)]
pub struct Args {
    /// Entries file
    #[arg(long, value_name = "FILE", env = "TAROCK_ENTRIES_FILE", default_value = files::ENTRIES)]
    pub entries_file: PathBuf,

    /// Player number to name mapping file
    #[arg(long, value_name = "FILE", env = "TAROCK_MAPPING_FILE", default_value = files::MAPPING)]
    pub mapping_file: PathBuf,

    /// Ranking output file
    #[arg(long, value_name = "FILE", env = "TAROCK_RANKING_FILE", default_value = files::RANKING)]
    pub ranking_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            entries_path: self.entries_file.clone(),
            mapping_path: self.mapping_file.clone(),
            ranking_path: self.ranking_file.clone(),
            ..Config::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a table result
    Submit {
        /// Table number
        table: String,
        /// Round number
        round: u32,
        /// Four seats as NAME:POINTS, e.g. 7:10 3:-5 9:0 1:-5
        #[arg(num_args = 4, required = true, value_parser = parse_seat, allow_hyphen_values = true)]
        seats: Vec<SeatInput>,
    },
    /// Print every recorded entry
    List,
    /// Compute the standings and write the ranking file
    Rank {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the player name mapping
    Mapping {
        #[command(subcommand)]
        action: Option<MappingAction>,
    },
}

#[derive(Subcommand)]
pub enum MappingAction {
    /// Print all pairs
    Show,
    /// Add or replace a pair and save
    Set {
        /// Player number
        number: u32,
        /// Display name
        #[arg(num_args = 1.., required = true)]
        name: Vec<String>,
    },
    /// Remove a pair and save
    Remove {
        /// Player number
        number: u32,
    },
}

/// Parse a seat given as `NAME:POINTS`.
///
/// Splits on the last colon so names may contain colons themselves.
pub fn parse_seat(s: &str) -> Result<SeatInput, String> {
    let (name, points) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:POINTS, got {:?}", s))?;
    let points: i32 = points
        .trim()
        .parse()
        .map_err(|_| format!("invalid points in {:?}", s))?;
    Ok(SeatInput {
        name: name.to_string(),
        points,
    })
}
