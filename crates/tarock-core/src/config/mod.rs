//! File locations and capacity limits.
//!
//! This module contains:
//! - `Config` - where the entries, mapping and ranking files live
//! - Default file names and form capacity constants

use std::path::{Path, PathBuf};

/// Default file names, relative to the working directory.
pub mod files {
    /// Persisted tournament entries.
    pub const ENTRIES: &str = "result.csv";

    /// Player number to name mapping.
    pub const MAPPING: &str = "player_numbers.csv";

    /// Ranking output, written on every ranking run.
    pub const RANKING: &str = "ranking.csv";
}

/// Form capacity and value limits.
pub mod limits {
    /// Number of mapping rows the form can hold; loading stops after this many rows.
    pub const MAPPING_SLOTS: usize = 20;

    /// Seats at a Tarock table.
    pub const SEATS: usize = 4;

    /// Lowest points a seat can record.
    pub const MIN_POINTS: i32 = -100;

    /// Highest points a seat can record.
    pub const MAX_POINTS: i32 = 100;

    /// Highest player number the mapping accepts.
    pub const MAX_PLAYER_NUMBER: u32 = 9999;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub entries_path: PathBuf,
    pub mapping_path: PathBuf,
    pub ranking_path: PathBuf,
    pub mapping_slots: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries_path: PathBuf::from(files::ENTRIES),
            mapping_path: PathBuf::from(files::MAPPING),
            ranking_path: PathBuf::from(files::RANKING),
            mapping_slots: limits::MAPPING_SLOTS,
        }
    }
}

impl Config {
    /// All three files placed inside `dir`, using the default names
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            entries_path: dir.join(files::ENTRIES),
            mapping_path: dir.join(files::MAPPING),
            ranking_path: dir.join(files::RANKING),
            mapping_slots: limits::MAPPING_SLOTS,
        }
    }
}
