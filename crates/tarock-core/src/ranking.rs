//! Standings: total points per player across every recorded entry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::storage::Mapping;
use crate::storage::csv::join_record;

pub const RANKING_HEADER: &str = "Rank,Player_Number,Player_Name,Total Points";

/// One line of the final standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankRow {
    /// 1-based position
    pub rank: usize,
    /// Identifier exactly as stored in the entries
    pub raw_name: String,
    /// `raw_name` looked up in the mapping
    pub display_name: String,
    pub total: i64,
}

/// Rank players by total points.
///
/// Totals are keyed by the raw stored identifier, so two identifiers that
/// map to the same display name stay separate rows. Ties are ordered by raw
/// identifier.
pub fn rank(entries: &[Entry], mapping: &Mapping) -> Result<Vec<RankRow>> {
    if entries.is_empty() {
        return Err(Error::EmptyStore);
    }

    let mut totals: HashMap<&str, i64> = HashMap::new();
    for entry in entries {
        for person in &entry.people {
            *totals.entry(person.name.as_str()).or_default() += i64::from(person.points);
        }
    }

    let mut sorted: Vec<(&str, i64)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(idx, (name, total))| RankRow {
            rank: idx + 1,
            raw_name: name.to_string(),
            display_name: mapping.resolve(name).to_string(),
            total,
        })
        .collect())
}

pub fn format_ranking(rows: &[RankRow]) -> String {
    let mut lines = vec![RANKING_HEADER.to_string()];
    for row in rows {
        lines.push(join_record([
            row.rank.to_string(),
            row.raw_name.clone(),
            row.display_name.clone(),
            row.total.to_string(),
        ]));
    }
    lines.join("\n")
}

pub fn format_ranking_json(rows: &[RankRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn save_ranking<P: AsRef<Path>>(path: P, rows: &[RankRow]) -> Result<()> {
    fs::write(path, format_ranking(rows))?;
    Ok(())
}
