use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::config::limits::MAX_PLAYER_NUMBER;
use crate::error::{Error, Result};
use crate::storage::csv::{join_record, parse_records_with_blanks};

pub const MAPPING_HEADER: &str = "Player_Number,Player_Name";

/// Player number to display name lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    pairs: BTreeMap<u32, String>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the mapping file.
    /// Format: header line, then "number,name" rows.
    ///
    /// Only the first `slots` rows are considered, one per form slot. Malformed
    /// and blank rows are skipped but still use up their slot. A missing file
    /// is an empty mapping.
    pub fn load<P: AsRef<Path>>(path: P, slots: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No mapping file at {:?}", path);
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mapping = Self::parse(&content, slots)?;
        info!("Loaded {} player names from {:?}", mapping.len(), path);
        Ok(mapping)
    }

    /// Parse mapping content
    pub fn parse(content: &str, slots: usize) -> Result<Self> {
        let records = parse_records_with_blanks(content).map_err(|line| Error::MalformedRow {
            line,
            reason: "unterminated quoted field".to_string(),
        })?;

        let mut mapping = Self::new();
        for record in records.iter().skip(1).take(slots) {
            if record.fields.len() < 2 {
                continue;
            }
            let Ok(number) = record.fields[0].trim().parse::<u32>() else {
                continue;
            };
            mapping.set(number, record.fields[1].trim());
        }

        Ok(mapping)
    }

    /// Build a mapping from raw (number, name) form rows.
    ///
    /// Rows with an empty field or a number that does not parse are dropped.
    /// A later row for the same number replaces an earlier one.
    pub fn from_form_rows<I, N, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut mapping = Self::new();
        for (number, name) in rows {
            let number = number.as_ref().trim();
            let name = name.as_ref().trim();
            if number.is_empty() || name.is_empty() {
                continue;
            }
            if let Ok(number) = number.parse::<u32>() {
                mapping.set(number, name);
            }
        }
        mapping
    }

    /// Header plus rows sorted by player number
    pub fn serialize(&self) -> String {
        let mut lines = vec![MAPPING_HEADER.to_string()];
        for (number, name) in &self.pairs {
            lines.push(join_record([number.to_string().as_str(), name.as_str()]));
        }
        lines.join("\n")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.serialize())?;
        info!(
            "Mapping saved: {} pairs written to {:?}",
            self.len(),
            path.as_ref()
        );
        Ok(())
    }

    /// Display name for a stored player identifier.
    ///
    /// Digit-only keys present in the mapping give the mapped name; anything
    /// else (literal names, unknown numbers) comes back unchanged.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return key;
        }
        key.parse::<u32>()
            .ok()
            .and_then(|number| self.get(number))
            .unwrap_or(key)
    }

    pub fn get(&self, number: u32) -> Option<&str> {
        self.pairs.get(&number).map(|s| s.as_str())
    }

    /// Insert or replace a pair. Numbers above the form limit are ignored.
    pub fn set(&mut self, number: u32, name: impl Into<String>) -> bool {
        if number > MAX_PLAYER_NUMBER {
            return false;
        }
        self.pairs.insert(number, name.into());
        true
    }

    pub fn remove(&mut self, number: u32) -> Option<String> {
        self.pairs.remove(&number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.pairs.iter().map(|(n, s)| (*n, s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
