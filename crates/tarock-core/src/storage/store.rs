use std::path::Path;

use crate::entry::{Entry, EntryForm};
use crate::error::{Boundary, Error, Result};
use crate::storage::entries::{deserialize_entries, load_entries, save_entries, serialize_entries};

/// Ordered tournament entries with a single selection cursor.
///
/// The cursor is `None` exactly when the store is empty; otherwise it always
/// points at a valid entry. Every operation validates before it mutates, so a
/// failed call leaves both the entries and the cursor untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<Entry>,
    current: Option<usize>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `entries`, with the first one selected
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let current = if entries.is_empty() { None } else { Some(0) };
        Self { entries, current }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_entries(load_entries(path)?))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_entries(path, &self.entries)
    }

    pub fn serialize(&self) -> String {
        serialize_entries(&self.entries)
    }

    pub fn deserialize(text: &str) -> Result<Self> {
        Ok(Self::from_entries(deserialize_entries(text)?))
    }

    /// Append a new entry and select it. Returns its index.
    pub fn submit(&mut self, form: &EntryForm) -> Result<usize> {
        let entry = form.validate()?;
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        self.current = Some(index);
        Ok(index)
    }

    /// Replace the selected entry in place. The cursor does not move.
    pub fn change(&mut self, form: &EntryForm) -> Result<()> {
        let index = self.current.ok_or(Error::NoSelection)?;
        let entry = form.validate()?;
        self.entries[index] = entry;
        Ok(())
    }

    pub fn navigate_previous(&mut self) -> Result<usize> {
        let index = self.current.ok_or(Error::EmptyStore)?;
        if index == 0 {
            return Err(Error::AtBoundary(Boundary::First));
        }
        self.current = Some(index - 1);
        Ok(index - 1)
    }

    pub fn navigate_next(&mut self) -> Result<usize> {
        let index = self.current.ok_or(Error::EmptyStore)?;
        if index + 1 >= self.entries.len() {
            return Err(Error::AtBoundary(Boundary::Last));
        }
        self.current = Some(index + 1);
        Ok(index + 1)
    }

    /// Remove the selected entry once the user has confirmed.
    ///
    /// Without confirmation nothing changes and `Ok(None)` is returned. After
    /// removal the cursor stays at the same position, or moves to the new last
    /// entry, or clears when the store is empty.
    pub fn delete_current(&mut self, confirmed: bool) -> Result<Option<Entry>> {
        let index = self.current.ok_or(Error::EmptyStore)?;
        if !confirmed {
            return Ok(None);
        }

        let removed = self.entries.remove(index);
        self.current = if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        };
        Ok(Some(removed))
    }

    pub fn current(&self) -> Option<&Entry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Cursor as a signed position, -1 when nothing is selected
    pub fn cursor(&self) -> isize {
        self.current.map_or(-1, |i| i as isize)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
