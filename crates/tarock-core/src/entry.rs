//! Tournament entry model and form validation.

use crate::config::limits::{MAX_POINTS, MIN_POINTS, SEATS};
use crate::error::ValidationError;

/// One seat's result at a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Player number or a literal player name, stored exactly as entered
    pub name: String,
    pub points: i32,
}

impl Person {
    pub fn new(name: impl Into<String>, points: i32) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// One recorded table result for a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub table: u32,
    pub round: u32,
    /// Seats 1..=4 in order
    pub people: [Person; SEATS],
}

/// A single seat as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatInput {
    pub name: String,
    pub points: i32,
}

/// Raw form contents, not yet validated.
///
/// `submit` and `change` take this rather than an `Entry` so that the store
/// decides what counts as a valid entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub table: String,
    pub round: u32,
    pub seats: [SeatInput; SEATS],
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            table: String::new(),
            round: 1,
            seats: Default::default(),
        }
    }
}

impl EntryForm {
    pub fn new<S: Into<String>>(table: impl Into<String>, round: u32, seats: [(S, i32); SEATS]) -> Self {
        Self {
            table: table.into(),
            round,
            seats: seats.map(|(name, points)| SeatInput {
                name: name.into(),
                points,
            }),
        }
    }

    /// Form pre-filled with a stored entry, ready to be edited and passed to `change`
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            table: entry.table.to_string(),
            round: entry.round,
            seats: entry.people.clone().map(|person| SeatInput {
                name: person.name,
                points: person.points,
            }),
        }
    }

    /// Check the form and build the entry it describes.
    ///
    /// The table is checked first, then the round, then every seat in order,
    /// so the reported error is always the first offending field.
    pub fn validate(&self) -> Result<Entry, ValidationError> {
        let table_text = self.table.trim();
        if table_text.is_empty() || !table_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::Table(self.table.clone()));
        }
        let table: u32 = table_text
            .parse()
            .map_err(|_| ValidationError::Table(self.table.clone()))?;
        if table == 0 {
            return Err(ValidationError::Table(self.table.clone()));
        }

        if self.round == 0 {
            return Err(ValidationError::Round(self.round));
        }

        for (idx, seat) in self.seats.iter().enumerate() {
            if seat.name.trim().is_empty() {
                return Err(ValidationError::EmptyName { seat: idx + 1 });
            }
            if !(MIN_POINTS..=MAX_POINTS).contains(&seat.points) {
                return Err(ValidationError::PointsOutOfRange {
                    seat: idx + 1,
                    points: seat.points,
                });
            }
        }

        Ok(Entry {
            table,
            round: self.round,
            people: self
                .seats
                .clone()
                .map(|seat| Person::new(seat.name.trim(), seat.points)),
        })
    }
}
