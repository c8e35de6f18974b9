//! Text renderings of entries and standings.

mod console;

pub use console::format_ranking_console;

use crate::entry::Entry;

/// Plain-text card for a single entry, as shown for the current selection
pub fn format_card(entry: &Entry) -> String {
    let mut lines = vec![
        format!("Table: {}", entry.table),
        format!("Round: {}", entry.round),
    ];
    for person in &entry.people {
        lines.push(format!("{} – Points: {}", person.name, person.points));
    }
    lines.join("\n")
}

/// Card prefixed with its position, e.g. "Entry 2/5"
pub fn format_card_with_position(entry: &Entry, index: usize, total: usize) -> String {
    format!("Entry {}/{}\n{}", index + 1, total, format_card(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryForm;

    #[test]
    fn test_format_card() {
        let entry = EntryForm::new("12", 3, [("7", 10), ("Ana", -5), ("9", 0), ("1", -5)])
            .validate()
            .unwrap();
        assert_eq!(
            format_card(&entry),
            "Table: 12\nRound: 3\n7 – Points: 10\nAna – Points: -5\n9 – Points: 0\n1 – Points: -5"
        );
    }

    #[test]
    fn test_format_card_with_position() {
        let entry = EntryForm::new("1", 1, [("a", 0), ("b", 0), ("c", 0), ("d", 0)])
            .validate()
            .unwrap();
        assert!(format_card_with_position(&entry, 1, 5).starts_with("Entry 2/5\nTable: 1"));
    }
}
