use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::config::limits::{MAX_POINTS, MIN_POINTS, SEATS};
use crate::entry::{Entry, Person};
use crate::error::{Error, Result};
use crate::storage::csv::{join_record, parse_records, Record};

/// Columns per entry row: table, round, then name and points for every seat
pub const ENTRY_COLUMNS: usize = 2 + 2 * SEATS;

pub fn format_entries_header() -> String {
    let mut columns = vec!["Table".to_string(), "Round".to_string()];
    for seat in 1..=SEATS {
        columns.push(format!("Player_Number{}", seat));
        columns.push(format!("Points{}", seat));
    }
    columns.join(",")
}

pub fn format_entry_row(entry: &Entry) -> String {
    let mut values = vec![entry.table.to_string(), entry.round.to_string()];
    for person in &entry.people {
        values.push(person.name.clone());
        values.push(person.points.to_string());
    }
    join_record(values)
}

/// Header plus one row per entry, joined by `\n` with no trailing newline
pub fn serialize_entries(entries: &[Entry]) -> String {
    let mut lines = vec![format_entries_header()];
    lines.extend(entries.iter().map(format_entry_row));
    lines.join("\n")
}

/// Parse an entries file.
///
/// All or nothing: the first bad row fails the whole load, so callers never
/// see a partially loaded tournament. The header row is skipped unchecked.
pub fn deserialize_entries(text: &str) -> Result<Vec<Entry>> {
    let records = parse_records(text).map_err(|line| Error::MalformedRow {
        line,
        reason: "unterminated quoted field".to_string(),
    })?;

    if records.len() < 2 {
        return Ok(Vec::new());
    }

    records.iter().skip(1).map(parse_entry_row).collect()
}

fn parse_entry_row(record: &Record) -> Result<Entry> {
    let malformed = |reason: String| Error::MalformedRow {
        line: record.line,
        reason,
    };
    let fields = &record.fields;

    if fields.len() < ENTRY_COLUMNS {
        return Err(malformed(format!(
            "expected {} columns, found {}",
            ENTRY_COLUMNS,
            fields.len()
        )));
    }

    let table = parse_positive(&fields[0]).ok_or_else(|| {
        malformed(format!("invalid table number {:?}", fields[0]))
    })?;
    let round = parse_positive(&fields[1])
        .ok_or_else(|| malformed(format!("invalid round {:?}", fields[1])))?;

    let mut people = Vec::with_capacity(SEATS);
    for seat in 0..SEATS {
        let name = &fields[2 + 2 * seat];
        let points_text = &fields[3 + 2 * seat];

        if name.is_empty() {
            return Err(malformed(format!("empty player for seat {}", seat + 1)));
        }
        let points: i32 = points_text
            .trim()
            .parse()
            .map_err(|_| malformed(format!("invalid points {:?}", points_text)))?;
        if !(MIN_POINTS..=MAX_POINTS).contains(&points) {
            return Err(malformed(format!(
                "points {} for seat {} out of range",
                points,
                seat + 1
            )));
        }
        people.push(Person::new(name.as_str(), points));
    }

    let people: [Person; SEATS] = people
        .try_into()
        .map_err(|_| malformed("wrong number of seats".to_string()))?;

    Ok(Entry {
        table,
        round,
        people,
    })
}

fn parse_positive(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|&n| n > 0)
}

/// Read the entries file. A missing file is an empty tournament.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No entries file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let entries = deserialize_entries(&content)?;
    info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

pub fn save_entries<P: AsRef<Path>>(path: P, entries: &[Entry]) -> Result<()> {
    let csv_text = serialize_entries(entries);
    debug!("Saving entries:\n{}", csv_text);
    fs::write(path, csv_text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryForm;
    use tempfile::TempDir;

    fn entry(table: &str, round: u32, seats: [(&str, i32); SEATS]) -> Entry {
        EntryForm::new(table, round, seats).validate().unwrap()
    }

    #[test]
    fn test_header() {
        assert_eq!(
            format_entries_header(),
            "Table,Round,Player_Number1,Points1,Player_Number2,Points2,\
             Player_Number3,Points3,Player_Number4,Points4"
        );
    }

    #[test]
    fn test_serialize_single_entry() {
        let entries = vec![entry("12", 1, [("7", 10), ("3", -5), ("9", 0), ("1", 15)])];
        let text = serialize_entries(&entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "12,1,7,10,3,-5,9,0,1,15");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_serialize_empty_is_header_only() {
        assert_eq!(serialize_entries(&[]), format_entries_header());
        assert!(deserialize_entries(&serialize_entries(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_keeps_order_and_odd_names() {
        let entries = vec![
            entry("3", 2, [("Novak, M.", 40), ("\"Ace\"", -20), ("11", -10), ("2", -10)]),
            entry("1", 1, [("5", 0), ("6", 0), ("7", 100), ("8", -100)]),
        ];
        let text = serialize_entries(&entries);
        assert_eq!(deserialize_entries(&text).unwrap(), entries);
    }

    #[test]
    fn test_deserialize_ignores_extra_columns_and_blank_lines() {
        let text = format!("{}\n5,2,a,1,b,2,c,3,d,4,extra\n\n", format_entries_header());
        let entries = deserialize_entries(&text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].people[3], Person::new("d", 4));
    }

    #[test]
    fn test_deserialize_is_all_or_nothing() {
        let text = format!(
            "{}\n1,1,a,1,b,2,c,3,d,4\n2,1,a,x,b,2,c,3,d,4",
            format_entries_header()
        );
        match deserialize_entries(&text) {
            Err(Error::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_rejects_short_row() {
        let text = format!("{}\n1,1,a,1,b,2", format_entries_header());
        assert!(matches!(
            deserialize_entries(&text),
            Err(Error::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_values() {
        for row in ["0,1,a,1,b,2,c,3,d,4", "1,0,a,1,b,2,c,3,d,4", "1,1,a,101,b,2,c,3,d,4"] {
            let text = format!("{}\n{}", format_entries_header(), row);
            assert!(deserialize_entries(&text).is_err(), "row {row} should fail");
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let entries = load_entries(temp.path().join("missing.csv")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("result.csv");
        let entries = vec![entry("12", 1, [("7", 10), ("3", -5), ("9", 0), ("1", 15)])];

        save_entries(&path, &entries).unwrap();
        assert_eq!(load_entries(&path).unwrap(), entries);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope").join("result.csv");
        assert!(matches!(save_entries(&path, &[]), Err(Error::Io(_))));
    }
}
