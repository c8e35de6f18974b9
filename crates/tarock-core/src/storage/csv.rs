//! Comma-separated record helpers shared by the entries, mapping and ranking files.
//!
//! Plain fields are written as-is. A field holding a comma, a double quote or a
//! line break is wrapped in double quotes with inner quotes doubled, and the
//! reader undoes the same.

use std::borrow::Cow;

/// One parsed record and the line it started on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn join_record<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split `text` into records. Blank lines produce no record.
///
/// Fails only on a quoted field that is never closed, returning the line the
/// broken record started on.
pub fn parse_records(text: &str) -> Result<Vec<Record>, usize> {
    split_records(text, false)
}

/// Like [`parse_records`], but a blank line yields a record with no fields.
pub fn parse_records_with_blanks(text: &str) -> Result<Vec<Record>, usize> {
    split_records(text, true)
}

fn split_records(text: &str, keep_blank: bool) -> Result<Vec<Record>, usize> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut has_content = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
                has_content = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
                has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if has_content {
                    fields.push(std::mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                } else if keep_blank {
                    records.push(Record {
                        line: record_line,
                        fields: Vec::new(),
                    });
                }
                field.clear();
                at_field_start = true;
                has_content = false;
                line += 1;
                record_line = line;
            }
            _ => {
                field.push(c);
                at_field_start = false;
                has_content = true;
            }
        }
    }

    if in_quotes {
        return Err(record_line);
    }
    if has_content {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_untouched() {
        assert_eq!(join_record(["12", "1", "7", "-5"]), "12,1,7,-5");
    }

    #[test]
    fn test_escape_special_fields() {
        assert_eq!(escape_field("Smith, J."), "\"Smith, J.\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("plain"), "plain");
    }

    #[test]
    fn test_parse_simple() {
        let records = parse_records("a,b\n1,2").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["a", "b"]);
        assert_eq!(records[1].fields, vec!["1", "2"]);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let records = parse_records("a,b\r\n\r\n1,2\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].fields, vec!["1", "2"]);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_parse_keeping_blank_lines() {
        let records = parse_records_with_blanks("a,b\r\n\r\n1,2\r\n").unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].fields.is_empty());
        assert_eq!(records[1].line, 2);
        assert_eq!(records[2].fields, vec!["1", "2"]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let line = join_record(["Smith, J.", "a \"b\"", "multi\nline", "x"]);
        let records = parse_records(&format!("{line}\nnext")).unwrap();
        assert_eq!(
            records[0].fields,
            vec!["Smith, J.", "a \"b\"", "multi\nline", "x"]
        );
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_parse_keeps_empty_fields() {
        let records = parse_records(",x,").unwrap();
        assert_eq!(records[0].fields, vec!["", "x", ""]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert_eq!(parse_records("a,b\n1,\"open"), Err(2));
    }
}
