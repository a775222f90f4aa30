use std::collections::HashMap;

use crate::core::MedidictError;

/// Parsed delimited text: the header row plus one field-name -> value map per
/// data row, in file order.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

pub fn parse_csv(text: &str) -> Result<CsvTable, MedidictError> {
    let delimiter = detect_delimiter(text.lines().next().unwrap_or(""));
    let mut records = split_records(text, delimiter)?;

    if records.is_empty() {
        return Err(MedidictError::Csv("missing header row".to_string()));
    }

    let headers: Vec<String> =
        records.remove(0).into_iter().map(|header| header.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in records {
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut row = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            // Short rows pad with empty values, excess fields are dropped.
            row.insert(header.clone(), record.get(index).cloned().unwrap_or_default());
        }
        rows.push(row);
    }

    Ok(CsvTable { headers, rows })
}

/// Picks comma or semicolon by counting both in the first line.
pub fn detect_delimiter(first_line: &str) -> char {
    let commas = first_line.matches(',').count();
    let semicolons = first_line.matches(';').count();

    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

fn split_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, MedidictError> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            c if c == delimiter => record.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err(MedidictError::Csv("unterminated quoted field".to_string()));
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_field_with_embedded_delimiter() {
        let table = parse_csv("a,b\n1,\"x,y\"\n").unwrap();

        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0]["a"], "1");
        assert_eq!(table.rows[0]["b"], "x,y");
    }

    #[test]
    fn detects_semicolon_delimiter() {
        let table = parse_csv("a;b;c\nuno;dos;tres\n").unwrap();

        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows[0]["b"], "dos");
    }

    #[test]
    fn comma_wins_on_tie() {
        assert_eq!(detect_delimiter("plain header line"), ',');
        assert_eq!(detect_delimiter("a,b;c,d"), ',');
        assert_eq!(detect_delimiter("a;b;c,d"), ';');
    }

    #[test]
    fn handles_embedded_newline_and_doubled_quotes() {
        let table = parse_csv("name,note\nfemur,\"long\nbone, said \"\"thigh\"\"\"\n").unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0]["note"], "long\nbone, said \"thigh\"");
    }

    #[test]
    fn pads_short_rows_and_drops_excess_fields() {
        let table = parse_csv("a,b\nonly\n1,2,3\n").unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["a"], "only");
        assert_eq!(table.rows[0]["b"], "");
        assert_eq!(table.rows[1]["b"], "2");
    }

    #[test]
    fn skips_blank_lines() {
        let table = parse_csv("a,b\n\n1,2\n\n").unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(parse_csv("a,b\n1,\"oops\n").is_err());
    }
}
