//! CSV/TSV loader with delimiter detection.
//!
//! Produces an untyped [`Frame`] of text cells; all typing decisions
//! belong to the normalization engine. Cells matching a null token
//! load as null.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use flightdeck::{Frame, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell texts treated as absent values (case-insensitive).
const NULL_TOKENS: &[&str] = &["", "na", "n/a", "null", "none", "-"];

/// Load a delimited file into an untyped frame.
///
/// Ragged rows are padded or truncated to the header width. When two
/// columns share a header the first one wins. A file with headers but
/// no data rows loads as an empty frame.
pub fn load_table(path: impl AsRef<Path>) -> Result<Frame, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let contents = fs::read(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

    let delimiter = detect_delimiter(&contents)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_slice());

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.trim().to_string()).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(format!("no columns found in {}", path.display()).into());
    }

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(cell_value(record.get(i).unwrap_or("")));
        }
    }

    let mut frame = Frame::new();
    for (name, values) in headers.into_iter().zip(columns) {
        if !frame.has_column(&name) {
            frame.insert_column(name, values)?;
        }
    }
    Ok(frame)
}

fn cell_value(text: &str) -> Value {
    let trimmed = text.trim();
    if NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
        Value::Null
    } else {
        Value::Str(trimmed.to_string())
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// The winner is the candidate with a consistent, non-zero count per
/// line; tabs get a slight bonus since they rarely appear inside data.
fn detect_delimiter(bytes: &[u8]) -> Result<u8, Box<dyn std::error::Error>> {
    let lines: Vec<String> = bytes
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err("file contains no data".into());
    }

    let mut best = b',';
    let mut best_score = 0usize;
    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();
        let first = counts[0];
        if first == 0 {
            continue;
        }
        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + usize::from(delim == b'\t') * 100
        } else {
            first
        };
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }
    Ok(best)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3").unwrap(), b',');
        assert_eq!(detect_delimiter(b"a\tb\tc\n1\t2\t3").unwrap(), b'\t');
        assert_eq!(detect_delimiter(b"a;b;c\n1;2;3").unwrap(), b';');
    }

    #[test]
    fn test_load_csv_with_null_tokens() {
        let file = write_temp("flight_id,lat\nF-1,55.7\nF-2,NA\n,37.6\n");
        let frame = load_table(file.path()).unwrap();
        assert_eq!(frame.row_count(), 3);
        assert_eq!(frame.value("lat", 1), Some(&Value::Null));
        assert_eq!(frame.value("flight_id", 2), Some(&Value::Null));
        assert_eq!(frame.value("lat", 2), Some(&Value::Str("37.6".to_string())));
    }

    #[test]
    fn test_ragged_rows_padded() {
        let file = write_temp("a,b,c\n1,2\n1,2,3,4\n");
        let frame = load_table(file.path()).unwrap();
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.value("c", 0), Some(&Value::Null));
    }

    #[test]
    fn test_header_only_file_is_empty_frame() {
        let file = write_temp("flight_id,start_time\n");
        let frame = load_table(file.path()).unwrap();
        assert_eq!(frame.row_count(), 0);
        assert!(frame.has_column("flight_id"));
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(load_table("/nonexistent/input.csv").is_err());
    }
}
