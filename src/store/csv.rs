use std::fs::OpenOptions;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::models::Record;

use super::StoreError;

/// Append-only audit log over typed rows.
///
/// The production implementation is [`CsvLog`]; [`MemoryLog`] backs tests.
/// Injected into the web handlers so neither ever touches a path directly.
pub trait LogStore<R: Record>: Send + Sync {
    /// Append one row. The row is never mutated or deleted afterwards.
    fn append(&self, record: &R) -> Result<(), StoreError>;

    /// Read every row in file order. Rows that no longer match the column
    /// layout are skipped, not fatal.
    fn read_all(&self) -> Result<Vec<R>, StoreError>;
}

/// Flat CSV file with a fixed header row, created lazily on first write.
///
/// Writers are unsynchronized across processes: concurrent users can
/// interleave appends. Accepted limitation, same as the tone memory.
pub struct CsvLog<R> {
    path: PathBuf,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> CsvLog<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_header(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        let headers: Vec<String> = R::HEADERS.iter().map(|h| h.to_string()).collect();
        std::fs::write(&self.path, encode_row(&headers))
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

impl<R: Record> LogStore<R> for CsvLog<R> {
    fn append(&self, record: &R) -> Result<(), StoreError> {
        self.ensure_header()?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(encode_row(&record.to_fields()).as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))
    }

    fn read_all(&self) -> Result<Vec<R>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let rows = parse_rows(&content)?;

        // First row is the header written by ensure_header
        Ok(rows
            .into_iter()
            .skip(1)
            .filter_map(|fields| {
                let record = R::from_fields(&fields);
                if record.is_none() {
                    warn!("skipping row with {} fields in {:?}", fields.len(), self.path);
                }
                record
            })
            .collect())
    }
}

/// In-memory log for tests and fakes.
#[derive(Default)]
pub struct MemoryLog<R> {
    rows: Mutex<Vec<R>>,
}

impl<R: Record + Clone> MemoryLog<R> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<R: Record + Clone> LogStore<R> for MemoryLog<R> {
    fn append(&self, record: &R) -> Result<(), StoreError> {
        self.rows.lock().expect("log poisoned").push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.rows.lock().expect("log poisoned").clone())
    }
}

/// Encode one row with every field quoted, doubling embedded quotes.
pub fn encode_row(fields: &[String]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    }
    out.push('\n');
    out
}

/// Parse CSV text into rows of fields.
///
/// Accepts quoted and unquoted fields; quoted fields may contain commas,
/// doubled quotes, and newlines. CR before LF is dropped.
pub fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, StoreError> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    // A bare newline between records produces a single empty
                    // field; drop it rather than emit a phantom row.
                    if row.len() > 1 || !row[0].is_empty() {
                        rows.push(std::mem::take(&mut row));
                    } else {
                        row.clear();
                    }
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(StoreError::Malformed {
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::models::{CaptionVariant, ContentRecord, StylistRecord};

    use super::*;

    fn sample(user: &str, prompt: &str) -> ContentRecord {
        ContentRecord::new(user, prompt, CaptionVariant::WarmCozy, "https://img.example/1.png")
    }

    #[test]
    fn test_append_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let log: CsvLog<ContentRecord> = CsvLog::new(dir.path().join("sessions.csv"));

        let records = vec![
            sample("alice", "Rustic Fall Kitchen"),
            sample("Bob", "prompt with, a comma"),
            sample("carol", "a \"quoted\" prompt\nwith a newline"),
        ];
        for record in &records {
            log.append(record).unwrap();
        }

        let back = log.read_all().unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        let log: CsvLog<ContentRecord> = CsvLog::new(&path);

        log.append(&sample("alice", "one")).unwrap();
        log.append(&sample("alice", "two")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header_lines = content
            .lines()
            .filter(|l| l.contains("\"timestamp\""))
            .count();
        assert_eq!(header_lines, 1);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let log: CsvLog<ContentRecord> = CsvLog::new(dir.path().join("absent.csv"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_arity_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(
            &path,
            "\"timestamp\",\"user\",\"prompt\",\"result\"\n\
             \"2026-08-01 10:00:00\",\"alice\",\"ok prompt\",\"ok result\"\n\
             \"short\",\"row\"\n",
        )
        .unwrap();

        let log: CsvLog<StylistRecord> = CsvLog::new(&path);
        let rows = log.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].prompt, "ok prompt");
    }

    #[test]
    fn test_parse_unquoted_and_quoted_mix() {
        let rows = parse_rows("a,\"b,b\",c\nd,e,\"f\"\"g\"\n").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b,b".to_string(), "c".to_string()],
                vec!["d".to_string(), "e".to_string(), "f\"g".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_unterminated_quote_fails() {
        assert!(matches!(
            parse_rows("\"never closed\n"),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let rows = parse_rows("a,b\n\nc,d\n").unwrap();
        assert_eq!(rows.len(), 2);
    }
}
