//! Append-only JSON Lines journal for logged sets and meals.
//!
//! Each record is one line. Writers take an exclusive file lock so
//! several `liftlog` processes can append to the same file.

use crate::Result;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Destination for logged records
pub trait EntrySink<T> {
    fn append(&mut self, entry: &T) -> Result<()>;
}

/// JSONL-backed sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: Serialize> EntrySink<T> for JsonlSink {
    fn append(&mut self, entry: &T) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Serialize before writing so a bad record never leaves a partial line
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended entry to {:?}", self.path);
        Ok(())
    }
}

/// Read every parsable record from a journal
///
/// A missing file reads as empty. Lines that fail to parse (for example a
/// truncated final line) are skipped with a warning.
pub fn read_entries<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(
                    "Skipping unreadable entry at {:?} line {}: {}",
                    path,
                    line_num + 1,
                    e
                );
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SetEntry;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn create_test_set(reps: i32) -> SetEntry {
        SetEntry {
            id: Uuid::new_v4(),
            exercise_id: "squat".into(),
            performed_on: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            weight_kg: 100.0,
            reps,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_and_read_single_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sets.jsonl");

        let set = create_test_set(5);
        let mut sink = JsonlSink::new(&path);
        sink.append(&set).unwrap();

        let sets: Vec<SetEntry> = read_entries(&path).unwrap();
        assert_eq!(sets, vec![set]);
    }

    #[test]
    fn test_append_preserves_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/sets.jsonl");

        let mut sink = JsonlSink::new(&path);
        for reps in 1..=5 {
            sink.append(&create_test_set(reps)).unwrap();
        }

        let sets: Vec<SetEntry> = read_entries(&path).unwrap();
        let reps: Vec<i32> = sets.iter().map(|s| s.reps).collect();
        assert_eq!(reps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_read_missing_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sets: Vec<SetEntry> = read_entries(&temp_dir.path().join("none.jsonl")).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sets.jsonl");

        let mut sink = JsonlSink::new(&path);
        sink.append(&create_test_set(8)).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{ not json").unwrap();
            writeln!(file).unwrap();
            write!(file, r#"{{"id":"0000"#).unwrap();
        }

        let sets: Vec<SetEntry> = read_entries(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].reps, 8);
    }
}
