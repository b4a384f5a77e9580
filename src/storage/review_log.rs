// src/storage/review_log.rs
// Manages the plain-text log of grading events, one file per deck.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::session::Graded;

pub struct ReviewLogger {
    log_path: PathBuf,
}

impl ReviewLogger {
    /// Creates a logger writing to `<dir>/<deck_id>.log`, creating `dir` if needed.
    pub fn new(dir: &Path, deck_id: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let log_path = dir.join(format!("{}.log", deck_id));
        Ok(ReviewLogger { log_path })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Appends one grading event.
    pub fn log_review(&self, graded: &Graded) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        // Format: timestamp_iso,key,quality,outcome,ease,interval,reps,next_due
        let timestamp = chrono::Utc::now().to_rfc3339();
        let state = &graded.state;
        writer.write_record([
            timestamp,
            graded.key.clone(),
            graded.quality.value().to_string(),
            graded.outcome.marker().to_string(),
            format!("{:.2}", state.ease_factor),
            state.interval.to_string(),
            state.repetitions.to_string(),
            state.next_due.to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Outcome;
    use crate::scheduler::{CardState, Quality};
    use chrono::NaiveDate;

    #[test]
    fn test_appends_one_line_per_review() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ReviewLogger::new(&dir.path().join("history"), "verbs").unwrap();
        assert!(logger.path().ends_with("history/verbs.log"));

        let graded = Graded {
            key: "가다".to_string(),
            quality: Quality::CORRECT,
            outcome: Outcome::Correct,
            state: CardState {
                ease_factor: 2.6,
                interval: 1,
                repetitions: 1,
                next_due: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            },
        };
        logger.log_review(&graded).unwrap();
        logger.log_review(&graded).unwrap();

        let content = fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(",가다,5,1,2.60,1,1,2025-05-02"));
    }

    #[test]
    fn test_key_with_comma_stays_one_column() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ReviewLogger::new(dir.path(), "animals").unwrap();
        let graded = Graded {
            key: "cat, dog".to_string(),
            quality: Quality::WRONG,
            outcome: Outcome::Wrong,
            state: CardState::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        };
        logger.log_review(&graded).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(logger.path())
            .unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 8);
        assert_eq!(&records[0][1], "cat, dog");
        assert_eq!(&records[0][3], "0");
    }
}
