// src/storage/progress.rs
// Manages the JSON progress file that stores card states between runs.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::write_atomic;
use crate::deck::Outcome;
use crate::error::Result;
use crate::scheduler::CardState;

/// Everything persisted between runs, keyed by card key.
///
/// On disk:
/// `{"stats": {key: {"ef", "interval", "reps", "next_due"}}, "results": {key: 0|1}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub stats: BTreeMap<String, CardState>,
    #[serde(default)]
    pub results: BTreeMap<String, Outcome>,
}

pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the progress file. A missing file is an empty progress; a file
    /// that exists but does not parse is an error.
    pub fn load(&self) -> Result<Progress> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no progress file at {:?}, starting fresh", self.path);
                return Ok(Progress::default());
            }
            Err(e) => return Err(e.into()),
        };

        let progress: Progress = serde_json::from_slice(&bytes)?;
        info!(
            "Loaded progress for {} cards from {:?}",
            progress.stats.len(),
            self.path
        );
        Ok(progress)
    }

    pub fn save(&self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(progress)?;
        write_atomic(&self.path, &json)?;
        info!("Saved progress for {} cards to {:?}", progress.stats.len(), self.path);
        Ok(())
    }
}
