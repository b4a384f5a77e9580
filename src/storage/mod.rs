// src/storage/mod.rs
// This module handles all data persistence: the progress file and the review log.

pub mod progress;
pub mod review_log;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

// Re-export the main structs for easier access.
pub use self::progress::{Progress, ProgressStore};
pub use self::review_log::ReviewLogger;

/// Replaces `path` with `bytes` via a temp file in the same directory, so a
/// crash never leaves a half-written file behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
