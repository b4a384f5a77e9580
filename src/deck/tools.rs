// src/deck/tools.rs
// Bulk maintenance for folders of delimited deck files: checking that every
// line has exactly one delimiter, and writing word/meaning-swapped copies.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A non-blank line that does not have exactly one delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: usize,
    pub delimiters: usize,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub passed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

#[derive(Debug)]
pub struct ReverseSummary {
    pub output_root: PathBuf,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Checks one deck file and logs every offending line.
pub fn validate_file(path: &Path, delimiter: char) -> Result<Vec<LineIssue>> {
    let content = fs::read_to_string(path)?;
    let name = path.file_name().unwrap_or_default().to_string_lossy();

    let mut issues = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let delimiters = line.matches(delimiter).count();
        if delimiters != 1 {
            warn!(
                "[{}] line {}: {} delimiters ({:?})",
                name,
                idx + 1,
                delimiters,
                line.trim_end()
            );
            issues.push(LineIssue {
                line: idx + 1,
                delimiters,
                content: line.trim_end().to_string(),
            });
        }
    }
    Ok(issues)
}

/// Validates every `.txt` file below `root`.
pub fn validate_tree(root: &Path, delimiter: char) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    for file in find_deck_files(root)? {
        if validate_file(&file, delimiter)?.is_empty() {
            report.passed.push(file);
        } else {
            report.failed.push(file);
        }
    }
    info!(
        "{} files checked: {} passed, {} failed",
        report.total(),
        report.passed.len(),
        report.failed.len()
    );
    Ok(report)
}

/// All `.txt` files below `root`, recursively, in sorted order. Symlinks are
/// not followed.
pub fn find_deck_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        let is_txt = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_txt {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `word<D>meaning` -> `meaning<D>word`, split at the first delimiter.
/// Lines without a delimiter come back unchanged.
pub fn reverse_line(line: &str, delimiter: char) -> String {
    if line.trim().is_empty() {
        return String::new();
    }
    match line.split_once(delimiter) {
        Some((left, right)) => format!("{}{}{}", right, delimiter, left),
        None => {
            warn!("no delimiter, left as is: {:?}", line);
            line.to_string()
        }
    }
}

pub fn reverse_file(src: &Path, dst: &Path, delimiter: char) -> Result<()> {
    let content = fs::read_to_string(src)?;
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        out.push_str(&reverse_line(line, delimiter));
        out.push('\n');
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dst, out)?;
    Ok(())
}

/// Writes a reversed copy of every valid `.txt` under `root` into the sibling
/// folder `<root>reverse`, keeping the relative layout. Files that fail
/// validation are skipped. `root` is resolved first, so `.` works.
pub fn reverse_tree(root: &Path, delimiter: char) -> Result<ReverseSummary> {
    let root = fs::canonicalize(root)?;
    let root = root.as_path();
    let name = root
        .file_name()
        .ok_or_else(|| Error::InvalidArgument(format!("{:?} has no folder name", root)))?;
    let mut out_name = name.to_os_string();
    out_name.push("reverse");
    let output_root = root.with_file_name(out_name);

    let mut summary = ReverseSummary {
        output_root,
        written: Vec::new(),
        skipped: Vec::new(),
    };

    for file in find_deck_files(root)? {
        if !validate_file(&file, delimiter)?.is_empty() {
            error!("validation failed, skipping {:?}", file);
            summary.skipped.push(file);
            continue;
        }

        let relative = file.strip_prefix(root).unwrap_or(&file);
        let dst = summary.output_root.join(relative);
        reverse_file(&file, &dst, delimiter)?;
        info!("{:?} -> {:?}", file, dst);
        summary.written.push(dst);
    }

    info!("reversed decks written to {:?}", summary.output_root);
    Ok(summary)
}
