// src/deck/writer.rs
// Writes grading outcomes back into the deck file they came from.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{Deck, DeckFormat, Outcome};
use crate::error::Result;
use crate::storage::write_atomic;

/// Merges `outcomes` into the deck's source file.
///
/// Row order, untouched rows and any extra columns are preserved. When
/// `backup` is set the previous file is copied to `<file>.backup` first.
/// Returns the number of rows that received an outcome.
pub fn write_results(deck: &Deck, outcomes: &HashMap<String, Outcome>, backup: bool) -> Result<usize> {
    let content = fs::read_to_string(&deck.path)?;

    let (merged, updated) = match deck.format {
        DeckFormat::Delimited(delimiter) => merge_delimited(&content, delimiter, outcomes),
        DeckFormat::Csv => merge_csv(&content, outcomes)?,
    };

    if backup {
        let backup_path = backup_path(&deck.path);
        fs::copy(&deck.path, &backup_path)?;
        debug!("backed up {:?} to {:?}", deck.path, backup_path);
    }

    write_atomic(&deck.path, merged.as_bytes())?;
    info!("Wrote {} results to {:?}", updated, deck.path);
    Ok(updated)
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Line-based merge for `word<D>meaning[<D>result...]` files.
pub fn merge_delimited(
    content: &str,
    delimiter: char,
    outcomes: &HashMap<String, Outcome>,
) -> (String, usize) {
    let mut out = String::with_capacity(content.len() + outcomes.len() * 2);
    let mut updated = 0;

    for segment in content.split_inclusive('\n') {
        let body = segment.trim_end_matches(['\n', '\r']);
        let ending = &segment[body.len()..];

        let mut parts: Vec<&str> = body.split(delimiter).collect();
        let outcome = if parts.len() >= 2 {
            outcomes.get(parts[0].trim())
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                if parts.len() >= 3 {
                    parts[2] = outcome.marker();
                } else {
                    parts.push(outcome.marker());
                }
                out.push_str(&parts.join(&delimiter.to_string()));
                out.push_str(ending);
                updated += 1;
            }
            None => out.push_str(segment),
        }
    }

    (out, updated)
}

/// Row-based merge for CSV decks. A trailing `0`/`1` cell is replaced, otherwise
/// a result cell is appended.
pub fn merge_csv(content: &str, outcomes: &HashMap<String, Outcome>) -> Result<(String, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::with_capacity(content.len()));

    let mut updated = 0;
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(String::from).collect();

        let outcome = if row.len() >= 2 {
            outcomes.get(row[0].trim())
        } else {
            None
        };
        if let Some(outcome) = outcome {
            let has_marker = row.len() >= 3
                && row
                    .last()
                    .map(|cell| Outcome::parse_marker(cell).is_some())
                    .unwrap_or(false);
            if has_marker {
                let last = row.len() - 1;
                row[last] = outcome.marker().to_string();
            } else {
                row.push(outcome.marker().to_string());
            }
            updated += 1;
        }

        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), updated))
}
