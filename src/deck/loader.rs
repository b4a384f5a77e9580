// src/deck/loader.rs
// This file contains the logic for parsing deck files into cards.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::{Card, Deck, DeckFormat, Outcome};
use crate::error::{Error, Result};

/// Loads a deck from `path`, choosing delimited text or CSV from the extension.
///
/// A file that yields no usable card is an error; malformed lines are skipped.
pub fn load_deck(path: &Path, delimiter: char) -> Result<Deck> {
    info!("Attempting to load deck from: {:?}", path);

    let format = DeckFormat::for_path(path, delimiter);
    let raw = fs::read_to_string(path)?;
    let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let cards = match format {
        DeckFormat::Delimited(delimiter) => parse_delimited(content, delimiter),
        DeckFormat::Csv => parse_csv(content)?,
    };

    if cards.is_empty() {
        return Err(Error::EmptyDeck(path.to_path_buf()));
    }
    info!("Loaded {} cards ({:?}).", cards.len(), format);

    Ok(Deck {
        path: path.to_path_buf(),
        format,
        cards,
    })
}

/// Parses `word<D>meaning[<D>result]` lines.
pub fn parse_delimited(content: &str, delimiter: char) -> Vec<Card> {
    let mut cards = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(delimiter).collect();
        if parts.len() < 2 || parts[0].trim().is_empty() {
            warn!("line {}: expected word{}meaning, skipping {:?}", idx + 1, delimiter, line);
            continue;
        }

        let result = parts.get(2).and_then(|cell| Outcome::parse_marker(cell));
        cards.push(Card::new(parts[0].trim(), parts[1].trim()).with_result(result));
    }

    debug!("parsed {} delimited cards", cards.len());
    cards
}

/// Parses headerless CSV rows.
///
/// The trailing cell is taken as the result only when the row has at least
/// three cells and that cell is `0` or `1`; every other cell after the first
/// is part of the meaning, joined with ", ".
pub fn parse_csv(content: &str) -> Result<Vec<Card>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut cards = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }

        let key = record.get(0).unwrap_or_default().trim();
        if key.is_empty() {
            warn!("row {}: empty word, skipping", idx + 1);
            continue;
        }

        let cells: Vec<&str> = record.iter().collect();
        let last = cells[cells.len() - 1];
        let (meaning_cells, result) = match Outcome::parse_marker(last) {
            Some(outcome) if cells.len() >= 3 => (&cells[1..cells.len() - 1], Some(outcome)),
            _ => (&cells[1..], None),
        };

        let meaning = meaning_cells
            .iter()
            .map(|cell| cell.trim())
            .collect::<Vec<_>>()
            .join(", ");
        cards.push(Card::new(key, meaning).with_result(result));
    }

    debug!("parsed {} csv cards", cards.len());
    Ok(cards)
}
