// src/deck/mod.rs
// This module handles loading, writing back and maintaining word/meaning decks.

pub mod loader;
pub mod tools;
pub mod writer;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Result of the last grading of a card, as stored in the deck file
/// (`1` = correct, `0` = wrong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Wrong,
    Correct,
}

impl Outcome {
    pub fn from_pass(passed: bool) -> Self {
        if passed {
            Outcome::Correct
        } else {
            Outcome::Wrong
        }
    }

    /// Parses the `0`/`1` marker used in deck files. Anything else is no outcome.
    pub fn parse_marker(cell: &str) -> Option<Self> {
        match cell.trim() {
            "1" => Some(Outcome::Correct),
            "0" => Some(Outcome::Wrong),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Outcome::Correct => "1",
            Outcome::Wrong => "0",
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        match outcome {
            Outcome::Wrong => 0,
            Outcome::Correct => 1,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Wrong),
            1 => Ok(Outcome::Correct),
            other => Err(format!("outcome must be 0 or 1, got {}", other)),
        }
    }
}

/// A single word/meaning pair. The key doubles as the card's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: String,
    pub value: String,
    /// Outcome found in the source file, if any. Display/export only.
    pub prior_result: Option<Outcome>,
}

impl Card {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            prior_result: None,
        }
    }

    pub fn with_result(mut self, result: Option<Outcome>) -> Self {
        self.prior_result = result;
        self
    }
}

/// How a deck file is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    /// `word<D>meaning[<D>result]` per line.
    Delimited(char),
    /// Headerless CSV, `word,meaning...[,result]`.
    Csv,
}

impl DeckFormat {
    /// Picks the format from the file extension; anything but `.csv` is delimited text.
    pub fn for_path(path: &Path, delimiter: char) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            DeckFormat::Csv
        } else {
            DeckFormat::Delimited(delimiter)
        }
    }
}

/// A deck loaded from one file, cards kept in file order.
#[derive(Debug, Clone)]
pub struct Deck {
    pub path: PathBuf,
    pub format: DeckFormat,
    pub cards: Vec<Card>,
}

impl Deck {
    /// Identifier used for per-deck files such as the review log.
    pub fn id(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "deck".to_string())
    }
}
