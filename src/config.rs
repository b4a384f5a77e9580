// src/config.rs
// Runtime settings. Defaults come from `Config::new`; the command line (and two
// environment variables for the paths) override them through `Cli`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const PROGRESS_ENV: &str = "FLASHDECK_PROGRESS";
pub const HISTORY_ENV: &str = "FLASHDECK_HISTORY";

const DEFAULT_PROGRESS_FILE: &str = "progress.json";
const DEFAULT_HISTORY_DIR: &str = "history";
const DEFAULT_DELIMITER: char = '\\';

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub progress_file: PathBuf,
    pub review_log_dir: PathBuf,
    pub delimiter: char,
    pub shuffle: bool,
    pub reverse: bool,
    pub keep_backup: bool,
    pub seed: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            review_log_dir: PathBuf::from(DEFAULT_HISTORY_DIR),
            delimiter: DEFAULT_DELIMITER,
            shuffle: true,
            reverse: false,
            keep_backup: true,
            seed: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Word/meaning flash cards with SM-2 spaced repetition.
#[derive(Parser, Debug)]
#[command(name = "flashdeck", version, about, long_about = None)]
pub struct Cli {
    /// Ask the meaning side and expect the word
    #[arg(long, global = true)]
    reverse: bool,

    /// Keep cards in file order
    #[arg(long, global = true)]
    no_shuffle: bool,

    /// Do not write a .backup copy before saving results into the deck
    #[arg(long, global = true)]
    no_backup: bool,

    /// Seed for the card shuffle
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Progress file shared by all decks
    #[arg(long, global = true, env = PROGRESS_ENV, default_value = DEFAULT_PROGRESS_FILE)]
    progress: PathBuf,

    /// Directory for the per-deck review logs
    #[arg(long, global = true, env = HISTORY_ENV, default_value = DEFAULT_HISTORY_DIR)]
    history: PathBuf,

    /// Field separator of text decks
    #[arg(long, global = true, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Study one deck (.txt or .csv)
    Study {
        deck: PathBuf,
    },

    /// Check every .txt deck below a folder
    Validate {
        dir: PathBuf,
    },

    /// Write word/meaning-swapped copies of every valid .txt deck
    Reverse {
        dir: PathBuf,
    },
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            progress_file: self.progress.clone(),
            review_log_dir: self.history.clone(),
            delimiter: self.delimiter,
            shuffle: !self.no_shuffle,
            reverse: self.reverse,
            keep_backup: !self.no_backup,
            seed: self.seed,
        }
    }
}
