// flashdeck - main.rs
// Terminal front end: study one deck, or validate / reverse a folder of decks.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use log::{error, info, warn};

use flashdeck::config::{Cli, Command};
use flashdeck::deck::{loader, tools, writer};
use flashdeck::input::{self, Reply};
use flashdeck::storage::{ProgressStore, ReviewLogger};
use flashdeck::{Config, DeckSelector, Direction, LocalClock};

pub fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    match &cli.command {
        Command::Study { deck } => study(deck, &config),
        Command::Validate { dir } => validate(dir, &config),
        Command::Reverse { dir } => reverse(dir, &config),
    }
}

fn study(path: &Path, config: &Config) -> Result<(), String> {
    let deck = loader::load_deck(path, config.delimiter)
        .map_err(|e| format!("Failed to load deck: {}", e))?;
    let store = ProgressStore::new(&config.progress_file);
    let mut progress = store
        .load()
        .map_err(|e| format!("Failed to read {:?}: {}", store.path(), e))?;
    let logger = ReviewLogger::new(&config.review_log_dir, &deck.id()).map_err(|e| e.to_string())?;

    let clock = Box::new(LocalClock);
    let mut selector = match config.seed {
        Some(seed) => DeckSelector::with_seed(clock, seed),
        None => DeckSelector::new(clock),
    };
    let states: HashMap<_, _> = progress
        .stats
        .iter()
        .map(|(key, state)| (key.clone(), state.clone()))
        .collect();
    selector.load(deck.cards.clone(), states);
    selector.restore_outcomes(
        progress
            .results
            .iter()
            .map(|(key, outcome)| (key.clone(), *outcome)),
    );
    selector.set_shuffle(config.shuffle).map_err(|e| e.to_string())?;
    if config.reverse {
        selector.set_direction(Direction::Reverse);
    }
    selector.start_session().map_err(|e| e.to_string())?;

    let session = run_session(&mut selector, &logger);

    // Save whatever was graded, even if the terminal went away.
    progress.stats = selector
        .states()
        .iter()
        .map(|(key, state)| (key.clone(), state.clone()))
        .collect();
    progress
        .results
        .extend(selector.outcomes().iter().map(|(key, outcome)| (key.clone(), *outcome)));
    store.save(&progress).map_err(|e| format!("Failed to save progress: {}", e))?;
    writer::write_results(&deck, selector.outcomes(), config.keep_backup)
        .map_err(|e| format!("Failed to write results: {}", e))?;

    session.map_err(|e| e.to_string())
}

/// Reads commands line by line until `q` or end of input.
fn run_session(selector: &mut DeckSelector, logger: &ReviewLogger) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write_screen(selector, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = input::Command::from_key(&line) else {
            writeln!(stdout, "{}", input::HELP)?;
            continue;
        };

        match input::handle_command(selector, command) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Graded(graded)) => {
                if let Err(e) = logger.log_review(&graded) {
                    warn!("Could not write review log: {}", e);
                }
            }
            Ok(Reply::Text(text)) => write!(stdout, "{}", text)?,
            Ok(Reply::Redraw) => {}
            Err(e) => writeln!(stdout, "! {}", e)?,
        }
        write_screen(selector, &mut stdout)?;
    }
    Ok(())
}

fn write_screen(selector: &DeckSelector, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", input::render(selector))?;
    writeln!(out, "{}", input::HELP)?;
    out.flush()
}

fn validate(root: &Path, config: &Config) -> Result<(), String> {
    let report = tools::validate_tree(root, config.delimiter).map_err(|e| e.to_string())?;
    if report.total() == 0 {
        error!("No .txt files to validate under {:?}", root);
        process::exit(1);
    }
    if !report.failed.is_empty() {
        warn!("Failed files:");
        for file in &report.failed {
            warn!("- {}", file.strip_prefix(root).unwrap_or(file).display());
        }
        process::exit(2);
    }
    Ok(())
}

fn reverse(root: &Path, config: &Config) -> Result<(), String> {
    let summary = tools::reverse_tree(root, config.delimiter).map_err(|e| e.to_string())?;
    info!(
        "Reversed {} files into {:?} ({} skipped)",
        summary.written.len(),
        summary.output_root,
        summary.skipped.len()
    );
    Ok(())
}
