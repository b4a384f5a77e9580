// src/input.rs
// Maps terminal key commands onto deck selector calls and renders the screen.

use std::fmt::Write;

use crate::deck::Outcome;
use crate::error::Result;
use crate::scheduler::Rating;
use crate::session::{DeckSelector, Direction, Graded, SessionState};

/// Help line shown under every card.
pub const HELP: &str =
    "Enter: answer  n/p: next/prev  a: correct  s: wrong  r: restart  t: direction  h: shuffle  l: list  q: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleAnswer,
    Next,
    Previous,
    Grade(Rating),
    Restart,
    ToggleDirection,
    ToggleShuffle,
    List,
    Quit,
}

impl Command {
    /// Parses one line of input. Case-insensitive; surrounding whitespace is
    /// ignored, so a bare Enter or space toggles the answer.
    pub fn from_key(line: &str) -> Option<Self> {
        let key = line.trim().to_ascii_lowercase();
        let command = match key.as_str() {
            "" => Command::ToggleAnswer,
            "n" => Command::Next,
            "p" => Command::Previous,
            "a" => Command::Grade(Rating::Correct),
            "s" => Command::Grade(Rating::Wrong),
            "r" => Command::Restart,
            "t" => Command::ToggleDirection,
            "h" => Command::ToggleShuffle,
            "l" => Command::List,
            "q" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Re-render and keep reading.
    Redraw,
    /// A card was graded; the event should be logged.
    Graded(Graded),
    /// Show this text instead of the card.
    Text(String),
    /// Save and exit.
    Quit,
}

/// Applies `command` to the selector. Contract violations (e.g. grading an
/// unrevealed card) come back as errors for the caller to report.
pub fn handle_command(selector: &mut DeckSelector, command: Command) -> Result<Reply> {
    let reply = match command {
        Command::ToggleAnswer => {
            selector.toggle_answer()?;
            Reply::Redraw
        }
        Command::Next => {
            selector.advance()?;
            Reply::Redraw
        }
        Command::Previous => {
            selector.retreat()?;
            Reply::Redraw
        }
        Command::Grade(rating) => Reply::Graded(selector.grade(rating)?),
        Command::Restart => {
            selector.restart()?;
            Reply::Redraw
        }
        Command::ToggleDirection => {
            selector.toggle_direction();
            Reply::Redraw
        }
        Command::ToggleShuffle => {
            selector.toggle_shuffle()?;
            Reply::Redraw
        }
        Command::List => Reply::Text(render_card_list(selector)),
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}

/// Text for the current screen.
pub fn render(selector: &DeckSelector) -> String {
    let mut out = String::new();
    let (done, total) = selector.progress();
    let direction = match selector.direction() {
        Direction::Forward => "word -> meaning",
        Direction::Reverse => "meaning -> word",
    };
    let shuffle = if selector.is_shuffled() { "on" } else { "off" };

    match selector.status() {
        SessionState::Empty | SessionState::Ready => {
            out.push_str("No session running. Press r to start.\n");
        }
        SessionState::Finished => {
            let _ = writeln!(out, "All cards finished! ({}/{}) Press r to restart.", done, total);
        }
        SessionState::InSession => {
            let pct = if total == 0 { 0 } else { done * 100 / total };
            let _ = writeln!(
                out,
                "[{}/{} {}%]  direction: {}  shuffle: {}",
                done, total, pct, direction, shuffle
            );
            let _ = writeln!(out, "Q: {}", selector.prompt().unwrap_or_default());
            match selector.answer() {
                Some(answer) => {
                    let _ = writeln!(out, "A: {}", answer);
                }
                None => out.push_str("   (Enter to show the answer)\n"),
            }
            let marker = selector
                .current_card()
                .and_then(|card| selector.outcomes().get(&card.key))
                .map(|outcome| outcome_mark(*outcome))
                .unwrap_or("");
            if !marker.is_empty() {
                let _ = writeln!(out, "   last: {}", marker);
            }
        }
    }
    out
}

/// Every card in file order with its last outcome.
pub fn render_card_list(selector: &DeckSelector) -> String {
    let mut out = String::new();
    for (i, (card, outcome)) in selector.card_list().into_iter().enumerate() {
        let mark = outcome.map(outcome_mark).unwrap_or("");
        let _ = writeln!(out, "{}. {} {}", i + 1, card.key, mark);
        let _ = writeln!(out, "   -> {}", card.value);
    }
    out
}

fn outcome_mark(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "✓",
        Outcome::Wrong => "✗",
    }
}
