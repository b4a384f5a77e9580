//! Word/meaning flash cards with SM-2 spaced repetition.
//!
//! The core is two pieces: [`scheduler::update`], a pure SM-2 step, and
//! [`session::DeckSelector`], the state machine that builds today's study
//! queue from the due cards and feeds grades to the scheduler. Everything
//! else loads decks, persists progress and writes results back.

pub mod clock;
pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::Config;
pub use deck::{Card, Deck, DeckFormat, Outcome};
pub use error::{Error, Result};
pub use scheduler::{CardState, Quality, Rating, Scheduler, Sm2Scheduler};
pub use session::{DeckSelector, Direction, Graded, SessionState};
