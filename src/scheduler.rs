// src/scheduler.rs
// Contains the logic for the spaced repetition system.
//
// The SM-2 variant used here:
// - grades below 3 reset the card (repetitions 0, interval 1 day)
// - grades 3-5 grow the interval 1 day -> 6 days -> interval * EF
// - the ease factor moves with every grade and never drops below 1.3

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ease factor given to a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;
/// Lower bound for the ease factor.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The two grades the study screen can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Correct,
    Wrong,
}

/// A recall grade in the closed range 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;
    /// Grade recorded for a "correct" answer.
    pub const CORRECT: Quality = Quality(5);
    /// Grade recorded for a "wrong" answer.
    pub const WRONG: Quality = Quality(2);

    /// Out-of-range grades are rejected, not clamped.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidArgument(format!(
                "quality must be in 0..={}, got {}",
                Self::MAX,
                value
            )));
        }
        Ok(Quality(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

impl From<Rating> for Quality {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Correct => Quality::CORRECT,
            Rating::Wrong => Quality::WRONG,
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Quality::new(value)
    }
}

/// Output of a single SM-2 step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Update {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
}

/// One SM-2 step. Pure: the result depends on the arguments only.
///
/// Intervals in the `repetitions >= 2` branch use `f64::round`, i.e. ties round
/// away from zero (round-half-up for the non-negative values seen here).
pub fn update(ease_factor: f64, interval: u32, repetitions: u32, quality: Quality) -> Sm2Update {
    let (new_interval, new_repetitions) = if quality.is_pass() {
        let new_interval = match repetitions {
            0 => 1,
            1 => 6,
            _ => (interval as f64 * ease_factor).round() as u32,
        };
        (new_interval, repetitions.saturating_add(1))
    } else {
        (1, 0)
    };

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), from the pre-step EF.
    let miss = f64::from(Quality::MAX - quality.value());
    let new_ease_factor = (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR);

    Sm2Update {
        ease_factor: new_ease_factor,
        interval: new_interval,
        repetitions: new_repetitions,
    }
}

/// Memory-strength state kept for every card key.
///
/// Field names on disk follow the progress file format (`ef`, `interval`,
/// `reps`, `next_due`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    #[serde(rename = "ef")]
    pub ease_factor: f64,
    pub interval: u32,
    #[serde(rename = "reps")]
    pub repetitions: u32,
    pub next_due: NaiveDate,
}

impl CardState {
    /// A never-reviewed card, due immediately.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_due: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due <= today
    }
}

/// A trait defining how a graded card's state moves forward.
pub trait Scheduler {
    fn review(&self, state: &CardState, quality: Quality, today: NaiveDate) -> CardState;
}

/// Implementation of the SM-2 algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Scheduler;

impl Scheduler for Sm2Scheduler {
    fn review(&self, state: &CardState, quality: Quality, today: NaiveDate) -> CardState {
        let step = update(state.ease_factor, state.interval, state.repetitions, quality);
        let next_due = today
            .checked_add_days(Days::new(u64::from(step.interval)))
            .unwrap_or(NaiveDate::MAX);

        CardState {
            ease_factor: step.ease_factor,
            interval: step.interval,
            repetitions: step.repetitions,
            next_due,
        }
    }
}
