// src/clock.rs
// Source of "today" for due-date decisions.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Days, Local, NaiveDate};

/// Calendar-day clock injected into the deck selector.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The machine's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a given day. Clones share the same date, so a test can
/// keep one handle and move time forward under a selector that owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    pub fn advance_days(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
