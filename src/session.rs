// src/session.rs
// The deck selector: builds today's study queue from the due cards and walks
// through it one card at a time.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::deck::{Card, Outcome};
use crate::error::{Error, Result};
use crate::scheduler::{CardState, Quality, Scheduler, Sm2Scheduler, MIN_EASE_FACTOR};

/// Where the selector is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No deck loaded.
    Empty,
    /// Deck loaded, no session started.
    Ready,
    /// A card is on screen.
    InSession,
    /// Every due card has been shown (or none was due).
    Finished,
}

/// Which side of the card is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Show the word, ask for the meaning.
    #[default]
    Forward,
    /// Show the meaning, ask for the word.
    Reverse,
}

/// What a successful `grade` did, handed back for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Graded {
    pub key: String,
    pub quality: Quality,
    pub outcome: Outcome,
    pub state: CardState,
}

pub struct DeckSelector {
    cards: Vec<Card>,
    states: HashMap<String, CardState>,
    outcomes: HashMap<String, Outcome>,
    queue: Vec<usize>,
    position: usize,
    shown: HashSet<String>,
    revealed: bool,
    status: SessionState,
    shuffle: bool,
    direction: Direction,
    scheduler: Box<dyn Scheduler>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl DeckSelector {
    /// A selector using SM-2 and an entropy-seeded shuffle.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_rng(clock, StdRng::from_entropy())
    }

    /// Same as `new` but with a fixed shuffle seed, for reproducible sessions.
    pub fn with_seed(clock: Box<dyn Clock>, seed: u64) -> Self {
        Self::with_rng(clock, StdRng::seed_from_u64(seed))
    }

    fn with_rng(clock: Box<dyn Clock>, rng: StdRng) -> Self {
        Self {
            cards: Vec::new(),
            states: HashMap::new(),
            outcomes: HashMap::new(),
            queue: Vec::new(),
            position: 0,
            shown: HashSet::new(),
            revealed: false,
            status: SessionState::Empty,
            shuffle: true,
            direction: Direction::Forward,
            scheduler: Box::new(Sm2Scheduler),
            clock,
            rng,
        }
    }

    /// Swaps the scheduling rule used by `grade`.
    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replaces the deck and its card states. Cards without a state get a fresh
    /// one due today; states for keys outside this deck are kept as they are.
    /// A repeated key keeps its first card. Ease factors below the SM-2 floor
    /// are raised to it.
    pub fn load(&mut self, cards: Vec<Card>, states: HashMap<String, CardState>) {
        let today = self.clock.today();

        let mut seen = HashSet::with_capacity(cards.len());
        let mut unique = Vec::with_capacity(cards.len());
        for card in cards {
            if !seen.insert(card.key.clone()) {
                warn!("duplicate card {:?}, keeping the first one", card.key);
                continue;
            }
            unique.push(card);
        }

        self.states = states
            .into_iter()
            .map(|(key, mut state)| {
                if state.ease_factor.is_nan() || state.ease_factor < MIN_EASE_FACTOR {
                    warn!(
                        "ease factor {} for {:?} is below {}, raised to it",
                        state.ease_factor, key, MIN_EASE_FACTOR
                    );
                    state.ease_factor = MIN_EASE_FACTOR;
                }
                (key, state)
            })
            .collect();
        for card in &unique {
            self.states
                .entry(card.key.clone())
                .or_insert_with(|| CardState::new(today));
        }
        self.outcomes = unique
            .iter()
            .filter_map(|card| card.prior_result.map(|outcome| (card.key.clone(), outcome)))
            .collect();
        self.cards = unique;

        self.queue.clear();
        self.shown.clear();
        self.position = 0;
        self.revealed = false;
        self.status = SessionState::Ready;
        info!("Loaded {} cards, {} due today", self.cards.len(), self.due_count());
    }

    /// Adds saved outcomes for cards of the loaded deck. An outcome already
    /// read from the card file wins. Returns how many were added.
    pub fn restore_outcomes<I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = (String, Outcome)>,
    {
        let keys: HashSet<&str> = self.cards.iter().map(|card| card.key.as_str()).collect();
        let mut restored = 0;
        for (key, outcome) in results {
            if keys.contains(key.as_str()) && !self.outcomes.contains_key(&key) {
                self.outcomes.insert(key, outcome);
                restored += 1;
            }
        }
        restored
    }

    /// Starts the first pass over today's due cards.
    pub fn start_session(&mut self) -> Result<SessionState> {
        match self.status {
            SessionState::Empty => Err(Error::InvalidState("no deck loaded".into())),
            SessionState::InSession => Err(Error::InvalidState(
                "a session is already running, restart it instead".into(),
            )),
            SessionState::Ready | SessionState::Finished => self.build_session(),
        }
    }

    /// Throws away the current pass and starts a new one from the card source
    /// order and the current card states.
    pub fn restart(&mut self) -> Result<SessionState> {
        if self.status == SessionState::Empty {
            return Err(Error::InvalidState("no deck loaded".into()));
        }
        self.build_session()
    }

    fn build_session(&mut self) -> Result<SessionState> {
        if self.cards.is_empty() {
            return Err(Error::InvalidState("the loaded deck has no cards".into()));
        }

        let today = self.clock.today();
        let mut queue = Vec::new();
        for (idx, card) in self.cards.iter().enumerate() {
            if self.state_of(&card.key)?.is_due(today) {
                queue.push(idx);
            }
        }
        if self.shuffle {
            queue.shuffle(&mut self.rng);
        }

        self.queue = queue;
        self.position = 0;
        self.revealed = false;
        self.shown.clear();

        if self.queue.is_empty() {
            info!("No cards due on {}", today);
            self.status = SessionState::Finished;
        } else {
            info!("Session started with {} of {} cards", self.queue.len(), self.cards.len());
            self.status = SessionState::InSession;
            self.mark_shown();
        }
        Ok(self.status)
    }

    /// Moves to the next card, or finishes the session after the last one.
    pub fn advance(&mut self) -> Result<SessionState> {
        self.require_session("advance")?;
        self.revealed = false;

        if self.position + 1 < self.queue.len() {
            self.position += 1;
            self.mark_shown();
        } else {
            self.position = self.queue.len();
            self.status = SessionState::Finished;
            info!("Session finished, {} cards shown", self.shown.len());
        }
        Ok(self.status)
    }

    /// Moves back one card; stays put on the first card.
    pub fn retreat(&mut self) -> Result<SessionState> {
        self.require_session("retreat")?;
        self.revealed = false;
        self.position = self.position.saturating_sub(1);
        Ok(self.status)
    }

    /// Shows or hides the answer of the current card. Returns the new flag.
    pub fn toggle_answer(&mut self) -> Result<bool> {
        self.require_session("toggle the answer")?;
        self.revealed = !self.revealed;
        Ok(self.revealed)
    }

    pub fn reveal(&mut self) -> Result<()> {
        self.require_session("reveal the answer")?;
        self.revealed = true;
        Ok(())
    }

    /// Grades the card on screen, stores its new state and outcome, then
    /// advances. Only allowed once the answer is revealed.
    pub fn grade(&mut self, quality: impl Into<Quality>) -> Result<Graded> {
        let quality = quality.into();
        self.require_session("grade")?;
        if !self.revealed {
            return Err(Error::InvalidState(
                "cannot grade before the answer is revealed".into(),
            ));
        }

        let key = match self.current_card() {
            Some(card) => card.key.clone(),
            None => return Err(Error::InvalidState("no card on screen".into())),
        };
        let today = self.clock.today();
        let state = self.scheduler.review(self.state_of(&key)?, quality, today);
        let outcome = Outcome::from_pass(quality.is_pass());

        debug!(
            "graded {:?} q={} -> ef={:.2} interval={} due={}",
            key,
            quality.value(),
            state.ease_factor,
            state.interval,
            state.next_due
        );
        self.states.insert(key.clone(), state.clone());
        self.outcomes.insert(key.clone(), outcome);
        self.advance()?;

        Ok(Graded {
            key,
            quality,
            outcome,
            state,
        })
    }

    /// Turns shuffling on or off. A running or finished session is rebuilt.
    pub fn set_shuffle(&mut self, shuffle: bool) -> Result<()> {
        self.shuffle = shuffle;
        match self.status {
            SessionState::InSession | SessionState::Finished => self.restart().map(|_| ()),
            _ => Ok(()),
        }
    }

    pub fn toggle_shuffle(&mut self) -> Result<bool> {
        self.set_shuffle(!self.shuffle)?;
        Ok(self.shuffle)
    }

    pub fn toggle_direction(&mut self) -> Direction {
        self.direction = match self.direction {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        };
        self.revealed = false;
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.revealed = false;
    }

    fn require_session(&self, action: &str) -> Result<()> {
        if self.status == SessionState::InSession {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "cannot {} while {:?}",
                action, self.status
            )))
        }
    }

    fn mark_shown(&mut self) {
        if let Some(card) = self.current_card() {
            let key = card.key.clone();
            self.shown.insert(key);
        }
    }

    fn state_of(&self, key: &str) -> Result<&CardState> {
        self.states
            .get(key)
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    pub fn status(&self) -> SessionState {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The card on screen, if a session is running.
    pub fn current_card(&self) -> Option<&Card> {
        if self.status != SessionState::InSession {
            return None;
        }
        self.queue
            .get(self.position)
            .and_then(|&idx| self.cards.get(idx))
    }

    /// The side of the current card being asked.
    pub fn prompt(&self) -> Option<&str> {
        self.current_card().map(|card| match self.direction {
            Direction::Forward => card.key.as_str(),
            Direction::Reverse => card.value.as_str(),
        })
    }

    /// The hidden side of the current card, only once revealed.
    pub fn answer(&self) -> Option<&str> {
        if !self.revealed {
            return None;
        }
        self.current_card().map(|card| match self.direction {
            Direction::Forward => card.value.as_str(),
            Direction::Reverse => card.key.as_str(),
        })
    }

    /// `(cards reached so far, cards in this session)`.
    pub fn progress(&self) -> (usize, usize) {
        let done = match self.status {
            SessionState::InSession => self.position + 1,
            SessionState::Finished => self.queue.len(),
            _ => 0,
        };
        (done, self.queue.len())
    }

    /// Keys of this session's queue, in presentation order.
    pub fn session_keys(&self) -> Vec<&str> {
        self.queue
            .iter()
            .filter_map(|&idx| self.cards.get(idx))
            .map(|card| card.key.as_str())
            .collect()
    }

    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    pub fn due_count(&self) -> usize {
        let today = self.clock.today();
        self.cards
            .iter()
            .filter(|card| {
                self.states
                    .get(&card.key)
                    .map(|state| state.is_due(today))
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Every loaded card in source order with its last known outcome.
    pub fn card_list(&self) -> Vec<(&Card, Option<Outcome>)> {
        self.cards
            .iter()
            .map(|card| (card, self.outcomes.get(&card.key).copied()))
            .collect()
    }

    pub fn card_state(&self, key: &str) -> Result<&CardState> {
        self.state_of(key)
    }

    pub fn states(&self) -> &HashMap<String, CardState> {
        &self.states
    }

    pub fn outcomes(&self) -> &HashMap<String, Outcome> {
        &self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::scheduler::Rating;
    use chrono::{Days, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn create_test_cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("word {}", i), format!("meaning {}", i)))
            .collect()
    }

    fn selector(clock: &FixedClock, seed: u64) -> DeckSelector {
        DeckSelector::with_seed(Box::new(clock.clone()), seed)
    }

    fn due_in(days: u64) -> CardState {
        let mut state = CardState::new(today());
        state.next_due = today().checked_add_days(Days::new(days)).unwrap();
        state
    }

    fn sorted(keys: Vec<&str>) -> Vec<String> {
        let mut keys: Vec<String> = keys.into_iter().map(String::from).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_lifecycle_starts_empty() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1);
        assert_eq!(deck.status(), SessionState::Empty);
        assert!(matches!(deck.start_session(), Err(Error::InvalidState(_))));
        assert!(matches!(deck.restart(), Err(Error::InvalidState(_))));
        assert!(matches!(deck.advance(), Err(Error::InvalidState(_))));

        deck.load(create_test_cards(2), HashMap::new());
        assert_eq!(deck.status(), SessionState::Ready);
        assert_eq!(deck.start_session().unwrap(), SessionState::InSession);
        assert!(matches!(deck.start_session(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_full_deck_session_graded_correct() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 7);
        deck.load(create_test_cards(5), HashMap::new());
        deck.start_session().unwrap();

        let all: Vec<String> = (0..5).map(|i| format!("word {}", i)).collect();
        assert_eq!(deck.session_keys().len(), 5);
        assert_eq!(sorted(deck.session_keys()), all);

        for _ in 0..5 {
            deck.reveal().unwrap();
            deck.grade(Rating::Correct).unwrap();
        }
        assert_eq!(deck.status(), SessionState::Finished);
        for key in &all {
            assert!(deck.card_state(key).unwrap().next_due > today());
            assert_eq!(deck.outcomes()[key], Outcome::Correct);
        }
    }

    #[test]
    fn test_only_due_cards_are_queued() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 3);
        let mut states = HashMap::new();
        states.insert("word 1".to_string(), due_in(1));
        states.insert("word 3".to_string(), due_in(30));
        // overdue counts as due
        let mut overdue = CardState::new(today());
        overdue.next_due = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        states.insert("word 4".to_string(), overdue);

        deck.load(create_test_cards(5), states);
        deck.start_session().unwrap();

        assert_eq!(deck.progress(), (1, 3));
        assert_eq!(
            sorted(deck.session_keys()),
            vec!["word 0", "word 2", "word 4"]
        );
    }

    #[test]
    fn test_advance_visits_each_card_once() {
        let clock = FixedClock::new(today());
        for seed in 0..20 {
            let mut deck = selector(&clock, seed);
            deck.load(create_test_cards(8), HashMap::new());
            deck.start_session().unwrap();

            let mut visited = vec![deck.current_card().unwrap().key.clone()];
            for _ in 0..8 {
                deck.advance().unwrap();
                if let Some(card) = deck.current_card() {
                    visited.push(card.key.clone());
                }
            }

            assert_eq!(deck.status(), SessionState::Finished);
            assert_eq!(visited.len(), 8);
            let unique: HashSet<_> = visited.iter().collect();
            assert_eq!(unique.len(), 8);
            assert_eq!(deck.shown_count(), 8);
        }
    }

    #[test]
    fn test_loading_twice_gives_same_due_set() {
        let clock = FixedClock::new(today());
        let mut states = HashMap::new();
        states.insert("word 2".to_string(), due_in(4));

        let mut deck = selector(&clock, 11);
        deck.load(create_test_cards(6), states.clone());
        deck.start_session().unwrap();
        let first = sorted(deck.session_keys());

        deck.load(create_test_cards(6), states);
        assert_eq!(deck.status(), SessionState::Ready);
        deck.start_session().unwrap();
        assert_eq!(sorted(deck.session_keys()), first);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_nothing_due_finishes_immediately() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 5);
        let states = create_test_cards(2)
            .into_iter()
            .map(|card| (card.key, due_in(2)))
            .collect();

        deck.load(create_test_cards(2), states);
        assert_eq!(deck.start_session().unwrap(), SessionState::Finished);
        assert_eq!(deck.progress(), (0, 0));
        assert!(deck.current_card().is_none());
    }

    #[test]
    fn test_empty_deck_cannot_start() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 5);
        deck.load(Vec::new(), HashMap::new());
        assert!(matches!(deck.start_session(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_grade_requires_revealed_answer() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 2);
        deck.load(create_test_cards(3), HashMap::new());
        deck.start_session().unwrap();

        assert!(matches!(deck.grade(Rating::Correct), Err(Error::InvalidState(_))));
        // nothing changed
        assert_eq!(deck.progress(), (1, 3));
        assert!(deck.outcomes().is_empty());

        assert!(deck.toggle_answer().unwrap());
        assert!(deck.answer().is_some());
        assert!(!deck.toggle_answer().unwrap());
        assert!(deck.answer().is_none());
    }

    #[test]
    fn test_grade_wrong_resets_and_advances() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 2);
        deck.load(create_test_cards(3), HashMap::new());
        deck.start_session().unwrap();

        let key = deck.current_card().unwrap().key.clone();
        deck.reveal().unwrap();
        let graded = deck.grade(Rating::Wrong).unwrap();

        assert_eq!(graded.key, key);
        assert_eq!(graded.outcome, Outcome::Wrong);
        assert_eq!(graded.state.interval, 1);
        assert_eq!(graded.state.repetitions, 0);
        assert!(graded.state.ease_factor < 2.5);
        assert_eq!(deck.card_state(&key).unwrap(), &graded.state);
        assert_eq!(deck.progress(), (2, 3));
        assert!(!deck.is_revealed());
    }

    #[test]
    fn test_grade_with_raw_quality() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 2);
        deck.load(create_test_cards(1), HashMap::new());
        deck.start_session().unwrap();
        deck.reveal().unwrap();

        let graded = deck.grade(Quality::new(3).unwrap()).unwrap();
        assert_eq!(graded.outcome, Outcome::Correct);
        assert_eq!(deck.status(), SessionState::Finished);
        assert!(matches!(deck.grade(Rating::Correct), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_retreat_clamps_at_first_card() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 9);
        deck.load(create_test_cards(3), HashMap::new());
        deck.start_session().unwrap();

        let first = deck.current_card().unwrap().key.clone();
        deck.retreat().unwrap();
        assert_eq!(deck.current_card().unwrap().key, first);

        deck.advance().unwrap();
        deck.reveal().unwrap();
        deck.retreat().unwrap();
        assert_eq!(deck.current_card().unwrap().key, first);
        assert!(!deck.is_revealed());
    }

    #[test]
    fn test_restart_reevaluates_due_set() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 4);
        deck.load(create_test_cards(4), HashMap::new());
        deck.start_session().unwrap();

        // grade two cards correct, leave the rest
        let mut graded = Vec::new();
        for _ in 0..2 {
            deck.reveal().unwrap();
            graded.push(deck.grade(Rating::Correct).unwrap().key);
        }

        deck.restart().unwrap();
        let keys: Vec<String> = deck.session_keys().into_iter().map(String::from).collect();
        assert_eq!(keys.len(), 2);
        for key in &graded {
            assert!(!keys.contains(key));
        }

        // next day everything graded yesterday is due again
        clock.advance_days(1);
        deck.restart().unwrap();
        assert_eq!(deck.session_keys().len(), 4);
    }

    #[test]
    fn test_same_seed_same_order() {
        let clock = FixedClock::new(today());
        let mut a = selector(&clock, 42);
        let mut b = selector(&clock, 42);
        a.load(create_test_cards(10), HashMap::new());
        b.load(create_test_cards(10), HashMap::new());
        a.start_session().unwrap();
        b.start_session().unwrap();
        assert_eq!(a.session_keys(), b.session_keys());
    }

    #[test]
    fn test_no_shuffle_keeps_source_order() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 42);
        deck.load(create_test_cards(4), HashMap::new());
        deck.set_shuffle(false).unwrap();
        deck.start_session().unwrap();
        assert_eq!(
            deck.session_keys(),
            vec!["word 0", "word 1", "word 2", "word 3"]
        );

        // toggling back on rebuilds the running session
        assert!(deck.toggle_shuffle().unwrap());
        assert_eq!(deck.status(), SessionState::InSession);
        assert_eq!(deck.progress(), (1, 4));
    }

    #[test]
    fn test_direction_swaps_prompt_and_answer() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1);
        deck.load(vec![Card::new("물", "water")], HashMap::new());
        deck.start_session().unwrap();

        assert_eq!(deck.prompt(), Some("물"));
        deck.reveal().unwrap();
        assert_eq!(deck.answer(), Some("water"));

        assert_eq!(deck.toggle_direction(), Direction::Reverse);
        assert!(!deck.is_revealed());
        assert_eq!(deck.prompt(), Some("water"));
        deck.reveal().unwrap();
        assert_eq!(deck.answer(), Some("물"));

        // identity is still the key
        let graded = deck.grade(Rating::Correct).unwrap();
        assert_eq!(graded.key, "물");
    }

    #[test]
    fn test_load_dedups_and_keeps_foreign_states() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1);
        let mut states = HashMap::new();
        states.insert("other deck word".to_string(), due_in(10));

        let cards = vec![
            Card::new("a", "first"),
            Card::new("b", "bee").with_result(Some(Outcome::Wrong)),
            Card::new("a", "second"),
        ];
        deck.load(cards, states);

        assert_eq!(deck.cards().len(), 2);
        assert_eq!(deck.cards()[0].value, "first");
        assert!(deck.states().contains_key("other deck word"));
        assert_eq!(deck.card_state("a").unwrap(), &CardState::new(today()));
        assert!(matches!(deck.card_state("zzz"), Err(Error::NotFound(_))));

        let list = deck.card_list();
        assert_eq!(list[0].1, None);
        assert_eq!(list[1].1, Some(Outcome::Wrong));
    }

    #[test]
    fn test_load_raises_ease_factor_to_floor() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1);
        let mut states = HashMap::new();
        let mut low = due_in(0);
        low.ease_factor = 0.5;
        low.interval = 10;
        low.repetitions = 3;
        states.insert("word 0".to_string(), low);
        let mut foreign = due_in(5);
        foreign.ease_factor = f64::NAN;
        states.insert("elsewhere".to_string(), foreign);

        deck.load(create_test_cards(1), states);
        assert_eq!(deck.card_state("word 0").unwrap().ease_factor, MIN_EASE_FACTOR);
        assert_eq!(deck.card_state("elsewhere").unwrap().ease_factor, MIN_EASE_FACTOR);

        deck.start_session().unwrap();
        deck.reveal().unwrap();
        let graded = deck.grade(Rating::Correct).unwrap();
        // round(10 * 1.3)
        assert_eq!(graded.state.interval, 13);
        assert_eq!(graded.state.repetitions, 4);
        assert!(graded.state.ease_factor >= MIN_EASE_FACTOR);
    }

    #[test]
    fn test_restore_outcomes_keeps_card_results() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1);
        let cards = vec![
            Card::new("a", "ay"),
            Card::new("b", "bee").with_result(Some(Outcome::Wrong)),
            Card::new("c", "sea"),
        ];
        deck.load(cards, HashMap::new());

        let saved = vec![
            ("a".to_string(), Outcome::Correct),
            ("b".to_string(), Outcome::Correct),
            ("not in deck".to_string(), Outcome::Wrong),
        ];
        assert_eq!(deck.restore_outcomes(saved), 1);

        let list = deck.card_list();
        assert_eq!(list[0].1, Some(Outcome::Correct));
        assert_eq!(list[1].1, Some(Outcome::Wrong));
        assert_eq!(list[2].1, None);
        assert!(!deck.outcomes().contains_key("not in deck"));
    }

    /// Schedules every review a fixed number of days out.
    struct FixedInterval(u32);

    impl Scheduler for FixedInterval {
        fn review(&self, state: &CardState, _quality: Quality, today: NaiveDate) -> CardState {
            CardState {
                interval: self.0,
                next_due: today.checked_add_days(Days::new(u64::from(self.0))).unwrap(),
                ..state.clone()
            }
        }
    }

    #[test]
    fn test_grade_uses_the_given_scheduler() {
        let clock = FixedClock::new(today());
        let mut deck = selector(&clock, 1).with_scheduler(Box::new(FixedInterval(3)));
        deck.load(create_test_cards(1), HashMap::new());
        deck.start_session().unwrap();
        deck.reveal().unwrap();

        let graded = deck.grade(Rating::Wrong).unwrap();
        assert_eq!(graded.state.interval, 3);
        assert_eq!(graded.state.repetitions, 0);
        assert_eq!(graded.state.ease_factor, 2.5);
        assert_eq!(graded.state.next_due, NaiveDate::from_ymd_opt(2025, 4, 13).unwrap());
        assert_eq!(graded.outcome, Outcome::Wrong);
    }
}
