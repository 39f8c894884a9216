use anyhow::{Context, Result};
use omendeck_core::{
    Card, Event, EventBus, Phase, RebuildReason, RngState, SessionState, HOLD_LIMIT,
};
use omendeck_data::load_catalog;
use std::collections::VecDeque;
use std::path::PathBuf;

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Held,
    Events,
}

pub struct App {
    pub cards_path: PathBuf,
    pub session: SessionState,
    pub events: EventBus,
    pub focus: FocusPane,
    pub held_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(cards_path: PathBuf, seed: Option<u64>) -> Result<Self> {
        let catalog = load_catalog(&cards_path).context("load cards")?;
        let rng = match seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let session = SessionState::new(catalog, rng);
        let mut app = Self {
            cards_path,
            session,
            events: EventBus::default(),
            focus: FocusPane::Held,
            held_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "Draw a card to begin.".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_event_line(format!(
            "session started: {} cards, seed {}",
            app.session.catalog().len(),
            app.session.seed()
        ));
        Ok(app)
    }

    pub fn on_tick(&mut self) {}

    pub fn focus_label(&self, pane: FocusPane) -> &'static str {
        match pane {
            FocusPane::Held => "Held",
            FocusPane::Events => "Events",
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (FocusPane::Held, true) => FocusPane::Events,
            (FocusPane::Events, true) => FocusPane::Held,
            (FocusPane::Held, false) => FocusPane::Events,
            (FocusPane::Events, false) => FocusPane::Held,
        };
    }

    pub fn move_cursor(&mut self, down: bool) {
        match self.focus {
            FocusPane::Held => {
                let len = self.session.held().len();
                move_index(&mut self.held_cursor, len, down);
            }
            FocusPane::Events => {}
        }
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.focus {
            FocusPane::Held => self.play_held(),
            FocusPane::Events => {}
        }
    }

    pub fn draw_card(&mut self) {
        let was_queued = self.session.pending_reshuffle();
        self.session.draw(&mut self.events);
        let message = if was_queued {
            "deck reset; held cards stayed out".to_string()
        } else {
            match self.session.current() {
                Some(card) => format!("drew {}", card_label(card)),
                None => "no card to draw".to_string(),
            }
        };
        self.push_status(message);
        self.flush_events();
        self.normalize_cursors();
    }

    pub fn hold_card(&mut self) {
        if self.session.can_hold_current() {
            let label = self.session.current().map(card_label).unwrap_or_default();
            self.session.hold_current(&mut self.events);
            self.push_status(format!("held {label}"));
        } else {
            self.push_status(hold_refusal(&self.session));
        }
        self.flush_events();
        self.normalize_cursors();
    }

    pub fn discard_card(&mut self) {
        if self.session.current().is_none() {
            self.push_status("nothing is face up");
            return;
        }
        self.session.discard_current(&mut self.events);
        self.push_status("discarded");
        self.flush_events();
    }

    pub fn play_held(&mut self) {
        let Some(index) = self.held_index() else {
            self.push_status("no held card selected");
            return;
        };
        let label = card_label(&self.session.held()[index]);
        self.session.discard_held(index, &mut self.events);
        self.push_status(format!("played {label}"));
        self.flush_events();
        self.normalize_cursors();
    }

    pub fn discard_held(&mut self) {
        let Some(index) = self.held_index() else {
            self.push_status("no held card selected");
            return;
        };
        let label = card_label(&self.session.held()[index]);
        self.session.discard_held(index, &mut self.events);
        self.push_status(format!("discarded held {label}"));
        self.flush_events();
        self.normalize_cursors();
    }

    pub fn next_hint(&self) -> &'static str {
        match self.session.phase() {
            Phase::ReshuffleQueued => "d resets the deck",
            Phase::CardUp if self.session.can_hold_current() => "h holds this card",
            Phase::CardUp => "d draws again, x discards",
            Phase::Idle => "d draws a card",
        }
    }

    pub fn phase_label(&self) -> &'static str {
        match self.session.phase() {
            Phase::Idle => "idle",
            Phase::CardUp => "card up",
            Phase::ReshuffleQueued => "reshuffle queued",
        }
    }

    pub fn held_count_label(&self) -> String {
        format!("{}/{}", self.session.held().len(), HOLD_LIMIT)
    }

    pub fn held_slot_label(&self, index: usize) -> String {
        match self.session.held().get(index) {
            Some(card) => format!(
                "{}: [{}] {} ({}, {})",
                index + 1,
                card.id,
                card.name,
                card.group,
                card.timing
            ),
            None => format!("{}: (empty)", index + 1),
        }
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn held_index(&self) -> Option<usize> {
        let len = self.session.held().len();
        if len == 0 {
            return None;
        }
        Some(self.held_cursor.min(len - 1))
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }

    pub fn normalize_cursors(&mut self) {
        clamp_index(&mut self.held_cursor, self.session.held().len());
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

fn clamp_index(value: &mut usize, len: usize) {
    if len == 0 {
        *value = 0;
    } else if *value >= len {
        *value = len - 1;
    }
}

fn hold_refusal(session: &SessionState) -> &'static str {
    match session.current() {
        None => "nothing is face up",
        Some(card) if !card.holdable() => "only Hold-timing cards can be held",
        Some(_) => "hold is full",
    }
}

pub fn card_label(card: &Card) -> String {
    format!("[{}] {}", card.id, card.name)
}

fn format_event(event: &Event) -> String {
    match event {
        Event::DeckRebuilt {
            reason,
            deck_size,
            held_out,
        } => match reason {
            RebuildReason::QueuedReshuffle => {
                format!("deck reset: {deck_size} in, {held_out} held out")
            }
            RebuildReason::DeckExhausted => {
                format!("deck refilled: {deck_size} in, {held_out} held out")
            }
        },
        Event::CardDrawn { card } => format!("drew {}", card_label(card)),
        Event::ReshuffleQueued { card_id, name } => {
            format!("reshuffle queued by [{card_id}] {name}")
        }
        Event::CardDiscarded { card, auto: true } => {
            format!("auto-discarded {}", card_label(card))
        }
        Event::CardDiscarded { card, auto: false } => format!("discarded {}", card_label(card)),
        Event::CardHeld { card, slot } => {
            format!("held {} in slot {}", card_label(card), slot + 1)
        }
        Event::HeldDiscarded { card, slot } => {
            format!("released {} from slot {}", card_label(card), slot + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omendeck_core::Catalog;

    fn test_card(id: &str, timing: &str) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            group: "Neutral".to_string(),
            timing: timing.to_string(),
            effect: String::new(),
            reshuffle: false,
        }
    }

    fn test_app(cards: Vec<Card>) -> App {
        let catalog = Catalog::new(cards).expect("catalog");
        let session = SessionState::new(catalog, RngState::from_seed(5));
        App {
            cards_path: PathBuf::from("test-cards.json"),
            session,
            events: EventBus::default(),
            focus: FocusPane::Held,
            held_cursor: 0,
            event_log: VecDeque::new(),
            status_line: String::new(),
            show_help: false,
            should_quit: false,
        }
    }

    #[test]
    fn move_index_wraps_both_ways() {
        let mut idx = 0usize;
        move_index(&mut idx, 3, true);
        assert_eq!(idx, 1);
        move_index(&mut idx, 3, false);
        move_index(&mut idx, 3, false);
        assert_eq!(idx, 2);
        move_index(&mut idx, 0, true);
        assert_eq!(idx, 0);
    }

    #[test]
    fn clamp_index_recovers_from_shrunk_lists() {
        let mut idx = 4usize;
        clamp_index(&mut idx, 2);
        assert_eq!(idx, 1);
        clamp_index(&mut idx, 0);
        assert_eq!(idx, 0);
    }

    #[test]
    fn draw_then_hold_updates_log_and_row() {
        let mut app = test_app(vec![test_card("h1", "Hold")]);
        app.draw_card();
        assert!(app.status_line.starts_with("drew"));
        app.hold_card();
        assert_eq!(app.session.held().len(), 1);
        assert!(app
            .event_log
            .iter()
            .any(|line| line.contains("held [h1]")));
    }

    #[test]
    fn hold_refusal_names_the_gate() {
        let mut app = test_app(vec![test_card("a", "Immediate")]);
        app.hold_card();
        assert_eq!(app.status_line, "nothing is face up");
        app.draw_card();
        app.hold_card();
        assert_eq!(app.status_line, "only Hold-timing cards can be held");
        assert!(app.session.held().is_empty());
    }

    #[test]
    fn play_with_empty_row_is_refused() {
        let mut app = test_app(vec![test_card("a", "Immediate")]);
        app.play_held();
        assert_eq!(app.status_line, "no held card selected");
        assert_eq!(app.session.discard_len(), 0);
    }

    #[test]
    fn event_log_stays_bounded() {
        let mut app = test_app(vec![
            test_card("a", "Immediate"),
            test_card("b", "Immediate"),
        ]);
        for _ in 0..300 {
            app.draw_card();
        }
        assert!(app.event_log.len() <= MAX_EVENT_LOG);
    }
}
