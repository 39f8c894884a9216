use crate::{Card, Catalog, Event, EventBus, RebuildReason, RngState};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Fixed capacity of the hold row.
pub const HOLD_LIMIT: usize = 5;

/// Derived view of where a session stands. `ReshuffleQueued` wins over
/// `CardUp`: the queued rebuild fires on the next draw regardless of the
/// face-up card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Idle,
    CardUp,
    ReshuffleQueued,
}

/// The deck engine. All mutation goes through the four action methods;
/// everything else is read-only. At every observable instant the deck,
/// discard pile, hold row and current slot together hold each catalog
/// card exactly once.
#[derive(Debug)]
pub struct SessionState {
    catalog: Catalog,
    rng: RngState,
    deck: VecDeque<Card>,
    discard: Vec<Card>,
    held: Vec<Card>,
    current: Option<Card>,
    pending_reshuffle: bool,
}

impl SessionState {
    pub fn new(catalog: Catalog, rng: RngState) -> Self {
        let mut session = Self {
            catalog,
            rng,
            deck: VecDeque::new(),
            discard: Vec::new(),
            held: Vec::new(),
            current: None,
            pending_reshuffle: false,
        };
        session.rebuild_deck();
        session
    }

    /// Draw the next card. With a reshuffle queued this instead rebuilds
    /// the deck and stops, so the rebuild is its own user-visible step; a
    /// face-up card is discarded first; an empty deck is refilled from the
    /// catalog minus the hold row.
    pub fn draw(&mut self, events: &mut EventBus) {
        match self.phase() {
            Phase::ReshuffleQueued => {
                self.rebuild_deck();
                events.push(Event::DeckRebuilt {
                    reason: RebuildReason::QueuedReshuffle,
                    deck_size: self.deck.len(),
                    held_out: self.held.len(),
                });
                self.debug_validate();
                return;
            }
            Phase::CardUp => self.move_current_to_discard(true, events),
            Phase::Idle => {}
        }
        if self.deck.is_empty() {
            self.rebuild_deck();
            events.push(Event::DeckRebuilt {
                reason: RebuildReason::DeckExhausted,
                deck_size: self.deck.len(),
                held_out: self.held.len(),
            });
        }
        let Some(card) = self.deck.pop_front() else {
            // Every catalog card is in the hold row (or the catalog is
            // empty); the turn ends with nothing face up.
            self.debug_validate();
            return;
        };
        events.push(Event::CardDrawn { card: card.clone() });
        if card.reshuffle {
            self.pending_reshuffle = true;
            events.push(Event::ReshuffleQueued {
                card_id: card.id.clone(),
                name: card.name.clone(),
            });
        }
        self.current = Some(card);
        self.debug_validate();
    }

    /// Move the face-up card to the hold row. No-op unless a card is up,
    /// its timing is holdable and the row has a free slot.
    pub fn hold_current(&mut self, events: &mut EventBus) {
        if !self.can_hold_current() {
            return;
        }
        let Some(card) = self.current.take() else {
            return;
        };
        let slot = self.held.len();
        events.push(Event::CardHeld {
            card: card.clone(),
            slot,
        });
        self.held.push(card);
        self.debug_validate();
    }

    /// Move the face-up card to the discard pile. No-op with nothing up.
    pub fn discard_current(&mut self, events: &mut EventBus) {
        self.move_current_to_discard(false, events);
        self.debug_validate();
    }

    /// Remove the held card at `index` and discard it, keeping the rest of
    /// the row in order. Out-of-range indices are ignored.
    pub fn discard_held(&mut self, index: usize, events: &mut EventBus) {
        if index >= self.held.len() {
            return;
        }
        let card = self.held.remove(index);
        events.push(Event::HeldDiscarded {
            card: card.clone(),
            slot: index,
        });
        self.discard.push(card);
        self.debug_validate();
    }

    pub fn phase(&self) -> Phase {
        if self.pending_reshuffle {
            Phase::ReshuffleQueued
        } else if self.current.is_some() {
            Phase::CardUp
        } else {
            Phase::Idle
        }
    }

    pub fn can_hold_current(&self) -> bool {
        match &self.current {
            Some(card) => card.holdable() && self.held.len() < HOLD_LIMIT,
            None => false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn deck_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn discard_cards(&self) -> &[Card] {
        &self.discard
    }

    pub fn held(&self) -> &[Card] {
        &self.held
    }

    pub fn current(&self) -> Option<&Card> {
        self.current.as_ref()
    }

    pub fn pending_reshuffle(&self) -> bool {
        self.pending_reshuffle
    }

    /// Checks the partition invariant: deck + discard + hold + current is
    /// the catalog, each card exactly once.
    pub fn partition_intact(&self) -> bool {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let in_play = self
            .deck
            .iter()
            .chain(self.discard.iter())
            .chain(self.held.iter())
            .chain(self.current.iter());
        for card in in_play {
            *counts.entry(card.id.as_str()).or_insert(0) += 1;
        }
        counts.len() == self.catalog.len()
            && self
                .catalog
                .cards()
                .iter()
                .all(|card| counts.get(card.id.as_str()) == Some(&1))
    }

    /// Reset used by init, the queued reshuffle and the exhaustion refill:
    /// deck becomes a fresh shuffle of catalog minus held, discard history
    /// is dropped, the current slot and the flag are cleared. The hold row
    /// is untouched.
    fn rebuild_deck(&mut self) {
        let mut pool = self.reshuffle_pool();
        self.rng.shuffle(&mut pool);
        self.deck = VecDeque::from(pool);
        self.discard.clear();
        self.current = None;
        self.pending_reshuffle = false;
    }

    fn reshuffle_pool(&self) -> Vec<Card> {
        let held_ids: HashSet<&str> = self.held.iter().map(|card| card.id.as_str()).collect();
        self.catalog
            .cards()
            .iter()
            .filter(|card| !held_ids.contains(card.id.as_str()))
            .cloned()
            .collect()
    }

    fn move_current_to_discard(&mut self, auto: bool, events: &mut EventBus) {
        let Some(card) = self.current.take() else {
            return;
        };
        events.push(Event::CardDiscarded {
            card: card.clone(),
            auto,
        });
        self.discard.push(card);
    }

    fn debug_validate(&self) {
        debug_assert!(self.held.len() <= HOLD_LIMIT, "hold row over capacity");
        debug_assert!(self.partition_intact(), "card partition broken");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, timing: &str, reshuffle: bool) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            group: "Neutral".to_string(),
            timing: timing.to_string(),
            effect: String::new(),
            reshuffle,
        }
    }

    fn session(cards: Vec<Card>) -> SessionState {
        let catalog = Catalog::new(cards).expect("catalog");
        SessionState::new(catalog, RngState::from_seed(99))
    }

    #[test]
    fn new_session_starts_idle_with_full_deck() {
        let state = session(vec![
            card("a", "Immediate", false),
            card("b", "Immediate", false),
        ]);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.deck_len(), 2);
        assert_eq!(state.discard_len(), 0);
        assert!(state.current().is_none());
        assert!(state.partition_intact());
    }

    #[test]
    fn phase_tracks_current_and_queue() {
        let mut state = session(vec![card("a", "Immediate", true)]);
        let mut events = EventBus::default();
        state.draw(&mut events);
        assert_eq!(state.phase(), Phase::ReshuffleQueued);
        state.draw(&mut events);
        assert_eq!(state.phase(), Phase::Idle);
        state.draw(&mut events);
        assert_eq!(state.phase(), Phase::ReshuffleQueued);
    }

    #[test]
    fn can_hold_requires_card_timing_and_space() {
        let mut state = session(vec![card("a", "Hold", false)]);
        assert!(!state.can_hold_current());
        let mut events = EventBus::default();
        state.draw(&mut events);
        assert!(state.can_hold_current());
        state.hold_current(&mut events);
        assert!(!state.can_hold_current());
        assert_eq!(state.held().len(), 1);
    }
}
