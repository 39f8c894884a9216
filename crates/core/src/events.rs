use crate::Card;
use serde::{Deserialize, Serialize};

/// Which path rebuilt the deck.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RebuildReason {
    DeckExhausted,
    QueuedReshuffle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    DeckRebuilt {
        reason: RebuildReason,
        deck_size: usize,
        held_out: usize,
    },
    CardDrawn { card: Card },
    ReshuffleQueued { card_id: String, name: String },
    CardDiscarded { card: Card, auto: bool },
    CardHeld { card: Card, slot: usize },
    HeldDiscarded { card: Card, slot: usize },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
