use crate::Card;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate card id {0:?}")]
    DuplicateId(String),
}

/// The full ordered set of cards for a session. Never mutated after
/// construction; every deck rebuild draws from this.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(CatalogError::DuplicateId(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            group: "Neutral".to_string(),
            timing: "Immediate".to_string(),
            effect: String::new(),
            reshuffle: false,
        }
    }

    #[test]
    fn accepts_unique_ids() {
        let catalog = Catalog::new(vec![card("a"), card("b")]).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("b").map(|c| c.id.as_str()), Some("b"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![card("a"), card("a")]).expect_err("duplicate must fail");
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = Catalog::new(Vec::new()).expect("catalog");
        assert!(catalog.is_empty());
        assert!(catalog.get("missing").is_none());
    }
}
