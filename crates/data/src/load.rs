use crate::schema::RawCard;
use anyhow::Context;
use omendeck_core::{Card, Catalog};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CARDS_ENV: &str = "OMENDECK_CARDS";
const CARDS_FILE: &str = "cards.json";

/// Read a catalog file, fill omitted fields, and validate id uniqueness.
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw: Vec<RawCard> = load_json(path)?;
    let catalog = Catalog::new(normalize_cards(raw))
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(catalog)
}

/// Catalog location when no `--cards` flag is given. The OMENDECK_CARDS
/// variable overrides the bundled file.
pub fn default_cards_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CARDS_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from("assets").join(CARDS_FILE)
}

/// Fill omitted fields and mint ids for records that have none. Authored
/// ids win; minted ids skip any the file already uses.
pub fn normalize_cards(raw: Vec<RawCard>) -> Vec<Card> {
    let taken: HashSet<&str> = raw
        .iter()
        .filter_map(|card| card.id.as_deref())
        .collect();
    let mut next = 1usize;
    let mut out = Vec::with_capacity(raw.len());
    for card in &raw {
        let id = match &card.id {
            Some(id) => id.clone(),
            None => mint_id(&taken, &mut next),
        };
        out.push(Card {
            id,
            name: card.name.clone().unwrap_or_else(|| "Untitled".to_string()),
            group: card.group.clone().unwrap_or_else(|| "Neutral".to_string()),
            timing: card
                .timing
                .clone()
                .unwrap_or_else(|| "Immediate".to_string()),
            effect: card.effect.clone().unwrap_or_default(),
            reshuffle: card.reshuffle.unwrap_or(false),
        });
    }
    out
}

fn mint_id(taken: &HashSet<&str>, next: &mut usize) -> String {
    loop {
        let candidate = format!("card-{next}");
        *next += 1;
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>) -> RawCard {
        RawCard {
            id: id.map(str::to_string),
            ..RawCard::default()
        }
    }

    #[test]
    fn fills_defaults_for_sparse_records() {
        let cards = normalize_cards(vec![raw(None)]);
        assert_eq!(cards[0].id, "card-1");
        assert_eq!(cards[0].name, "Untitled");
        assert_eq!(cards[0].group, "Neutral");
        assert_eq!(cards[0].timing, "Immediate");
        assert_eq!(cards[0].effect, "");
        assert!(!cards[0].reshuffle);
    }

    #[test]
    fn keeps_authored_empty_strings() {
        let card = RawCard {
            id: Some("blank".to_string()),
            name: Some(String::new()),
            timing: Some(String::new()),
            ..RawCard::default()
        };
        let cards = normalize_cards(vec![card]);
        assert_eq!(cards[0].name, "");
        assert_eq!(cards[0].timing, "");
        assert!(!cards[0].holdable());
    }

    #[test]
    fn minted_ids_skip_authored_ones() {
        let cards = normalize_cards(vec![raw(None), raw(Some("card-1")), raw(None)]);
        let ids: Vec<&str> = cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["card-2", "card-1", "card-3"]);
    }

    #[test]
    fn null_fields_read_as_absent() {
        let raw: Vec<RawCard> = serde_json::from_str(
            r#"[
                {"id": "omen", "name": null, "timing": "hold", "reshuffle": true},
                {"id": "calm", "reshuffle": null}
            ]"#,
        )
        .expect("parse");
        let cards = normalize_cards(raw);
        assert_eq!(cards[0].name, "Untitled");
        assert!(cards[0].holdable());
        assert!(cards[0].reshuffle);
        assert_eq!(cards[1].name, "Untitled");
        assert!(!cards[1].reshuffle);
    }

    #[test]
    fn env_override_redirects_the_default_path() {
        // Process env is shared across parallel tests; keep this the only
        // test that touches CARDS_ENV.
        std::env::set_var(CARDS_ENV, "custom/cards.json");
        assert_eq!(default_cards_path(), PathBuf::from("custom/cards.json"));
        std::env::remove_var(CARDS_ENV);
        assert_eq!(
            default_cards_path(),
            PathBuf::from("assets").join("cards.json")
        );
    }

    #[test]
    fn load_reports_duplicate_ids_with_the_path() {
        let dir = std::env::temp_dir().join(format!(
            "omendeck_dup_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("cards.json");
        fs::write(&path, r#"[{"id": "twin"}, {"id": "twin"}]"#).expect("write cards");

        let err = load_catalog(&path).expect_err("duplicate ids must fail");
        let chain = format!("{err:#}");
        assert!(chain.contains("twin"));
        assert!(chain.contains("cards.json"));
        let _ = fs::remove_dir_all(&dir);
    }
}
