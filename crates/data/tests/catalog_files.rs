use omendeck_core::{EventBus, GroupKind, RngState, SessionState};
use omendeck_data::load_catalog;
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn bundled_catalog_loads() {
    let catalog = load_catalog(&assets_root().join("cards.json")).expect("load cards");
    assert_eq!(catalog.len(), 24);
    let holdable = catalog.cards().iter().filter(|card| card.holdable()).count();
    assert_eq!(holdable, 5);
    let reshuffle = catalog.cards().iter().filter(|card| card.reshuffle).count();
    assert_eq!(reshuffle, 3);
}

#[test]
fn bundled_catalog_mints_missing_ids() {
    let catalog = load_catalog(&assets_root().join("cards.json")).expect("load cards");
    let sparse = catalog.get("card-1").expect("minted id");
    assert_eq!(sparse.name, "Strange Lights");
    assert_eq!(sparse.group, "Neutral");
    assert_eq!(sparse.timing, "Immediate");
    assert!(!sparse.reshuffle);
}

#[test]
fn bundled_groups_classify() {
    let catalog = load_catalog(&assets_root().join("cards.json")).expect("load cards");
    let kind = |id: &str| catalog.get(id).expect(id).group_kind();
    assert_eq!(kind("E01"), GroupKind::Good);
    assert_eq!(kind("E07"), GroupKind::MinorBad);
    assert_eq!(kind("E12"), GroupKind::MajorBad);
    assert_eq!(kind("E15"), GroupKind::Neutral);
}

#[test]
fn lowercase_hold_timing_counts_as_holdable() {
    let catalog = load_catalog(&assets_root().join("cards.json")).expect("load cards");
    assert!(catalog.get("E23").expect("E23").holdable());
}

#[test]
fn session_runs_through_a_reshuffle_on_bundled_cards() {
    let catalog = load_catalog(&assets_root().join("cards.json")).expect("load cards");
    let mut state = SessionState::new(catalog, RngState::from_seed(7));
    let mut events = EventBus::default();
    let mut guard = 0;
    while !state.pending_reshuffle() {
        state.draw(&mut events);
        guard += 1;
        assert!(guard < 100, "no reshuffle card surfaced");
    }
    state.draw(&mut events);
    assert!(state.current().is_none());
    assert_eq!(state.deck_len(), 24);
    assert!(state.partition_intact());
}
