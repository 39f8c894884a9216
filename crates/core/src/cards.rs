use serde::{Deserialize, Serialize};

/// One event card. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub group: String,
    pub timing: String,
    pub effect: String,
    pub reshuffle: bool,
}

impl Card {
    /// Only cards with a "Hold" timing may enter the hold row.
    pub fn holdable(&self) -> bool {
        self.timing.eq_ignore_ascii_case("hold")
    }

    pub fn group_kind(&self) -> GroupKind {
        GroupKind::classify(&self.group)
    }
}

/// Display category derived from the free-form `group` tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupKind {
    Good,
    MinorBad,
    MajorBad,
    Neutral,
}

impl GroupKind {
    /// Substring match, checked good before major before minor, so tags
    /// like "Major Setback" and "Minor Omen" land where authors expect.
    pub fn classify(group: &str) -> Self {
        let lowered = group.to_ascii_lowercase();
        if lowered.contains("good") {
            Self::Good
        } else if lowered.contains("major") {
            Self::MajorBad
        } else if lowered.contains("minor") {
            Self::MinorBad
        } else {
            Self::Neutral
        }
    }

    /// Stable lowercase label, also used as the web badge class.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::MinorBad => "minorbad",
            Self::MajorBad => "majorbad",
            Self::Neutral => "neutral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_timing(timing: &str) -> Card {
        Card {
            id: "t1".to_string(),
            name: "Test".to_string(),
            group: "Neutral".to_string(),
            timing: timing.to_string(),
            effect: String::new(),
            reshuffle: false,
        }
    }

    #[test]
    fn holdable_ignores_case() {
        assert!(card_with_timing("Hold").holdable());
        assert!(card_with_timing("hold").holdable());
        assert!(card_with_timing("HOLD").holdable());
        assert!(!card_with_timing("Immediate").holdable());
        assert!(!card_with_timing("Hold ").holdable());
    }

    #[test]
    fn classifies_groups_by_substring() {
        assert_eq!(GroupKind::classify("Good"), GroupKind::Good);
        assert_eq!(GroupKind::classify("good omen"), GroupKind::Good);
        assert_eq!(GroupKind::classify("Major Bad"), GroupKind::MajorBad);
        assert_eq!(GroupKind::classify("Minor Bad"), GroupKind::MinorBad);
        assert_eq!(GroupKind::classify("Neutral"), GroupKind::Neutral);
        assert_eq!(GroupKind::classify("Weather"), GroupKind::Neutral);
    }

    #[test]
    fn good_wins_over_major_and_minor() {
        assert_eq!(GroupKind::classify("Good (major)"), GroupKind::Good);
        assert_eq!(GroupKind::classify("major minor"), GroupKind::MajorBad);
    }
}
