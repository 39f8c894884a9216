use serde::Deserialize;

/// One card record as authored in the catalog file. Every field may be
/// omitted; loading fills the gaps. An explicit empty string is kept as
/// authored, only absent or null fields take the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCard {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub reshuffle: Option<bool>,
}
