use super::ids::ChampionId;

/// One open comparison view: a single champion, or two side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMode {
    Normal,
    Vs,
}

impl TabMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabMode::Normal => "normal",
            TabMode::Vs => "vs",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(TabMode::Normal),
            "vs" => Some(TabMode::Vs),
            _ => None,
        }
    }

    /// How many champions a tab of this mode must hold.
    pub fn champion_count(&self) -> usize {
        match self {
            TabMode::Normal => 1,
            TabMode::Vs => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub mode: TabMode,
    pub champions: Vec<ChampionId>,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChampion {
    pub id: ChampionId,
    pub key: Option<String>,
}
