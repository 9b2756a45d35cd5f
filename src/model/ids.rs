use std::fmt::Display;

/// Stable Data Dragon champion identifier, e.g. "Ahri" or "MonkeyKing".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChampionId(String);

impl ChampionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChampionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChampionId {
    fn from(value: String) -> Self {
        ChampionId(value)
    }
}

impl From<&str> for ChampionId {
    fn from(value: &str) -> Self {
        ChampionId(value.to_string())
    }
}
