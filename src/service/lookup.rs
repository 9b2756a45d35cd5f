use std::{collections::HashMap, fmt};

use crate::model::{champion::Champion, ids::ChampionId};

/// Champion lookup over one fetched list.
pub struct LookupService<'a> {
    champs: HashMap<ChampionId, &'a Champion>,
}

impl<'a> LookupService<'a> {
    pub fn new(champions: &'a [Champion]) -> Self {
        Self {
            champs: champions.iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn get_champion(&self, id: &ChampionId) -> Result<&'a Champion, IdNotFoundError> {
        match self.champs.get(id) {
            Some(champ) => Ok(*champ),
            None => Err(IdNotFoundError::Champ(id.clone())),
        }
    }

    /// Exact, case-insensitive match on id, display name, or Korean name.
    pub fn find_champion(&self, needle: &str) -> Option<&'a Champion> {
        let needle = needle.to_lowercase();
        self.champs.values().copied().find(|champ| {
            champ.id.as_str().to_lowercase() == needle
                || champ.name.to_lowercase() == needle
                || champ
                    .hangul
                    .as_deref()
                    .is_some_and(|hangul| hangul.to_lowercase() == needle)
        })
    }
}

#[derive(Debug)]
pub enum IdNotFoundError {
    Champ(ChampionId),
}

impl fmt::Display for IdNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdNotFoundError::Champ(id) => write!(f, "Champion ID not found: {}", id),
        }
    }
}
