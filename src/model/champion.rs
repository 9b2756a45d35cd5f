use super::ids::ChampionId;

#[derive(Debug, Clone)]
pub struct Champion {
    pub id: ChampionId,
    /// Numeric Data Dragon key, kept as the string it arrives as ("103").
    pub key: String,
    /// Display name in the active language.
    pub name: String,
    pub title: String,
    /// Korean display name, when the ko_KR list could be joined in.
    pub hangul: Option<String>,
    pub stats: ChampionStats,
}

/// Level-1 base stats from champion.json, with per-level growth where the
/// comparison view shows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionStats {
    pub hp: f64,
    pub hp_per_level: f64,
    pub mp: f64,
    pub move_speed: f64,
    pub armor: f64,
    pub armor_per_level: f64,
    pub spell_block: f64,
    pub spell_block_per_level: f64,
    pub attack_damage: f64,
    pub attack_damage_per_level: f64,
    pub attack_speed: f64,
    pub attack_range: f64,
}

/// Ability data from the per-champion endpoint. Spells arrive in Q/W/E/R
/// order.
#[derive(Debug, Clone)]
pub struct ChampionDetail {
    pub passive_name: Option<String>,
    pub spells: Vec<Spell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spell {
    pub name: String,
    /// Cooldown in seconds per rank; the length is the spell's max rank.
    pub cooldowns: Vec<f64>,
}
