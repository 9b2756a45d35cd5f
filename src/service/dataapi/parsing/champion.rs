use json::{object::Object, JsonValue};

use crate::model::champion::{Champion, ChampionDetail, ChampionStats, Spell};

use super::ParsingError;

/// versions.json is a list of version strings, newest first.
pub fn parse_latest_version(json: &JsonValue) -> Result<String, ParsingError> {
    if let JsonValue::Array(array) = json {
        let latest = array
            .first()
            .and_then(|v| v.as_str())
            .ok_or(ParsingError::InvalidType("version entry".into()))?;
        return Ok(latest.to_string());
    }
    Err(ParsingError::InvalidType("versions root".into()))
}

/// champion.json carries champions as an object keyed by id under "data".
/// Entry order is not meaningful; the result is sorted by id for stable
/// listings.
pub fn parse_champions(json: &JsonValue) -> Result<Vec<Champion>, ParsingError> {
    if let JsonValue::Object(root) = json {
        if let JsonValue::Object(data) = &root["data"] {
            let mut champions = Vec::new();
            for (_, entry) in data.iter() {
                if let JsonValue::Object(champ_obj) = entry {
                    champions.push(parse_champ_obj(champ_obj)?);
                } else {
                    return Err(ParsingError::InvalidType("champ entry".into()));
                }
            }
            champions.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
            return Ok(champions);
        }
        return Err(ParsingError::InvalidType("data".into()));
    }
    Err(ParsingError::InvalidType("root".into()))
}

/// champion/{id}.json has the same "data" envelope, with a single entry
/// carrying spells (Q/W/E/R order) and the passive.
pub fn parse_champion_detail(json: &JsonValue, id: &str) -> Result<ChampionDetail, ParsingError> {
    if let JsonValue::Object(root) = json {
        if let JsonValue::Object(champ_obj) = &root["data"][id] {
            let passive_name = champ_obj["passive"]["name"].as_str().map(str::to_string);

            let spells = match &champ_obj["spells"] {
                JsonValue::Array(entries) => entries
                    .iter()
                    .map(parse_spell)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(ParsingError::InvalidType("spells".into())),
            };

            return Ok(ChampionDetail { passive_name, spells });
        }
        return Err(ParsingError::InvalidType("data entry".into()));
    }
    Err(ParsingError::InvalidType("root".into()))
}

fn parse_spell(entry: &JsonValue) -> Result<Spell, ParsingError> {
    let name = entry["name"]
        .as_str()
        .ok_or(ParsingError::InvalidType("spell name".into()))?;

    let cooldowns = match &entry["cooldown"] {
        JsonValue::Array(ranks) => ranks
            .iter()
            .map(|rank| {
                rank.as_f64()
                    .ok_or(ParsingError::InvalidType("spell cooldown".into()))
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(ParsingError::InvalidType("spell cooldown".into())),
    };

    Ok(Spell {
        name: name.to_string(),
        cooldowns,
    })
}

fn parse_champ_obj(obj: &Object) -> Result<Champion, ParsingError> {
    let id = obj["id"].as_str().ok_or(ParsingError::InvalidType("id".into()))?;
    let key = obj["key"].as_str().ok_or(ParsingError::InvalidType("key".into()))?;
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("name".into()))?;
    let title = obj["title"].as_str().ok_or(ParsingError::InvalidType("title".into()))?;

    let stats = match &obj["stats"] {
        JsonValue::Object(stats_obj) => parse_stats_obj(stats_obj)?,
        _ => return Err(ParsingError::InvalidType("stats".into())),
    };

    Ok(Champion {
        id: id.into(),
        key: key.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        hangul: None,
        stats,
    })
}

fn parse_stats_obj(obj: &Object) -> Result<ChampionStats, ParsingError> {
    let field = |name: &str| {
        obj[name]
            .as_f64()
            .ok_or(ParsingError::InvalidType(format!("stats.{}", name)))
    };

    Ok(ChampionStats {
        hp: field("hp")?,
        hp_per_level: field("hpperlevel")?,
        mp: field("mp")?,
        move_speed: field("movespeed")?,
        armor: field("armor")?,
        armor_per_level: field("armorperlevel")?,
        spell_block: field("spellblock")?,
        spell_block_per_level: field("spellblockperlevel")?,
        attack_damage: field("attackdamage")?,
        attack_damage_per_level: field("attackdamageperlevel")?,
        attack_speed: field("attackspeed")?,
        attack_range: field("attackrange")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AHRI_STATS: &str = r#"{
        "hp": 590, "hpperlevel": 104, "mp": 418, "movespeed": 330,
        "armor": 21, "armorperlevel": 4.7,
        "spellblock": 30, "spellblockperlevel": 1.3,
        "attackdamage": 53, "attackdamageperlevel": 3,
        "attackspeed": 0.668, "attackrange": 550
    }"#;

    #[test]
    fn parses_the_latest_version() {
        let json = json::parse(r#"["15.24.1", "15.23.1"]"#).unwrap();
        assert_eq!(parse_latest_version(&json).unwrap(), "15.24.1");
    }

    #[test]
    fn rejects_a_non_array_versions_payload() {
        let json = json::parse(r#"{"latest": "15.24.1"}"#).unwrap();
        assert!(parse_latest_version(&json).is_err());
    }

    #[test]
    fn parses_champions_sorted_by_id() {
        let json = json::parse(&format!(
            r#"{{
                "type": "champion",
                "data": {{
                    "Zed": {{"id": "Zed", "key": "238", "name": "Zed",
                             "title": "the Master of Shadows", "stats": {stats}}},
                    "Ahri": {{"id": "Ahri", "key": "103", "name": "Ahri",
                              "title": "the Nine-Tailed Fox", "stats": {stats}}}
                }}
            }}"#,
            stats = AHRI_STATS
        ))
        .unwrap();

        let champs = parse_champions(&json).unwrap();
        assert_eq!(champs.len(), 2);
        assert_eq!(champs[0].id.as_str(), "Ahri");
        assert_eq!(champs[0].key, "103");
        assert_eq!(champs[0].stats.hp, 590.0);
        assert_eq!(champs[0].stats.attack_speed, 0.668);
        assert_eq!(champs[1].name, "Zed");
    }

    #[test]
    fn rejects_a_champion_without_a_name() {
        let json = json::parse(&format!(
            r#"{{"data": {{"Ahri": {{"id": "Ahri", "key": "103", "stats": {}}}}}}}"#,
            AHRI_STATS
        ))
        .unwrap();
        assert!(parse_champions(&json).is_err());
    }

    #[test]
    fn rejects_a_champion_without_stats() {
        let json = json::parse(
            r#"{"data": {"Ahri": {"id": "Ahri", "key": "103", "name": "Ahri",
                                  "title": "the Nine-Tailed Fox"}}}"#,
        )
        .unwrap();
        assert!(parse_champions(&json).is_err());
    }

    #[test]
    fn parses_a_champion_detail_with_spells() {
        let json = json::parse(
            r#"{
                "data": {
                    "Ahri": {
                        "id": "Ahri",
                        "passive": {"name": "Essence Theft"},
                        "spells": [
                            {"id": "AhriQ", "name": "Orb of Deception",
                             "cooldown": [7, 7, 7, 7, 7]},
                            {"id": "AhriW", "name": "Fox-Fire",
                             "cooldown": [9, 8, 7, 6, 5]},
                            {"id": "AhriE", "name": "Charm",
                             "cooldown": [14, 14, 14, 14, 14]},
                            {"id": "AhriR", "name": "Spirit Rush",
                             "cooldown": [130, 105, 80]}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let detail = parse_champion_detail(&json, "Ahri").unwrap();
        assert_eq!(detail.passive_name.as_deref(), Some("Essence Theft"));
        assert_eq!(detail.spells.len(), 4);
        assert_eq!(detail.spells[1].name, "Fox-Fire");
        assert_eq!(detail.spells[1].cooldowns, vec![9.0, 8.0, 7.0, 6.0, 5.0]);
        assert_eq!(detail.spells[3].cooldowns.len(), 3);
    }

    #[test]
    fn rejects_a_detail_without_the_requested_entry() {
        let json = json::parse(r#"{"data": {"Zed": {"spells": []}}}"#).unwrap();
        assert!(parse_champion_detail(&json, "Ahri").is_err());
    }

    #[test]
    fn rejects_a_spell_with_a_malformed_cooldown() {
        let json = json::parse(
            r#"{"data": {"Ahri": {"spells": [
                {"id": "AhriQ", "name": "Orb of Deception", "cooldown": ["7", 7]}
            ]}}}"#,
        )
        .unwrap();
        assert!(parse_champion_detail(&json, "Ahri").is_err());
    }
}
