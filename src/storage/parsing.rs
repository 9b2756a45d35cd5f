//! Parsers and serializers for the values persisted in the key-value store.
//! A stored value is untrusted input: it may predate the current schema or
//! have been edited by hand, so parsing doubles as structural validation and
//! is all-or-nothing per key.

use std::fmt;

use json::{object::Object, JsonValue};

use crate::model::{
    ids::ChampionId,
    tab::{SelectedChampion, Tab, TabMode},
};

/// Version of the stored data structures. Bump when a shape below changes
/// incompatibly; the guard then discards state written under older versions.
pub const DATA_STRUCTURE_VERSION: u32 = 1;

#[derive(Debug)]
pub enum ParseError {
    Json(json::Error),
    InvalidShape(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Json(err) => write!(f, "Stored value is not JSON: {}", err),
            ParseError::InvalidShape(what) => write!(f, "Stored value has invalid shape: {}", what),
        }
    }
}

impl From<json::Error> for ParseError {
    fn from(error: json::Error) -> Self {
        Self::Json(error)
    }
}

pub fn parse_tabs(raw: &str) -> Result<Vec<Tab>, ParseError> {
    let value = json::parse(raw)?;
    if let JsonValue::Array(array) = value {
        let mut tabs = Vec::with_capacity(array.len());
        for entry in &array {
            if let JsonValue::Object(obj) = entry {
                tabs.push(parse_tab_obj(obj)?);
            } else {
                return Err(ParseError::InvalidShape("tab entry".into()));
            }
        }
        return Ok(tabs);
    }
    Err(ParseError::InvalidShape("tab root".into()))
}

fn parse_tab_obj(obj: &Object) -> Result<Tab, ParseError> {
    let mode = obj["mode"]
        .as_str()
        .and_then(TabMode::from_str)
        .ok_or(ParseError::InvalidShape("mode".into()))?;

    let champions = if let JsonValue::Array(entries) = &obj["champions"] {
        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry
                .as_str()
                .ok_or(ParseError::InvalidShape("champion id".into()))?;
            ids.push(ChampionId::from(id));
        }
        ids
    } else {
        return Err(ParseError::InvalidShape("champions".into()));
    };

    if champions.len() != mode.champion_count() {
        return Err(ParseError::InvalidShape("champion count".into()));
    }

    let id = obj["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .ok_or(ParseError::InvalidShape("id".into()))?;

    Ok(Tab {
        mode,
        champions,
        id: id.to_string(),
    })
}

pub fn serialize_tabs(tabs: &[Tab]) -> String {
    let array = tabs
        .iter()
        .map(|tab| {
            let mut obj = Object::new();
            obj.insert("mode", tab.mode.as_str().into());
            obj.insert(
                "champions",
                JsonValue::Array(tab.champions.iter().map(|c| c.as_str().into()).collect()),
            );
            obj.insert("id", tab.id.as_str().into());
            JsonValue::Object(obj)
        })
        .collect();
    JsonValue::Array(array).dump()
}

pub fn parse_selected_champions(raw: &str) -> Result<Vec<SelectedChampion>, ParseError> {
    let value = json::parse(raw)?;
    if let JsonValue::Array(array) = value {
        let mut selected = Vec::with_capacity(array.len());
        for entry in &array {
            if let JsonValue::Object(obj) = entry {
                selected.push(parse_selected_obj(obj)?);
            } else {
                return Err(ParseError::InvalidShape("selection entry".into()));
            }
        }
        return Ok(selected);
    }
    Err(ParseError::InvalidShape("selection root".into()))
}

fn parse_selected_obj(obj: &Object) -> Result<SelectedChampion, ParseError> {
    let id = obj["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .ok_or(ParseError::InvalidShape("id".into()))?;

    // Only id is required; anything else a future build may have written
    // along with it is carried over only if it is still the expected string.
    let key = obj["key"].as_str().map(str::to_string);

    Ok(SelectedChampion {
        id: ChampionId::from(id),
        key,
    })
}

pub fn serialize_selected_champions(selected: &[SelectedChampion]) -> String {
    let array = selected
        .iter()
        .map(|champ| {
            let mut obj = Object::new();
            obj.insert("id", champ.id.as_str().into());
            if let Some(key) = &champ.key {
                obj.insert("key", key.as_str().into());
            }
            JsonValue::Object(obj)
        })
        .collect();
    JsonValue::Array(array).dump()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_tabs() {
        let raw = r#"[
            {"mode": "normal", "champions": ["Ahri"], "id": "t1"},
            {"mode": "vs", "champions": ["Ahri", "Zed"], "id": "t2"}
        ]"#;
        let tabs = parse_tabs(raw).unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].mode, TabMode::Normal);
        assert_eq!(tabs[1].champions.len(), 2);
    }

    #[test]
    fn rejects_vs_tab_with_one_champion() {
        let raw = r#"[{"mode": "vs", "champions": ["Ahri"], "id": "t1"}]"#;
        assert!(parse_tabs(raw).is_err());
    }

    #[test]
    fn rejects_unknown_mode_and_empty_id() {
        assert!(parse_tabs(r#"[{"mode": "duo", "champions": ["Ahri"], "id": "t1"}]"#).is_err());
        assert!(parse_tabs(r#"[{"mode": "normal", "champions": ["Ahri"], "id": ""}]"#).is_err());
    }

    #[test]
    fn rejects_non_string_champion_entries() {
        let raw = r#"[{"mode": "normal", "champions": [103], "id": "t1"}]"#;
        assert!(parse_tabs(raw).is_err());
    }

    #[test]
    fn one_bad_tab_fails_the_whole_array() {
        let raw = r#"[
            {"mode": "normal", "champions": ["Ahri"], "id": "t1"},
            {"mode": "vs", "champions": ["Zed"], "id": "t2"}
        ]"#;
        assert!(parse_tabs(raw).is_err());
    }

    #[test]
    fn tabs_round_trip_through_serialization() {
        let tabs = vec![Tab {
            mode: TabMode::Vs,
            champions: vec!["Ahri".into(), "Zed".into()],
            id: "t1".to_string(),
        }];
        assert_eq!(parse_tabs(&serialize_tabs(&tabs)).unwrap(), tabs);
    }

    #[test]
    fn parses_selected_champions_with_and_without_key() {
        let raw = r#"[{"id": "Ahri", "key": "103"}, {"id": "Zed"}]"#;
        let selected = parse_selected_champions(raw).unwrap();
        assert_eq!(selected[0].key.as_deref(), Some("103"));
        assert_eq!(selected[1].key, None);
    }

    #[test]
    fn selected_champion_without_id_is_invalid() {
        assert!(parse_selected_champions(r#"[{"key": "103"}]"#).is_err());
    }

    #[test]
    fn selection_ignores_unknown_fields() {
        let raw = r#"[{"id": "Ahri", "portrait": "ahri.png", "pinned": true}]"#;
        let selected = parse_selected_champions(raw).unwrap();
        assert_eq!(selected[0].id.as_str(), "Ahri");
    }

    #[test]
    fn non_array_roots_are_invalid() {
        assert!(parse_tabs(r#"{"mode": "normal"}"#).is_err());
        assert!(parse_selected_champions("42").is_err());
        assert!(parse_tabs("not json").is_err());
    }
}
