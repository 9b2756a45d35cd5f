use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use chrono::{DateTime, Duration, Utc};
use json::{object::Object, JsonValue};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::{
    model::{
        champion::{Champion, ChampionDetail, ChampionStats},
        ids::ChampionId,
        language::Language,
    },
    storage::{keys, SharedStore},
};

use super::dataapi::{
    client::{ClientInitError, ClientRequestType, DataDragonClient, RequestError},
    parsing::{
        champion::{parse_champion_detail, parse_champions, parse_latest_version},
        ParsingError,
    },
};

/// Champion lists are keyed by Data Dragon version, so staleness only
/// matters around patch day; a day is plenty.
const CHAMPION_CACHE_MAX_AGE_HOURS: i64 = 24;

/// Fetches and caches champion data. Lists live in memory for the run and
/// in the key-value store across runs, under `champion_list_{version}_{lang}`.
pub struct DataManager {
    client: DataDragonClient,
    store: SharedStore,
    version: OnceCell<String>,
    champion_cache: RefCell<HashMap<Language, Rc<Vec<Champion>>>>,
    detail_cache: RefCell<HashMap<(Language, ChampionId), Rc<ChampionDetail>>>,
}

impl DataManager {
    pub fn new(store: SharedStore) -> Result<Self, DataManagerInitError> {
        let client = DataDragonClient::new()?;
        Ok(Self {
            client,
            store,
            version: OnceCell::new(),
            champion_cache: RefCell::from(HashMap::new()),
            detail_cache: RefCell::from(HashMap::new()),
        })
    }

    /// Latest Data Dragon version, fetched once per run.
    pub fn version(&self) -> DataRetrievalResult<&String> {
        self.version.get_or_try_init(|| {
            let versions_json = self.client.request(ClientRequestType::Versions)?;
            Ok(parse_latest_version(&versions_json)?)
        })
    }

    /// Champion list for the given language. Every champion carries its
    /// Korean name in `hangul` so bilingual search works in either mode.
    pub fn get_champions(&self, language: Language) -> DataRetrievalResult<Rc<Vec<Champion>>> {
        if let Some(list) = self.champion_cache.borrow().get(&language) {
            return Ok(list.clone());
        }

        let version = self.version()?.clone();
        let champions = match self.load_cached(&version, language) {
            Some(champions) => champions,
            None => {
                let champions = self.fetch_champions(&version, language)?;
                self.store_cached(&version, language, &champions);
                champions
            }
        };

        let list = Rc::new(champions);
        self.champion_cache.borrow_mut().insert(language, list.clone());
        Ok(list)
    }

    /// Ability detail for one champion, fetched from the per-champion file
    /// and cached for the run. The raw list knows no spells, only stats.
    pub fn get_champion_detail(
        &self,
        language: Language,
        id: &ChampionId,
    ) -> DataRetrievalResult<Rc<ChampionDetail>> {
        let cache_key = (language, id.clone());
        if let Some(detail) = self.detail_cache.borrow().get(&cache_key) {
            return Ok(detail.clone());
        }

        let version = self.version()?.clone();
        let detail_json = self.client.request(ClientRequestType::ChampionDetail(
            version,
            language,
            id.as_str().to_string(),
        ))?;
        let detail = Rc::new(parse_champion_detail(&detail_json, id.as_str())?);

        self.detail_cache.borrow_mut().insert(cache_key, detail.clone());
        Ok(detail)
    }

    /// Drops every cache so the next access refetches.
    pub fn refresh(&mut self) {
        self.client.clear_cache();
        self.version = OnceCell::new();
        self.champion_cache.borrow_mut().clear();
        self.detail_cache.borrow_mut().clear();

        let mut store = self.store.borrow_mut();
        for key in store.keys() {
            if key.starts_with("champion_list_") {
                if let Err(err) = store.remove(&key) {
                    warn!("could not drop cached {}: {}", key, err);
                }
            }
        }
    }

    fn fetch_champions(
        &self,
        version: &str,
        language: Language,
    ) -> DataRetrievalResult<Vec<Champion>> {
        let ko_json = self
            .client
            .request(ClientRequestType::Champions(version.to_string(), Language::KoKr))?;
        let ko_champions = parse_champions(&ko_json)?;

        if language == Language::KoKr {
            return Ok(ko_champions
                .into_iter()
                .map(|mut champ| {
                    champ.hangul = Some(champ.name.clone());
                    champ
                })
                .collect());
        }

        let champs_json = self
            .client
            .request(ClientRequestType::Champions(version.to_string(), language))?;
        let mut champions = parse_champions(&champs_json)?;

        let ko_names: HashMap<&str, &str> = ko_champions
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        for champ in &mut champions {
            champ.hangul = ko_names.get(champ.id.as_str()).map(|name| name.to_string());
        }
        Ok(champions)
    }

    fn load_cached(&self, version: &str, language: Language) -> Option<Vec<Champion>> {
        let key = keys::champion_list(version, language);
        let raw = match self.store.borrow().get(&key) {
            Ok(value) => value?,
            Err(err) => {
                warn!("could not read {}: {}", key, err);
                return None;
            }
        };

        let (cached_at, champions) = match parse_champion_list(&raw) {
            Some(record) => record,
            None => {
                warn!("cached {} unusable, refetching", key);
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(cached_at);
        (age < Duration::hours(CHAMPION_CACHE_MAX_AGE_HOURS)).then_some(champions)
    }

    fn store_cached(&self, version: &str, language: Language, champions: &[Champion]) {
        let key = keys::champion_list(version, language);
        let record = serialize_champion_list(champions);
        if let Err(err) = self.store.borrow_mut().set(&key, &record) {
            // Cache write is best effort; next run just refetches.
            warn!("could not cache {}: {}", key, err);
        }
    }
}

fn serialize_champion_list(champions: &[Champion]) -> String {
    let array = champions
        .iter()
        .map(|champ| {
            let mut obj = Object::new();
            obj.insert("id", champ.id.as_str().into());
            obj.insert("key", champ.key.as_str().into());
            obj.insert("name", champ.name.as_str().into());
            obj.insert("title", champ.title.as_str().into());
            if let Some(hangul) = &champ.hangul {
                obj.insert("hangul", hangul.as_str().into());
            }
            obj.insert("stats", serialize_stats(&champ.stats));
            JsonValue::Object(obj)
        })
        .collect();

    let mut record = Object::new();
    record.insert("cached_at", Utc::now().to_rfc3339().into());
    record.insert("champions", JsonValue::Array(array));
    JsonValue::Object(record).dump()
}

fn serialize_stats(stats: &ChampionStats) -> JsonValue {
    let mut obj = Object::new();
    obj.insert("hp", stats.hp.into());
    obj.insert("hp_per_level", stats.hp_per_level.into());
    obj.insert("mp", stats.mp.into());
    obj.insert("move_speed", stats.move_speed.into());
    obj.insert("armor", stats.armor.into());
    obj.insert("armor_per_level", stats.armor_per_level.into());
    obj.insert("spell_block", stats.spell_block.into());
    obj.insert("spell_block_per_level", stats.spell_block_per_level.into());
    obj.insert("attack_damage", stats.attack_damage.into());
    obj.insert("attack_damage_per_level", stats.attack_damage_per_level.into());
    obj.insert("attack_speed", stats.attack_speed.into());
    obj.insert("attack_range", stats.attack_range.into());
    JsonValue::Object(obj)
}

fn parse_stats(value: &JsonValue) -> Option<ChampionStats> {
    Some(ChampionStats {
        hp: value["hp"].as_f64()?,
        hp_per_level: value["hp_per_level"].as_f64()?,
        mp: value["mp"].as_f64()?,
        move_speed: value["move_speed"].as_f64()?,
        armor: value["armor"].as_f64()?,
        armor_per_level: value["armor_per_level"].as_f64()?,
        spell_block: value["spell_block"].as_f64()?,
        spell_block_per_level: value["spell_block_per_level"].as_f64()?,
        attack_damage: value["attack_damage"].as_f64()?,
        attack_damage_per_level: value["attack_damage_per_level"].as_f64()?,
        attack_speed: value["attack_speed"].as_f64()?,
        attack_range: value["attack_range"].as_f64()?,
    })
}

fn parse_champion_list(raw: &str) -> Option<(DateTime<Utc>, Vec<Champion>)> {
    let value = json::parse(raw).ok()?;
    let root = match &value {
        JsonValue::Object(root) => root,
        _ => return None,
    };

    let cached_at = DateTime::parse_from_rfc3339(root["cached_at"].as_str()?)
        .ok()?
        .with_timezone(&Utc);

    let entries = match &root["champions"] {
        JsonValue::Array(entries) => entries,
        _ => return None,
    };

    let mut champions = Vec::with_capacity(entries.len());
    for entry in entries {
        let obj = match entry {
            JsonValue::Object(obj) => obj,
            _ => return None,
        };
        champions.push(Champion {
            id: obj["id"].as_str()?.into(),
            key: obj["key"].as_str()?.to_string(),
            name: obj["name"].as_str()?.to_string(),
            title: obj["title"].as_str()?.to_string(),
            hangul: obj["hangul"].as_str().map(str::to_string),
            stats: parse_stats(&obj["stats"])?,
        });
    }
    Some((cached_at, champions))
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug)]
pub enum DataManagerInitError {
    ClientFailed(ClientInitError),
}

impl fmt::Display for DataManagerInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataManagerInitError::ClientFailed(err) => write!(f, "Client failed: {}", err),
        }
    }
}

impl From<ClientInitError> for DataManagerInitError {
    fn from(error: ClientInitError) -> Self {
        Self::ClientFailed(error)
    }
}

#[derive(Debug)]
pub enum DataRetrievalError {
    ClientFailed(RequestError),
    ParsingFailed(ParsingError),
}

impl fmt::Display for DataRetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataRetrievalError::ClientFailed(err) => write!(f, "Client failed: {}", err),
            DataRetrievalError::ParsingFailed(err) => write!(f, "Parsing failed: {}", err),
        }
    }
}

impl From<RequestError> for DataRetrievalError {
    fn from(error: RequestError) -> Self {
        Self::ClientFailed(error)
    }
}

impl From<ParsingError> for DataRetrievalError {
    fn from(error: ParsingError) -> Self {
        Self::ParsingFailed(error)
    }
}
