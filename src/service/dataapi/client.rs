use std::{
    cell::RefCell,
    collections::{hash_map::Entry, HashMap},
    fmt,
    rc::Rc,
};

use json::JsonValue;
use reqwest::blocking::Client;

use crate::model::language::Language;

const DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

/// Blocking client for the public Data Dragon API. Responses are cached for
/// the lifetime of the client; Data Dragon payloads are immutable per
/// version, so one fetch per run is enough.
pub struct DataDragonClient {
    client: Client,
    cache: RefCell<HashMap<ClientRequestType, Rc<JsonValue>>>,
}

impl DataDragonClient {
    pub fn new() -> Result<Self, ClientInitError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            cache: RefCell::from(HashMap::new()),
        })
    }

    pub fn request(&self, request_type: ClientRequestType) -> Result<Rc<JsonValue>, RequestError> {
        match self.cache.borrow_mut().entry(request_type.clone()) {
            Entry::Occupied(oe) => Ok(oe.get().clone()),
            Entry::Vacant(ve) => {
                let url = match &request_type {
                    ClientRequestType::Versions => {
                        format!("{}/api/versions.json", DDRAGON_BASE)
                    }
                    ClientRequestType::Champions(version, language) => {
                        format!(
                            "{}/cdn/{}/data/{}/champion.json",
                            DDRAGON_BASE,
                            version,
                            language.code()
                        )
                    }
                    ClientRequestType::ChampionDetail(version, language, id) => {
                        format!(
                            "{}/cdn/{}/data/{}/champion/{}.json",
                            DDRAGON_BASE,
                            version,
                            language.code(),
                            id
                        )
                    }
                };

                let response = self.client.get(url).send()?;
                if !response.status().is_success() {
                    return Err(RequestError::InvalidResponse(request_type, response.status()));
                }

                let text = response.text()?;
                let json = json::parse(text.as_str())?;

                let rc_json = Rc::new(json);
                ve.insert(rc_json.clone());
                Ok(rc_json)
            }
        }
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum ClientRequestType {
    Versions,
    /// champion.json for one Data Dragon version and locale.
    Champions(String, Language),
    /// champion/{id}.json, the per-champion file with spells and passive.
    ChampionDetail(String, Language, String),
}

#[derive(Debug)]
pub enum ClientInitError {
    ClientError(reqwest::Error),
}

impl fmt::Display for ClientInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientInitError::ClientError(err) => write!(f, "Client error: {}", err),
        }
    }
}

impl From<reqwest::Error> for ClientInitError {
    fn from(error: reqwest::Error) -> Self {
        Self::ClientError(error)
    }
}

#[derive(Debug)]
pub enum RequestError {
    RequestFailed(reqwest::Error),
    InvalidResponse(ClientRequestType, reqwest::StatusCode),
    InvalidJson(json::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::RequestFailed(err) => write!(f, "Request failed: {}", err),
            RequestError::InvalidResponse(request_type, status) => {
                write!(f, "Invalid response for {:?}: HTTP {}", request_type, status)
            }
            RequestError::InvalidJson(err) => write!(f, "Response is not JSON: {}", err),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error)
    }
}

impl From<json::Error> for RequestError {
    fn from(error: json::Error) -> Self {
        Self::InvalidJson(error)
    }
}
