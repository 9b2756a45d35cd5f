use std::{
    cell::RefCell,
    collections::HashMap,
    fmt, fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod guard;
pub mod parsing;
pub mod state;

/// Persisted key names. Everything the application stores lives in one flat
/// string-to-string namespace, so the guard's full wipe can walk all of it.
pub mod keys {
    use crate::model::language::Language;

    pub const DEPLOYMENT_VERSION: &str = "deployment_version";
    pub const TABS: &str = "encyclopedia_tabs";
    pub const SELECTED_CHAMPIONS: &str = "encyclopedia_selected_champions";
    pub const SELECTED_TAB_ID: &str = "encyclopedia_selected_tab_id";

    /// Sibling key holding the data-structure version a state key was
    /// written under.
    pub fn data_version(key: &str) -> String {
        format!("{}_version", key)
    }

    /// Champion list cache, keyed by Data Dragon version and locale.
    pub fn champion_list(version: &str, language: Language) -> String {
        format!("champion_list_{}_{}", version, language.code())
    }
}

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O failed: {}", err),
            StorageError::Serialization(err) => write!(f, "Storage serialization failed: {}", err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

/// Flat durable string store, the shape browser local storage has. Passed
/// explicitly into everything that touches persisted state so tests can
/// inject an in-memory fake.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
    fn keys(&self) -> Vec<String>;
}

/// In-memory store, used by tests and as a fallback when the data file
/// cannot be opened.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[derive(Serialize, Deserialize, Default)]
struct FileStoreData {
    entries: HashMap<String, String>,
}

/// Store backed by a single JSON file, written through on every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let contents = fs::read_to_string(path)?;
            match serde_json::from_str::<FileStoreData>(&contents) {
                Ok(data) => data.entries,
                Err(err) => {
                    // A corrupt data file is not worth failing startup over.
                    warn!("data file {} unreadable, starting empty: {}", path.display(), err);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let data = FileStoreData {
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.persist()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
