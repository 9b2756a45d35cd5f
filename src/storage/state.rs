//! Load/save access to the persisted UI state. Writes always stamp the
//! sibling data-structure version key; reads assume the guard has already
//! run, so a value that still fails to parse is simply dropped.

use tracing::warn;

use crate::model::tab::{SelectedChampion, Tab};

use super::{keys, parsing, KeyValueStore, StorageError};

pub fn load_tabs(store: &dyn KeyValueStore) -> Vec<Tab> {
    load_parsed(store, keys::TABS, parsing::parse_tabs)
}

pub fn save_tabs(store: &mut dyn KeyValueStore, tabs: &[Tab]) -> Result<(), StorageError> {
    set_with_version(store, keys::TABS, &parsing::serialize_tabs(tabs))
}

pub fn load_selected_champions(store: &dyn KeyValueStore) -> Vec<SelectedChampion> {
    load_parsed(store, keys::SELECTED_CHAMPIONS, parsing::parse_selected_champions)
}

pub fn save_selected_champions(
    store: &mut dyn KeyValueStore,
    selected: &[SelectedChampion],
) -> Result<(), StorageError> {
    set_with_version(
        store,
        keys::SELECTED_CHAMPIONS,
        &parsing::serialize_selected_champions(selected),
    )
}

pub fn load_selected_tab_id(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(keys::SELECTED_TAB_ID) {
        Ok(value) => value,
        Err(err) => {
            warn!("could not read {}: {}", keys::SELECTED_TAB_ID, err);
            None
        }
    }
}

pub fn save_selected_tab_id(store: &mut dyn KeyValueStore, id: &str) -> Result<(), StorageError> {
    set_with_version(store, keys::SELECTED_TAB_ID, id)
}

pub fn clear_selected_tab_id(store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
    remove_with_version(store, keys::SELECTED_TAB_ID)
}

fn load_parsed<T>(
    store: &dyn KeyValueStore,
    key: &str,
    parse: fn(&str) -> Result<Vec<T>, parsing::ParseError>,
) -> Vec<T> {
    match store.get(key) {
        Ok(Some(raw)) => match parse(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!("stored {} unusable: {}", key, err);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("could not read {}: {}", key, err);
            Vec::new()
        }
    }
}

fn set_with_version(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    store.set(key, value)?;
    store.set(
        &keys::data_version(key),
        &parsing::DATA_STRUCTURE_VERSION.to_string(),
    )
}

fn remove_with_version(store: &mut dyn KeyValueStore, key: &str) -> Result<(), StorageError> {
    store.remove(key)?;
    store.remove(&keys::data_version(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tab::TabMode;
    use crate::storage::MemoryStore;

    #[test]
    fn tabs_round_trip_and_stamp_the_version_key() {
        let mut store = MemoryStore::new();
        let tabs = vec![Tab {
            mode: TabMode::Normal,
            champions: vec!["Ahri".into()],
            id: "t1".to_string(),
        }];

        save_tabs(&mut store, &tabs).unwrap();

        assert_eq!(load_tabs(&store), tabs);
        assert_eq!(
            store.get(&keys::data_version(keys::TABS)).unwrap().as_deref(),
            Some("1")
        );
    }

    #[test]
    fn selected_tab_id_round_trips() {
        let mut store = MemoryStore::new();
        save_selected_tab_id(&mut store, "t1").unwrap();
        assert_eq!(load_selected_tab_id(&store).as_deref(), Some("t1"));

        clear_selected_tab_id(&mut store).unwrap();
        assert_eq!(load_selected_tab_id(&store), None);
        assert_eq!(
            store.get(&keys::data_version(keys::SELECTED_TAB_ID)).unwrap(),
            None
        );
    }

    #[test]
    fn missing_keys_load_as_empty() {
        let store = MemoryStore::new();
        assert!(load_tabs(&store).is_empty());
        assert!(load_selected_champions(&store).is_empty());
    }
}
