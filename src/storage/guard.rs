//! Startup guard over the persisted key-value store. Runs to completion
//! before anything else reads the store: first the coarse deployment-version
//! check (full wipe on mismatch), then structural validation of each known
//! state key. Nothing in here propagates an error outward; every failure
//! degrades to "delete the offending keys and continue".

use tracing::{error, warn};

use super::{keys, parsing, KeyValueStore, StorageError};

/// Deployment token baked in at build time: a digest of the schema-defining
/// sources in release builds, the fixed sentinel "dev" otherwise.
pub const BUILD_VERSION: &str = env!("DEPLOYMENT_VERSION");

pub fn run(store: &mut dyn KeyValueStore, current_token: &str) {
    check_deployment_version(store, current_token);
    validate_state_keys(store);
}

/// Compares the stored deployment token against the running build's. A
/// missing token, a different token, or a store that fails the read all end
/// the same way: every key is erased and the current token written back.
fn check_deployment_version(store: &mut dyn KeyValueStore, current_token: &str) {
    let matches = match store.get(keys::DEPLOYMENT_VERSION) {
        Ok(stored) => stored.as_deref() == Some(current_token),
        Err(err) => {
            error!("deployment version unreadable, treating as mismatch: {}", err);
            false
        }
    };

    if !matches {
        warn!("deployment version changed, clearing all persisted state");
        if let Err(err) = wipe_and_stamp(store, current_token) {
            // Storage may be unusable entirely; the app still starts, just
            // without persisted state.
            error!("storage wipe failed: {}", err);
        }
    }
}

fn wipe_and_stamp(store: &mut dyn KeyValueStore, current_token: &str) -> Result<(), StorageError> {
    store.clear()?;
    store.set(keys::DEPLOYMENT_VERSION, current_token)
}

/// Validates each known state key independently; one bad key never touches
/// its siblings.
fn validate_state_keys(store: &mut dyn KeyValueStore) {
    validate_key(store, keys::TABS, validate_tabs);
    validate_key(store, keys::SELECTED_CHAMPIONS, validate_selected);

    // The selected tab id is a plain string with no structure to check, but
    // it still participates in data-structure versioning.
    check_data_version(store, keys::SELECTED_TAB_ID);
}

fn validate_tabs(raw: &str) -> Result<(), parsing::ParseError> {
    parsing::parse_tabs(raw).map(|_| ())
}

fn validate_selected(raw: &str) -> Result<(), parsing::ParseError> {
    parsing::parse_selected_champions(raw).map(|_| ())
}

fn validate_key(
    store: &mut dyn KeyValueStore,
    key: &str,
    validate: fn(&str) -> Result<(), parsing::ParseError>,
) {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        // Nothing stored is always valid.
        Ok(None) => return,
        Err(err) => {
            error!("could not read {}, clearing: {}", key, err);
            remove_with_version(store, key);
            return;
        }
    };

    if let Err(err) = validate(&raw) {
        warn!("invalid data structure for {}, clearing: {}", key, err);
        remove_with_version(store, key);
        return;
    }

    check_data_version(store, key);
}

fn check_data_version(store: &mut dyn KeyValueStore, key: &str) {
    let version_key = keys::data_version(key);
    let stored = store.get(&version_key).unwrap_or_else(|err| {
        error!("could not read {}: {}", version_key, err);
        None
    });

    if stored.as_deref() != Some(parsing::DATA_STRUCTURE_VERSION.to_string().as_str()) {
        if store.get(key).ok().flatten().is_some() {
            warn!("data structure version mismatch for {}, clearing", key);
        }
        remove_with_version(store, key);
    }
}

fn remove_with_version(store: &mut dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key) {
        error!("could not remove {}: {}", key, err);
    }
    if let Err(err) = store.remove(&keys::data_version(key)) {
        error!("could not remove version of {}: {}", key, err);
    }
}
