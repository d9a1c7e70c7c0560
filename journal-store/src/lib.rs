//! Persistence collaborator seam.
//!
//! The core only requires durable key-value upsert plus retrieve-all per
//! named store; ordering is the caller's job after retrieval, and a consumer
//! that needs a fresh view re-fetches after a write completes. A failed
//! store operation surfaces as [`JournalError::Store`] and leaves prior
//! in-memory state untouched.

use std::collections::HashMap;

use journal_core::{sort_records_for_display, HealthRecord, Hospital, JournalError, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logical collections exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreName {
    /// Holds at most one entry.
    Profile,
    /// Keyed by record id.
    Records,
    /// Keyed by hospital name.
    Hospitals,
}

/// The profile store's fixed key; a wholesale edit overwrites this entry.
const PROFILE_KEY: &str = "profile";

pub trait JournalStore {
    /// Durable upsert: the last write for a key wins.
    fn put(&mut self, store: StoreName, key: &str, value: Value) -> Result<(), JournalError>;
    /// Every value in the named store, in no particular order.
    fn get_all(&self, store: StoreName) -> Result<Vec<Value>, JournalError>;
    fn clear(&mut self, store: StoreName) -> Result<(), JournalError>;
}

/// In-memory reference implementation backing tests and the CLI demo.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stores: HashMap<StoreName, HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalStore for MemoryStore {
    fn put(&mut self, store: StoreName, key: &str, value: Value) -> Result<(), JournalError> {
        self.stores
            .entry(store)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn get_all(&self, store: StoreName) -> Result<Vec<Value>, JournalError> {
        Ok(self
            .stores
            .get(&store)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }

    fn clear(&mut self, store: StoreName) -> Result<(), JournalError> {
        self.stores.remove(&store);
        Ok(())
    }
}

/// Upserts one check-in under its record id.
pub fn save_record(store: &mut dyn JournalStore, record: &HealthRecord) -> Result<(), JournalError> {
    let value = serde_json::to_value(record).map_err(|err| JournalError::Store(err.to_string()))?;
    store.put(StoreName::Records, &record.id, value).map_err(|err| {
        log::error!("Failed to persist record {}: {err}", record.id);
        err
    })
}

/// Loads every check-in and re-sorts for display; the store itself promises
/// no ordering.
pub fn load_records(store: &dyn JournalStore) -> Result<Vec<HealthRecord>, JournalError> {
    let mut records = store
        .get_all(StoreName::Records)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| {
                log::error!("Could not read a stored record: {err}");
                JournalError::Parse(err.to_string())
            })
        })
        .collect::<Result<Vec<HealthRecord>, JournalError>>()?;

    sort_records_for_display(&mut records);
    Ok(records)
}

/// Replaces the singleton profile wholesale.
pub fn save_profile(
    store: &mut dyn JournalStore,
    profile: &UserProfile,
) -> Result<(), JournalError> {
    let value = serde_json::to_value(profile).map_err(|err| JournalError::Store(err.to_string()))?;
    store.put(StoreName::Profile, PROFILE_KEY, value)
}

pub fn load_profile(store: &dyn JournalStore) -> Result<Option<UserProfile>, JournalError> {
    let entries = store.get_all(StoreName::Profile)?;
    let Some(value) = entries.into_iter().next() else {
        return Ok(None);
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| JournalError::Parse(err.to_string()))
}

/// Caches the fetched hospital list, keyed by name. The per-location
/// distance cache is dropped on the way in; a persisted distance is never
/// authoritative.
pub fn save_hospitals(
    store: &mut dyn JournalStore,
    hospitals: &[Hospital],
) -> Result<(), JournalError> {
    for hospital in hospitals {
        let mut stripped = hospital.clone();
        stripped.distance_km = None;
        let value = serde_json::to_value(&stripped)
            .map_err(|err| JournalError::Store(err.to_string()))?;
        store.put(StoreName::Hospitals, &stripped.name, value)?;
    }
    Ok(())
}

pub fn load_hospitals(store: &dyn JournalStore) -> Result<Vec<Hospital>, JournalError> {
    store
        .get_all(StoreName::Hospitals)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| JournalError::Parse(err.to_string()))
        })
        .collect()
}
