//! Storage and share-link plumbing behind AppState.
//!
//! Only the timezone list reaches the key-value store. The share link (the
//! desktop stand-in for the browser URL) carries the list and the date.

mod storage;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::error::SchedulerError;
use crate::models::timezone::TrackedTimezone;
use crate::services::url_params::{encode_query, parse_query, UrlParams};

pub use storage::JsonFileStore;

/// Key holding the JSON timezone list.
pub const TIMEZONES_KEY: &str = "timezones";

#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// while AppState owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decodes the stored list. The payload must be a JSON array; individual
/// entries that do not match the record shape are dropped.
pub fn decode_timezones(raw: &str) -> Result<Vec<TrackedTimezone>, SchedulerError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)
        .map_err(|err| SchedulerError::MalformedPersistedData(err.to_string()))?;

    let timezones = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<TrackedTimezone>(value) {
            Ok(tz) if !tz.display_name.is_empty() && !tz.timezone_id.is_empty() => Some(tz),
            Ok(tz) => {
                log::warn!("Dropping stored timezone {} with empty fields", tz.id);
                None
            }
            Err(err) => {
                log::warn!("Dropping unreadable stored timezone: {}", err);
                None
            }
        })
        .collect();

    Ok(timezones)
}

pub fn encode_timezones(timezones: &[TrackedTimezone]) -> Result<String> {
    Ok(serde_json::to_string(timezones)?)
}

/// What the store and the launch link hold at startup, before precedence
/// is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialLoad {
    pub persisted: Vec<TrackedTimezone>,
    pub url: UrlParams,
}

pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    launch: UrlParams,
    link_timezones: Vec<TrackedTimezone>,
    link_date: Option<NaiveDate>,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn KeyValueStore>, launch_query: Option<&str>) -> Self {
        let launch = launch_query.map(parse_query).unwrap_or_default();
        Self {
            store,
            link_date: launch.date,
            launch,
            link_timezones: Vec::new(),
        }
    }

    pub fn load(&self) -> InitialLoad {
        InitialLoad {
            persisted: self.read_timezones(),
            url: self.launch.clone(),
        }
    }

    /// Malformed or unreadable storage reads as an empty list.
    pub fn read_timezones(&self) -> Vec<TrackedTimezone> {
        let raw = match self.store.get(TIMEZONES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read stored timezones: {:#}", err);
                return Vec::new();
            }
        };

        decode_timezones(&raw).unwrap_or_else(|err| {
            log::warn!("Ignoring stored timezones: {}", err);
            Vec::new()
        })
    }

    /// Writes the list to the store and to the share link.
    pub fn save_timezones(&mut self, timezones: &[TrackedTimezone]) {
        self.link_timezones = timezones.to_vec();

        let result = encode_timezones(timezones)
            .and_then(|json| self.store.set(TIMEZONES_KEY, &json));
        if let Err(err) = result {
            log::warn!("Failed to persist timezones: {:#}", err);
        }
    }

    /// Updates the share link's `tz` entries without touching the store.
    pub fn sync_link_timezones(&mut self, timezones: &[TrackedTimezone]) {
        self.link_timezones = timezones.to_vec();
    }

    /// Dates only ever reach the share link.
    pub fn save_date(&mut self, date: NaiveDate) {
        self.link_date = Some(date);
    }

    pub fn share_query(&self) -> String {
        encode_query(&self.link_timezones, self.link_date)
    }
}
