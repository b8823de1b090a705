use crate::api::Page;
use crate::core::aliases::UserId;
use crate::core::models::Demo;
use crate::core::types::{DemoStatus, DemoType, ViewMode};
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// String key/value persistence for UI preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All entries in one JSON object on disk, rewritten on every change.
/// A missing or unreadable file starts empty.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>, logger: &Logger) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                logger.warn(
                    format!(
                        "Preference file '{}' is corrupted; starting empty. ({e})",
                        path.display()
                    ),
                    LogTarget::FileOnly,
                );
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }
    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// A typed preference stored as JSON under one key.
pub struct PreferenceCache<T> {
    key: String,
    _marker: PhantomData<T>,
}

impl<T> PreferenceCache<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// Missing entries give the default. Entries that fail to decode are
    /// logged, dropped from the store and replaced with the default.
    pub fn load(&self, store: &mut dyn KeyValueStore, logger: &Logger) -> T {
        let Some(raw) = store.get(&self.key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                logger.warn(
                    format!("Discarding corrupted preference '{}': {e}", self.key),
                    LogTarget::FileOnly,
                );
                if let Err(e) = store.remove(&self.key) {
                    logger.warn(
                        format!("Could not drop preference '{}': {e}", self.key),
                        LogTarget::FileOnly,
                    );
                }
                T::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        store.set(&self.key, &raw)
    }
}

pub const DEMO_FILTERS_KEY: &str = "demos.filters";

/// Filters and view mode of the demos screen, remembered between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoFilterPrefs {
    pub statuses: Vec<DemoStatus>,
    pub demo_types: Vec<DemoType>,
    pub category_id: Option<String>,
    pub user_id: Option<UserId>,
    pub view_mode: ViewMode,
}

impl DemoFilterPrefs {
    pub fn cache() -> PreferenceCache<Self> {
        PreferenceCache::new(DEMO_FILTERS_KEY)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DemoFile {
    Page(Page<Demo>),
    List(Vec<Demo>),
}

/// Read a saved list response: either the paged envelope or a bare array.
pub fn load_demos(path: &Path) -> Result<Vec<Demo>> {
    let contents = fs::read_to_string(path)?;
    Ok(match serde_json::from_str(&contents)? {
        DemoFile::Page(page) => page.data,
        DemoFile::List(demos) => demos,
    })
}
