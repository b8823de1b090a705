pub mod models;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, DebounceConfigItem, DisplayHoursConfigItem, FileLoggingConfigItem,
    MinutesConfigItem, PixelsPerHourConfigItem, SnapMinutesConfigItem,
};
use crate::core::types::TimeRange;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    DisplayHours,
    PixelsPerHour,
    SnapMinutes,
    SuggestIncrementMinutes,
    ConflictDebounceMs,
    DefaultDurationMinutes,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub display_hours: DisplayHoursConfigItem,
    #[serde(default)]
    pub pixels_per_hour: PixelsPerHourConfigItem,
    #[serde(default)]
    pub snap_minutes: SnapMinutesConfigItem,
    #[serde(default = "MinutesConfigItem::suggest_increment_default")]
    pub suggest_increment_minutes: MinutesConfigItem,
    #[serde(default)]
    pub conflict_debounce_ms: DebounceConfigItem,
    #[serde(default = "MinutesConfigItem::default_duration_default")]
    pub default_duration_minutes: MinutesConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            display_hours: DisplayHoursConfigItem::default(),
            pixels_per_hour: PixelsPerHourConfigItem::default(),
            snap_minutes: SnapMinutesConfigItem::default(),
            suggest_increment_minutes: MinutesConfigItem::suggest_increment_default(),
            conflict_debounce_ms: DebounceConfigItem::default(),
            default_duration_minutes: MinutesConfigItem::default_duration_default(),
            file_logging_enabled: FileLoggingConfigItem::default(),
        }
    }
}

/// (key, old value, new value) of the last successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    last_change: Option<ConfigChange>,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Built-in defaults bound to `path`; nothing is written until an edit.
    pub fn with_defaults<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        }
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_hours(&self) -> &TimeRange {
        self.data.display_hours.get_value()
    }
    pub fn pixels_per_hour(&self) -> f32 {
        *self.data.pixels_per_hour.get_value()
    }
    pub fn snap_minutes(&self) -> u32 {
        *self.data.snap_minutes.get_value()
    }
    pub fn suggest_increment_minutes(&self) -> u32 {
        *self.data.suggest_increment_minutes.get_value()
    }
    pub fn conflict_debounce_ms(&self) -> u64 {
        *self.data.conflict_debounce_ms.get_value()
    }
    pub fn default_duration_minutes(&self) -> u32 {
        *self.data.default_duration_minutes.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn describe(&self, key: ConfigKey) -> (&str, String) {
        let d = &self.data;
        match key {
            ConfigKey::DisplayHours => (
                d.display_hours.description(),
                d.display_hours.get_value().to_string(),
            ),
            ConfigKey::PixelsPerHour => (
                d.pixels_per_hour.description(),
                d.pixels_per_hour.get_value().to_string(),
            ),
            ConfigKey::SnapMinutes => (
                d.snap_minutes.description(),
                d.snap_minutes.get_value().to_string(),
            ),
            ConfigKey::SuggestIncrementMinutes => (
                d.suggest_increment_minutes.description(),
                d.suggest_increment_minutes.get_value().to_string(),
            ),
            ConfigKey::ConflictDebounceMs => (
                d.conflict_debounce_ms.description(),
                d.conflict_debounce_ms.get_value().to_string(),
            ),
            ConfigKey::DefaultDurationMinutes => (
                d.default_duration_minutes.description(),
                d.default_duration_minutes.get_value().to_string(),
            ),
            ConfigKey::FileLoggingEnabled => (
                d.file_logging_enabled.description(),
                d.file_logging_enabled.get_value().to_string(),
            ),
        }
    }

    /// (key, description, value) for every key, in declaration order.
    pub fn rows(&self) -> Vec<(String, String, String)> {
        ConfigKey::iter()
            .map(|key| {
                let (description, value) = self.describe(key);
                (key.to_string(), description.to_string(), value)
            })
            .collect()
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.describe(key).1;
        self.edit(|cfg| Self::apply(cfg, key, new_value))?;
        let new = self.describe(key).1;
        self.last_change = Some((key.to_string(), old, new));
        Ok(())
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = Self::parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    /// Apply several edits; either all of them land or none do.
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.data.clone();
        for (k, v) in pairs {
            let key = Self::parse_key(k.as_ref())?;
            Self::apply(&mut staged, key, v.as_ref())?;
        }
        self.edit(|cfg| {
            *cfg = staged;
            Ok(())
        })
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    fn parse_key(key_str: &str) -> Result<ConfigKey> {
        ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str.trim(),
                valid_csv::<ConfigKey>()
            ))
        })
    }

    fn apply(cfg: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::DisplayHours => cfg.display_hours.set_value(value),
            ConfigKey::PixelsPerHour => cfg.pixels_per_hour.set_value(value),
            ConfigKey::SnapMinutes => cfg.snap_minutes.set_value(value),
            ConfigKey::SuggestIncrementMinutes => cfg.suggest_increment_minutes.set_value(value),
            ConfigKey::ConflictDebounceMs => cfg.conflict_debounce_ms.set_value(value),
            ConfigKey::DefaultDurationMinutes => cfg.default_duration_minutes.set_value(value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(value),
        }
    }

    /// Edits a copy and only keeps it once it is on disk.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut next = self.data.clone();
        f(&mut next)?;
        Self::save(&self.path, &next)?;
        self.data = next;
        Ok(())
    }

    fn save(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
