//! Persistent key/value settings
//!
//! The measurement subsystem stores one string per physical quantity (the
//! unique name of the chosen unit system). Anything that can hold string
//! pairs can back it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;

/// String-typed key/value store that survives restarts
pub trait SettingsStore {
    /// Stored value for `key`, if any
    fn value(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn insert(&mut self, key: &str, value: &str);

    /// Stored value for `key`, or `default` when nothing is stored
    fn value_or(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or_else(|| default.to_string())
    }
}

/// Settings held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Settings kept in a flat JSON object on disk.
///
/// Changes are held in memory until [`JsonFileSettings::flush`] is called.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileSettings {
    /// Open the settings file at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            debug!(path = %path.display(), "settings file not found, starting empty");
            BTreeMap::new()
        };

        Ok(JsonFileSettings { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all values back to disk, creating parent directories as needed
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), entries = self.values.len(), "settings written");
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
