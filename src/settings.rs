//! Persistence of user-chosen contrast thresholds.
//!
//! Hosts store settings as a flat key-value map of JSON values. Custom
//! thresholds live under [`CUSTOM_RATIOS_KEY`].

use crate::error::{Error, Result};
use crate::scan::ThresholdConfig;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which custom thresholds are persisted.
pub const CUSTOM_RATIOS_KEY: &str = "customRatios";

/// Key-value settings storage.
pub trait SettingsStore {
    /// Read a value, or `None` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write a value.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// The file is read once on open and rewritten in full on every change.
/// A missing file is treated as an empty store and created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&data)? {
                    Value::Object(map) => map,
                    _ => {
                        return Err(Error::Settings(format!(
                            "{} does not contain a JSON object",
                            path.display()
                        )))
                    }
                }
            }
        } else {
            Map::new()
        };

        log::debug!("Opened settings store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Load persisted thresholds, falling back to the WCAG AA defaults when none
/// have been saved.
pub fn load_thresholds<S: SettingsStore + ?Sized>(store: &S) -> Result<ThresholdConfig> {
    let Some(value) = store.get(CUSTOM_RATIOS_KEY)? else {
        return Ok(ThresholdConfig::default());
    };

    let thresholds: ThresholdConfig = serde_json::from_value(value)
        .map_err(|e| Error::Settings(format!("Invalid {}: {}", CUSTOM_RATIOS_KEY, e)))?;
    thresholds.validate()?;
    Ok(thresholds)
}

/// Validate and persist thresholds.
pub fn save_thresholds<S: SettingsStore + ?Sized>(
    store: &mut S,
    thresholds: &ThresholdConfig,
) -> Result<()> {
    thresholds.validate()?;
    store.set(CUSTOM_RATIOS_KEY, serde_json::to_value(thresholds)?)
}

/// Forget persisted thresholds.
pub fn reset_thresholds<S: SettingsStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(CUSTOM_RATIOS_KEY)
}
