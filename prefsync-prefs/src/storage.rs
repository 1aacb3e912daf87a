//! Persistence backends for preference values.
//!
//! Values are stored as JSON, keyed by preference name. The store front
//! ([`Prefs`](crate::Prefs)) handles typing, caching and listener dispatch;
//! backends only move JSON values in and out.

use crate::error::{PrefsError, PrefsResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::debug;

/// A key-value backend for preference values.
pub trait PrefsStorage: Send + Sync {
    /// Reads the value stored under `name`.
    fn get(&self, name: &str) -> PrefsResult<Option<Value>>;

    /// Stores `value` under `name`, replacing any previous value.
    fn put(&self, name: &str, value: &Value) -> PrefsResult<()>;

    /// Removes the value stored under `name`. Removing a missing name is not an error.
    fn remove(&self, name: &str) -> PrefsResult<()>;

    /// Returns true if a value is stored under `name`.
    fn contains(&self, name: &str) -> PrefsResult<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Returns the names of all stored values.
    fn names(&self) -> PrefsResult<Vec<String>>;
}

/// Volatile backend, mostly useful for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStorage for MemoryStorage {
    fn get(&self, name: &str) -> PrefsResult<Option<Value>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn put(&self, name: &str, value: &Value) -> PrefsResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> PrefsResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(name);
        Ok(())
    }

    fn contains(&self, name: &str) -> PrefsResult<bool> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.contains_key(name))
    }

    fn names(&self) -> PrefsResult<Vec<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Backend that keeps all preferences in a single JSON object file.
///
/// The whole file is loaded on open and rewritten on every mutation. Writes
/// go to a sibling temp file first and are renamed into place, so a crash
/// mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStorage {
    /// Opens (or creates) the preference file at `path`.
    ///
    /// A missing file is treated as empty; parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> PrefsResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str::<Value>(&raw)? {
                    Value::Object(map) => map.into_iter().collect(),
                    other => {
                        return Err(PrefsError::Storage(format!(
                            "{} does not contain a JSON object (found {})",
                            path.display(),
                            json_kind(&other)
                        )));
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened preference file {} ({} entries)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> PrefsResult<()> {
        let tmp_path = self.path.with_extension(
            self.path
                .extension()
                .map(|ext| format!("{}.tmp", ext.to_string_lossy()))
                .unwrap_or_else(|| "tmp".to_string()),
        );
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl PrefsStorage for JsonFileStorage {
    fn get(&self, name: &str) -> PrefsResult<Option<Value>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn put(&self, name: &str, value: &Value) -> PrefsResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = entries.insert(name.to_string(), value.clone());
        if let Err(e) = self.persist(&entries) {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(old) => entries.insert(name.to_string(), old),
                None => entries.remove(name),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> PrefsResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(previous) = entries.remove(name) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&entries) {
            entries.insert(name.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn contains(&self, name: &str) -> PrefsResult<bool> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.contains_key(name))
    }

    fn names(&self) -> PrefsResult<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
