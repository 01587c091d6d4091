use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

const STORE_FILE: &str = "mfadesk-store.json";

pub const KEY_THEME_PREFERENCE: &str = "themePreference";

fn defaults() -> HashMap<String, JsonValue> {
    HashMap::from([(KEY_THEME_PREFERENCE.to_string(), json!("system"))])
}

/// Small client-local key/value store backed by a JSON file. Holds UI-side
/// preferences only; credentials never pass through here.
#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
    values: Arc<Mutex<HashMap<String, JsonValue>>>,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut values = defaults();
        match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, JsonValue>>(&bytes) {
                Ok(persisted) => values.extend(persisted),
                Err(err) => warn!(path = %path.display(), error = %err, "local store is corrupt; using defaults"),
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), error = %err, "failed to read local store"),
        }
        Self {
            path,
            values: Arc::new(Mutex::new(values)),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mfadesk")
            .join(STORE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let s = values.get(key)?.as_str()?.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    }

    pub fn set(&self, key: &str, value: impl Into<JsonValue>) {
        let snapshot = {
            let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
            values.insert(key.to_string(), value.into());
            values.clone()
        };
        self.save(&snapshot);
    }

    fn save(&self, values: &HashMap<String, JsonValue>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %err, "failed to create store directory");
                return;
            }
        }
        match serde_json::to_vec_pretty(values) {
            Ok(bytes) => {
                if let Err(err) = std::fs::write(&self.path, bytes) {
                    warn!(path = %self.path.display(), error = %err, "failed to write local store");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize local store"),
        }
    }
}
