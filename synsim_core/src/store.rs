//! File-backed session persistence with file locking.
//!
//! The session file is a single JSON object keyed by field name,
//! rewritten atomically on every field mutation. Loading tolerates
//! missing, unreadable, or corrupt files by falling back to defaults;
//! fields absent from the JSON keep their defaults too.

use crate::session::{ConfigField, ConfigStore, Session, SessionConfig};
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON session store with atomic writes and file locking.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the given session file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session configuration.
    ///
    /// Returns defaults if the file doesn't exist. If the file cannot
    /// be read or parsed, logs a warning and returns defaults.
    pub fn load(&self) -> SessionConfig {
        if !self.path.exists() {
            tracing::info!("No session file found, using defaults");
            return SessionConfig::default();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open session file {:?}: {}. Using defaults.",
                    self.path,
                    e
                );
                return SessionConfig::default();
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock session file {:?}: {}. Using defaults.",
                self.path,
                e
            );
            return SessionConfig::default();
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read session file {:?}: {}. Using defaults.",
                self.path,
                e
            );
            return SessionConfig::default();
        }

        let _ = file.unlock();

        match serde_json::from_str::<SessionConfig>(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded session from {:?}", self.path);
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse session file {:?}: {}. Using defaults.",
                    self.path,
                    e
                );
                SessionConfig::default()
            }
        }
    }

    /// Save the full configuration atomically:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    pub fn save(&self, config: &SessionConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "session path missing parent")
        })?)?;

        // Exclusive lock to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(config)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved session to {:?}", self.path);
        Ok(())
    }
}

impl ConfigStore for JsonStore {
    fn persist(&mut self, field: ConfigField, config: &SessionConfig) -> Result<()> {
        self.save(config)?;
        tracing::debug!("Persisted session field {}", field.key());
        Ok(())
    }
}

/// Load the stored session (or defaults) from `path` and attach the
/// store so later mutations persist through it.
pub fn load_session(path: &Path) -> Session {
    let store = JsonStore::new(path);
    let config = store.load();
    Session::with_store(config, Box::new(store))
}
