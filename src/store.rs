//! # Persistent Settings
//!
//! A tiny integer key-value store. The face reads its date-order key once
//! at startup and writes it once at shutdown, so stores only need to be
//! correct, not fast.
//!
//! [`FileStore`] keeps the values in a TOML file:
//!
//! ```toml
//! [values]
//! 0 = 2
//! ```
//!
//! A missing file is an empty store. An unreadable or corrupt file is also
//! treated as empty (with a warning) so a bad settings file never keeps the
//! face from starting.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors writing the settings store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Settings file could not be written
    #[error("settings IO: {0}")]
    Io(#[from] io::Error),

    /// Values could not be encoded as TOML
    #[error("settings encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Integer key-value storage provided by the host.
pub trait SettingsStore {
    /// Read `key`, or `None` if it was never written.
    fn read_int(&self, key: u32) -> Option<i32>;

    /// Persist `value` under `key`.
    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn read_int(&self, key: u32) -> Option<i32> {
        (**self).read_int(key)
    }

    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError> {
        (**self).write_int(key, value)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct StoreFile {
    #[serde(default)]
    values: BTreeMap<String, i32>,
}

/// Settings persisted to a TOML file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    contents: StoreFile,
}

impl FileStore {
    /// Open the store at `path`, loading whatever it currently holds.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<StoreFile>(&text) {
                Ok(contents) => {
                    debug!(path = %path.display(), keys = contents.values.len(), "Loaded settings");
                    contents
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid settings file, starting empty");
                    StoreFile::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file found, starting empty");
                StoreFile::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable settings file, starting empty");
                StoreFile::default()
            }
        };
        Self { path, contents }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn read_int(&self, key: u32) -> Option<i32> {
        self.contents.values.get(&key.to_string()).copied()
    }

    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError> {
        self.contents.values.insert(key.to_string(), value);
        let text = toml::to_string_pretty(&self.contents)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), key, value, "Settings saved");
        Ok(())
    }
}

/// Settings kept in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<u32, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: u32, value: i32) -> Self {
        let mut store = Self::new();
        store.values.insert(key, value);
        store
    }
}

impl SettingsStore for MemoryStore {
    fn read_int(&self, key: u32) -> Option<i32> {
        self.values.get(&key).copied()
    }

    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError> {
        self.values.insert(key, value);
        Ok(())
    }
}
