//! Persisted selection.
//!
//! The selected identifier is the only piece of store state that survives a
//! restart. It is kept in a small versioned JSON file:
//!
//! ```json
//! { "version": 1, "selected": "64f1c0ffee" }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current schema version of the selection file.
pub const SELECTION_SCHEMA_VERSION: u32 = 1;

/// Errors reading or writing the selection file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed selection file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported selection file version {0} (expected {expected})", expected = SELECTION_SCHEMA_VERSION)]
    UnsupportedVersion(u32),
}

/// On-disk shape of the selection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSelection {
    pub version: u32,
    #[serde(default)]
    pub selected: Option<String>,
}

impl PersistedSelection {
    #[must_use]
    pub const fn new(selected: Option<String>) -> Self {
        Self {
            version: SELECTION_SCHEMA_VERSION,
            selected,
        }
    }
}

/// Location of a selection file.
#[derive(Debug, Clone)]
pub struct SelectionFile {
    path: PathBuf,
}

impl SelectionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted identifier. A missing file means no selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// JSON, or was written by an unknown schema version.
    pub fn load(&self) -> Result<Option<String>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let persisted: PersistedSelection = serde_json::from_str(&raw)?;
        if persisted.version != SELECTION_SCHEMA_VERSION {
            return Err(PersistError::UnsupportedVersion(persisted.version));
        }
        Ok(persisted.selected)
    }

    /// Write the identifier (or its absence), creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, selected: Option<&str>) -> Result<(), PersistError> {
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_string_pretty(&PersistedSelection::new(
            selected.map(ToOwned::to_owned),
        ))?;

        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}
