//! Single-document JSON storage for the plant collection.
//!
//! ```text
//! <DATA_DIR>/
//!   plants.json          persisted collection
//!   plant_catalog.xml    legacy import source (read once)
//! ```
//!
//! The document is read and written as a whole. There is no merge: the last
//! save wins.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use super::import::{import_catalog, ImportError};
use crate::models::Collection;

/// Filename of the persisted collection inside the data directory.
pub const DOCUMENT_FILENAME: &str = "plants.json";

/// Filename of the default legacy import source.
pub const IMPORT_FILENAME: &str = "plant_catalog.xml";

/// Errors that can occur while writing the document.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for the plant collection.
#[derive(Debug)]
pub struct PlantStore {
    path: PathBuf,
    import_path: PathBuf,
    write_lock: Mutex<()>,
}

impl PlantStore {
    /// Creates a store for the document at `path`, importing from
    /// `import_path` when the document does not exist yet.
    pub fn new(path: impl Into<PathBuf>, import_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            import_path: import_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store laid out in `data_dir` with the default filenames.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(DOCUMENT_FILENAME), data_dir.join(IMPORT_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn import_path(&self) -> &Path {
        &self.import_path
    }

    /// Checks if the JSON document has been created.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the collection.
    ///
    /// When the document is missing, the legacy XML source is imported and
    /// persisted. Never fails: unreadable or undecodable sources yield an
    /// empty collection and a logged warning.
    pub fn load(&self) -> Collection {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<Collection>(&contents) {
                Ok(plants) => plants,
                Err(e) => {
                    tracing::warn!("Failed to decode {}: {}", self.path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.import(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn import(&self) -> Collection {
        let plants = match import_catalog(&self.import_path) {
            Ok(plants) => {
                tracing::info!(
                    "Imported {} plant(s) from {}",
                    plants.len(),
                    self.import_path.display()
                );
                plants
            }
            Err(ImportError::NotFound(path)) => {
                tracing::info!("No import source at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        };

        if let Err(e) = self.save(&plants) {
            tracing::warn!("Failed to persist imported catalog: {}", e);
        }
        plants
    }

    /// Overwrites the document with `data`, pretty-printed.
    ///
    /// The value is written verbatim; its shape is not checked.
    pub fn save<T: Serialize + ?Sized>(&self, data: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;

        // A poisoned lock only means an earlier writer panicked; the file
        // itself is still replaced atomically.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }

        // Write atomically using temp file + rename
        let temp_path = self.path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io(self.path.clone(), e))?;

        Ok(())
    }
}
