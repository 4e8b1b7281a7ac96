//! JSON file adapter for the account store
//!
//! The whole document lives in one UTF-8 JSON file. Saves write a temporary
//! file next to the target and rename it over the target, so readers see
//! either the previous document or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::result::Result;
use crate::domain::StoreDocument;
use crate::ports::AccountStore;

/// Default file name inside the data directory
pub const DEFAULT_DATA_FILE: &str = "atm_data.json";

/// Account store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl AccountStore for JsonFileStore {
    fn load(&self) -> Result<StoreDocument> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(StoreDocument::from_json_lenient(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreDocument::default()),
            // Non UTF-8 bytes are foreign data, not an I/O failure
            Err(e) if e.kind() == ErrorKind::InvalidData => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".atm_data.")
            .suffix(".tmp")
            .tempfile_in(self.parent_dir())?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
