//! In-memory account store, for tests and demos

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::StoreDocument;
use crate::ports::AccountStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StoreDocument>,
    loads: Mutex<usize>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
            loads: Mutex::new(0),
            saves: Mutex::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.lock().map(|n| *n).unwrap_or(0)
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Io(std::io::Error::other("memory store lock poisoned"))
}

impl AccountStore for MemoryStore {
    fn load(&self) -> Result<StoreDocument> {
        *self.loads.lock().map_err(poisoned)? += 1;
        Ok(self.document.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        *self.document.lock().map_err(poisoned)? = document.clone();
        *self.saves.lock().map_err(poisoned)? += 1;
        Ok(())
    }
}
