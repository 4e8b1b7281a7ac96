//! ATM Core - accounts, PIN credentials and the console session
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Account, StoreDocument, money, errors)
//! - **ports**: Trait definitions for external dependencies (AccountStore, Console)
//! - **services**: Credentials, prompter, session controller, event log
//! - **adapters**: Concrete implementations (JSON file store, consoles)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::JsonFileStore;
use config::Config;
use ports::Console;
use services::{EntryPoint, LoggingService, SessionController};

// Re-export commonly used types at crate root
pub use domain::result::{Error, ValidationError};
pub use domain::{Account, StoreDocument};
pub use services::{LogEvent, LogEntry};

/// Main context for ATM operations
///
/// Holds the resolved configuration, the account store and the optional
/// event log for one data file.
pub struct AtmContext {
    pub config: Config,
    pub store: Arc<JsonFileStore>,
    pub logger: Option<Arc<LoggingService>>,
}

impl AtmContext {
    /// Create a context for `default_data_file` (or the file named by
    /// `ATM_DATA_FILE`)
    pub fn new(
        default_data_file: &Path,
        entry_point: EntryPoint,
        app_version: &str,
    ) -> Result<Self> {
        let config = Config::load(default_data_file)?;
        Self::with_config(config, entry_point, app_version)
    }

    /// Create a context from an already loaded configuration, creating the
    /// data directory if needed
    pub fn with_config(
        config: Config,
        entry_point: EntryPoint,
        app_version: &str,
    ) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", config.data_dir))?;

        let store = Arc::new(JsonFileStore::new(&config.data_file));
        let logger = if config.event_log {
            // Logging should never block the ATM
            LoggingService::new(&config.data_dir, entry_point, app_version)
                .ok()
                .map(Arc::new)
        } else {
            None
        };

        Ok(Self {
            config,
            store,
            logger,
        })
    }

    /// Build a session controller over `console`
    pub fn controller<C: Console>(&self, console: C) -> SessionController<C> {
        let controller = SessionController::new(self.store.clone(), console);
        match &self.logger {
            Some(logger) => controller.with_logger(Arc::clone(logger)),
            None => controller,
        }
    }
}
