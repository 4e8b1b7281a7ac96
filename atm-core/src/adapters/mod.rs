//! Adapter implementations (hexagonal architecture)
//!
//! Adapters implement the port traits defined in `ports/`.

pub mod console;
pub mod json_store;
pub mod memory_store;

pub use console::{ScriptedConsole, StreamConsole};
pub use json_store::{JsonFileStore, DEFAULT_DATA_FILE};
pub use memory_store::MemoryStore;
