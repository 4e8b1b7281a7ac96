//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The session logic
//! depends only on these traits, not on concrete implementations.

mod console;
mod store;

pub use console::Console;
pub use store::AccountStore;
