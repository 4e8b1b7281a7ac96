//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O.

mod account;
mod document;
pub mod money;
pub mod result;

pub use account::{Account, ACCOUNT_NUMBER_DIGITS};
pub use document::StoreDocument;
pub use money::{format_balance, parse_amount};
