//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod credentials;
pub mod logging;
pub mod prompter;
mod session;

pub use credentials::{hash_pin, make_pin_record, verify_pin, PinRecord};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use prompter::{validate_digits, validate_text, Prompter};
pub use session::SessionController;
