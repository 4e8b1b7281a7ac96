//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Everything here either aborts a single operation (and the session goes on)
/// or ends the program. Input that merely fails validation is a
/// [`ValidationError`] and never leaves the prompter.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient funds: balance {balance_cents}, requested {requested_cents}")]
    InsufficientFunds {
        balance_cents: u64,
        requested_cents: u64,
    },

    #[error("Amount overflow")]
    Overflow,

    /// Every account number of the requested width is in use
    #[error("No unused account numbers of {digits} digits left")]
    NumbersExhausted { digits: usize },

    /// Stored salt or hash could not be decoded
    #[error("Credential error: {0}")]
    Credential(#[from] hex::FromHexError),

    /// The input source reached end-of-input
    #[error("No more input")]
    InputExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for the end-of-input signal
    pub fn is_input_exhausted(&self) -> bool {
        matches!(self, Self::InputExhausted)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected line of user input. The prompter reports it and asks again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter at least {min} character(s).")]
    TooFewCharacters { min: usize },

    #[error("Only digits are allowed.")]
    NotDigits,

    #[error("At least {min} digits required.")]
    TooFewDigits { min: usize },

    #[error("At most {max} digits allowed.")]
    TooManyDigits { max: usize },

    #[error("Enter a valid number (for example: 100 or 100.50).")]
    NotANumber,

    #[error("Invalid amount.")]
    NotFinite,

    #[error("Amount cannot be negative.")]
    Negative,

    #[error("Amount is too large.")]
    TooLarge,
}
