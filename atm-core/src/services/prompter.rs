//! Interactive prompter - validated input and formatted output over a [`Console`]
//!
//! A prompt is rendered REPL-style as `"<prompt>\n>>> "`. Validation lives in
//! plain functions returning [`ValidationError`]; the prompter reports those
//! and asks again, while end-of-input ([`Error::InputExhausted`]) propagates.
//!
//! [`Error::InputExhausted`]: crate::Error::InputExhausted

use crate::domain::money::{format_balance, parse_amount};
use crate::domain::result::{Result, ValidationError};
use crate::ports::Console;

pub const PIN_MIN_DIGITS: usize = 4;
pub const PIN_MAX_DIGITS: usize = 8;

const RULE_WIDTH: usize = 44;

/// Accept `raw` (already trimmed) if it has at least `min_len` characters
pub fn validate_text(raw: &str, min_len: usize) -> std::result::Result<String, ValidationError> {
    if raw.chars().count() >= min_len {
        Ok(raw.to_string())
    } else {
        Err(ValidationError::TooFewCharacters { min: min_len })
    }
}

/// Accept an all-ASCII-digit string with `min_len..=max_len` digits
pub fn validate_digits(
    raw: &str,
    min_len: usize,
    max_len: Option<usize>,
) -> std::result::Result<String, ValidationError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotDigits);
    }
    if raw.len() < min_len {
        return Err(ValidationError::TooFewDigits { min: min_len });
    }
    if let Some(max) = max_len {
        if raw.len() > max {
            return Err(ValidationError::TooManyDigits { max });
        }
    }
    Ok(raw.to_string())
}

/// Prompts and messages for the ATM dialog
pub struct Prompter<C> {
    console: C,
}

impl<C: Console> Prompter<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    // === Output ===

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.console.write_text(message)?;
        self.console.write_text("\n")
    }

    pub fn warn(&mut self, message: &str) -> Result<()> {
        if message.is_empty() {
            self.info("[!]")
        } else {
            self.info(&format!("[!] {message}"))
        }
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.info(&format!("[Error] {message}"))
    }

    pub fn show_title(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        self.info(&rule)?;
        self.info("  Tel-Ran ATM - training cash machine")?;
        self.info(&rule)
    }

    /// Wait for Enter
    pub fn pause(&mut self) -> Result<()> {
        self.console.write_text("Press Enter to continue...")?;
        self.console.read_line().map(|_| ())
    }

    pub fn show_balance(&mut self, balance_cents: u64) -> Result<()> {
        self.info(&format!("Current balance: {}", format_balance(balance_cents)))
    }

    /// The only place a new account number is ever displayed
    pub fn show_account_created(&mut self, account_number: &str) -> Result<()> {
        self.info("")?;
        self.info("Account created.")?;
        self.warn("ATTENTION: the account number is shown only once.")?;
        self.info(&format!("Your account number: {account_number}"))?;
        self.info("")
    }

    pub fn menu_startup(&mut self) -> Result<String> {
        self.info("")?;
        self.info("1) Create a new account")?;
        self.info("2) Log in to an existing account")?;
        self.info("0) Exit")?;
        Ok(self.prompt("Choose an action")?.trim().to_string())
    }

    pub fn menu_session(&mut self) -> Result<String> {
        self.info("")?;
        self.info("1) Deposit money")?;
        self.info("2) Withdraw money")?;
        self.info("3) Show balance")?;
        self.info("0) Exit")?;
        Ok(self.prompt("Choose an action")?.trim().to_string())
    }

    // === Input ===

    /// Print the prompt and read one raw line
    pub fn prompt(&mut self, prompt: &str) -> Result<String> {
        if prompt.is_empty() {
            self.console.write_text(">>> ")?;
        } else {
            self.console.write_text(&format!("{prompt}\n>>> "))?;
        }
        self.console.read_line()
    }

    /// Re-prompt until `validate` accepts the trimmed line
    fn ask_validated<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let raw = self.prompt(prompt)?;
            match validate(raw.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    pub fn ask_text(&mut self, prompt: &str, min_len: usize) -> Result<String> {
        self.ask_validated(prompt, |raw| validate_text(raw, min_len))
    }

    pub fn ask_digits(
        &mut self,
        prompt: &str,
        min_len: usize,
        max_len: Option<usize>,
    ) -> Result<String> {
        self.ask_validated(prompt, |raw| validate_digits(raw, min_len, max_len))
    }

    /// Read an amount in cents; `0` is a valid answer
    pub fn ask_amount(&mut self, prompt: &str) -> Result<u64> {
        self.ask_validated(prompt, parse_amount)
    }

    /// Ask for a new PIN twice until both entries match
    pub fn ask_pin_create(&mut self) -> Result<String> {
        self.info(&format!(
            "Create a PIN code ({PIN_MIN_DIGITS}-{PIN_MAX_DIGITS} digits)."
        ))?;
        loop {
            let first = self.ask_digits("Enter PIN", PIN_MIN_DIGITS, Some(PIN_MAX_DIGITS))?;
            let second = self.ask_digits("Repeat PIN", PIN_MIN_DIGITS, Some(PIN_MAX_DIGITS))?;
            if first == second {
                return Ok(first);
            }
            self.error("PINs do not match. Try again.")?;
        }
    }

    pub fn ask_pin_login(&mut self) -> Result<String> {
        self.ask_digits("Enter PIN", PIN_MIN_DIGITS, Some(PIN_MAX_DIGITS))
    }
}
