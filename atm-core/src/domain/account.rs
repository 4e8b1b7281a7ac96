//! Account domain model

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Length of every account number
pub const ACCOUNT_NUMBER_DIGITS: usize = 10;

/// A customer account as persisted in the data file
///
/// Field names are the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Exactly [`ACCOUNT_NUMBER_DIGITS`] ASCII digits, unique within the store
    pub account_number: String,
    pub name: String,
    pub surname: String,
    /// External identity document, free-form
    pub id_number: String,
    pub pin_salt_hex: String,
    pub pin_hash_hex: String,
    #[serde(default)]
    pub balance_cents: u64,
    /// RFC 3339 with second precision
    #[serde(default)]
    pub created_at: String,
}

impl Account {
    /// Create a new account with a zero balance, stamped with the current time
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        id_number: impl Into<String>,
        pin_salt_hex: impl Into<String>,
        pin_hash_hex: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            name: name.into(),
            surname: surname.into(),
            id_number: id_number.into(),
            pin_salt_hex: pin_salt_hex.into(),
            pin_hash_hex: pin_hash_hex.into(),
            balance_cents: 0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }

    /// Check that a string has the shape of an account number
    pub fn is_valid_number(number: &str) -> bool {
        number.len() == ACCOUNT_NUMBER_DIGITS && number.bytes().all(|b| b.is_ascii_digit())
    }

    /// Add `amount_cents` to the balance and return the new balance
    pub fn deposit(&mut self, amount_cents: u64) -> Result<u64> {
        if amount_cents == 0 {
            return Err(Error::validation("deposit amount must be greater than 0"));
        }
        self.balance_cents = self
            .balance_cents
            .checked_add(amount_cents)
            .ok_or(Error::Overflow)?;
        Ok(self.balance_cents)
    }

    /// Take `amount_cents` from the balance and return the new balance
    ///
    /// The balance is left untouched when the amount is zero or exceeds it.
    pub fn withdraw(&mut self, amount_cents: u64) -> Result<u64> {
        if amount_cents == 0 {
            return Err(Error::validation("withdrawal amount must be greater than 0"));
        }
        if amount_cents > self.balance_cents {
            return Err(Error::InsufficientFunds {
                balance_cents: self.balance_cents,
                requested_cents: amount_cents,
            });
        }
        self.balance_cents -= amount_cents;
        Ok(self.balance_cents)
    }

    /// Validate account data
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if !Self::is_valid_number(&self.account_number) {
            return Err("account number must be exactly 10 digits");
        }
        if self.name.trim().is_empty() || self.surname.trim().is_empty() {
            return Err("name and surname cannot be empty");
        }
        Ok(())
    }
}
