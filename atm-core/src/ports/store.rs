//! Account store port - persistence abstraction

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

use crate::domain::result::{Error, Result};
use crate::domain::{Account, StoreDocument, ACCOUNT_NUMBER_DIGITS};

/// Largest supported account number width (10^18 fits in a u64)
const MAX_GENERATED_DIGITS: usize = 18;

/// Whole-document account storage
///
/// Implementations only load and save the full document. Every other
/// operation is a read (or read-modify-write) on top of those two, so each
/// mutating call rewrites the whole document.
///
/// There is no locking: two writers running load-modify-save at the same
/// time lose one update.
pub trait AccountStore: Send + Sync {
    /// Load the full document. Missing or foreign data yields an empty one.
    fn load(&self) -> Result<StoreDocument>;

    /// Replace the stored document
    fn save(&self, document: &StoreDocument) -> Result<()>;

    /// True when at least one record is stored
    fn has_any_accounts(&self) -> Result<bool> {
        Ok(!self.load()?.is_empty())
    }

    /// True when the number is taken, even by a record that no longer reads
    fn account_exists(&self, account_number: &str) -> Result<bool> {
        Ok(self.load()?.contains(account_number))
    }

    /// Get account by number
    fn get_account(&self, account_number: &str) -> Result<Option<Account>> {
        Ok(self.load()?.accounts.remove(account_number))
    }

    /// Insert or overwrite the account keyed by its number, then persist
    fn upsert_account(&self, account: &Account) -> Result<()> {
        let mut document = self.load()?;
        document.insert(account.clone());
        self.save(&document)
    }

    /// Generate an unused account number of [`ACCOUNT_NUMBER_DIGITS`] digits
    fn generate_unique_account_number(&self) -> Result<String> {
        self.generate_unique_account_number_with(ACCOUNT_NUMBER_DIGITS, &mut OsRng)
    }

    /// Draw zero-padded numbers in `[0, 10^digits)` from `rng` until one is
    /// not present in the stored document
    ///
    /// Fails with [`Error::NumbersExhausted`] when every number of that
    /// width is already taken.
    ///
    /// Nothing is reserved: the number is only unique until someone else
    /// stores it.
    fn generate_unique_account_number_with(
        &self,
        digits: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        if digits == 0 || digits > MAX_GENERATED_DIGITS {
            return Err(Error::validation(format!(
                "account number width must be between 1 and {MAX_GENERATED_DIGITS}"
            )));
        }
        let upper = 10u64.pow(digits as u32);

        let document = self.load()?;
        let taken = document
            .numbers()
            .filter(|n| n.len() == digits && n.bytes().all(|b| b.is_ascii_digit()))
            .count() as u64;
        if taken >= upper {
            return Err(Error::NumbersExhausted { digits });
        }

        loop {
            let candidate = format!("{:0width$}", rng.gen_range(0..upper), width = digits);
            if !document.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
