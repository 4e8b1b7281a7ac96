//! The whole-file store document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::account::Account;

/// Everything the data file holds: `{"accounts": {"<number>": {...}}}`
///
/// Records that do not read as an [`Account`] are kept in `unreadable` and
/// written back unchanged, so one damaged entry never costs the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreDocument {
    pub accounts: BTreeMap<String, Account>,
    pub unreadable: BTreeMap<String, Value>,
}

/// On-disk shape with records left as raw JSON
#[derive(Deserialize)]
struct RawDocument {
    accounts: BTreeMap<String, Value>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoredRecord<'a> {
    Account(&'a Account),
    Unreadable(&'a Value),
}

#[derive(Serialize)]
struct StoredDocument<'a> {
    accounts: BTreeMap<&'a str, StoredRecord<'a>>,
}

impl StoreDocument {
    /// True when the file holds no records at all, readable or not
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.unreadable.is_empty()
    }

    /// True when `number` is taken by any record
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number) || self.unreadable.contains_key(number)
    }

    /// Every number in use
    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.accounts
            .keys()
            .chain(self.unreadable.keys())
            .map(String::as_str)
    }

    /// Insert or overwrite the account keyed by its number
    pub fn insert(&mut self, account: Account) {
        self.unreadable.remove(&account.account_number);
        self.accounts.insert(account.account_number.clone(), account);
    }

    /// Parse a document, falling back to an empty one when the content is
    /// not `{"accounts": {...}}`
    pub fn from_json_lenient(content: &str) -> Self {
        let Ok(raw) = serde_json::from_str::<RawDocument>(content) else {
            return Self::default();
        };

        let mut document = Self::default();
        for (number, record) in raw.accounts {
            match Account::deserialize(&record) {
                Ok(account) => {
                    document.accounts.insert(number, account);
                }
                Err(_) => {
                    document.unreadable.insert(number, record);
                }
            }
        }
        document
    }
}

impl Serialize for StoreDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut accounts: BTreeMap<&str, StoredRecord<'_>> = self
            .unreadable
            .iter()
            .map(|(number, record)| (number.as_str(), StoredRecord::Unreadable(record)))
            .collect();
        for (number, account) in &self.accounts {
            accounts.insert(number.as_str(), StoredRecord::Account(account));
        }
        StoredDocument { accounts }.serialize(serializer)
    }
}
