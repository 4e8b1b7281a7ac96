//! PIN credentials - salted SHA-256 digests
//!
//! `hash = sha256(salt || pin_utf8)`. Salt and hash are stored as lowercase
//! hex next to the account.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::result::Result;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Hex-encoded salt and hash for one PIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub salt_hex: String,
    pub hash_hex: String,
}

/// Digest of `salt` followed by the PIN's UTF-8 bytes
pub fn hash_pin(pin: &str, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(pin.as_bytes());
    hasher.finalize().into()
}

/// Create a record for `pin` with a fresh OS-random salt
pub fn make_pin_record(pin: &str) -> PinRecord {
    make_pin_record_with(pin, &mut OsRng)
}

/// Create a record for `pin` drawing the salt from `rng`
pub fn make_pin_record_with(pin: &str, rng: &mut dyn RngCore) -> PinRecord {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    PinRecord {
        salt_hex: hex::encode(salt),
        hash_hex: hex::encode(hash_pin(pin, &salt)),
    }
}

/// Check `pin` against a stored salt and hash in constant time
///
/// Malformed hex is an error, not a mismatch.
pub fn verify_pin(pin: &str, salt_hex: &str, hash_hex: &str) -> Result<bool> {
    let salt = hex::decode(salt_hex)?;
    let expected = hex::decode(hash_hex)?;
    let actual = hash_pin(pin, &salt);
    Ok(bool::from(actual.as_slice().ct_eq(expected.as_slice())))
}
