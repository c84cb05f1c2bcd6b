//! Content-addressed key derivation for cached lookups.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const CACHE_KEY_LEN: usize = 16;

/// Derive the storage key for a `(business, city)` lookup.
///
/// Hashes `business + "|" + city` with SHA-256 and keeps the first
/// [`CACHE_KEY_LEN`] hex characters. Inputs are used verbatim: case and
/// whitespace differences produce different keys.
#[must_use]
pub fn cache_key(business: &str, city: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(business.as_bytes());
    hasher.update(b"|");
    hasher.update(city.as_bytes());
    let mut key = format!("{:x}", hasher.finalize());
    key.truncate(CACHE_KEY_LEN);
    key
}
