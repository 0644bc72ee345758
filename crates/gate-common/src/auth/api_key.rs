//! API key generation
//!
//! Keys are opaque bearer secrets presented in the `X-Api-Key` header. They
//! are minted once at user creation and stored as-is; there is no rotation
//! or expiry.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Header clients present their key in
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Length of a generated key in characters
pub const API_KEY_LENGTH: usize = 64;

/// Generate a new random API key (64 alphanumeric characters)
#[must_use]
pub fn generate_api_key() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_length_and_charset() {
        let key = generate_api_key();
        assert_eq!(key.len(), API_KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_keys_are_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
    }
}
