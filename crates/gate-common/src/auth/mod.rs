//! API key generation

mod api_key;

pub use api_key::{generate_api_key, API_KEY_HEADER, API_KEY_LENGTH};
