//! Custom Axum extractors

pub mod auth;
pub mod query;
pub mod validated;

pub use auth::{AdminUser, AuthUser};
pub use query::ListParams;
pub use validated::ValidatedJson;
