//! Password and token authentication for leaguehub.
//!
//! This crate provides:
//! - Argon2id password hashing
//! - HS256 JWT issuance and validation
//! - Registration and login over a [`leaguehub_core::storage::UserRepository`]
//! - Axum extractors for authenticated and admin callers

mod config;
mod cookies;
mod error;
mod extractors;
mod jwt;
mod password;
mod service;
mod state;

#[cfg(test)]
mod test_support;

pub use config::AuthConfig;
pub use cookies::{auth_cookie, clear_auth_cookie};
pub use error::AuthError;
pub use extractors::{AdminUser, CurrentUser};
pub use jwt::{issue_token, validate_token, Claims, TOKEN_SUBJECT};
pub use password::{hash_password, verify_password};
pub use service::{login, register, LoginOutcome};
pub use state::AuthState;
