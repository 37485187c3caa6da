//! Storage backend and first-run data.
//!
//! Concrete implementations of the repository traits defined in
//! `leaguehub_core::storage`. SQLite is the only backend.

mod seed;
pub mod sqlite;

pub use seed::seed;
pub use sqlite::SqliteRepository;
