mod error;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use serialization::{deserialize_table, serialize_table, SerializationError};
pub use traits::Cache;

/// Cache key under which the computed league table is stored in every tier.
pub const LEAGUE_TABLE_KEY: &str = "league_table";
