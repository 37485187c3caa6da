//! Cache backends and the tiered lookup used for standings.
//!
//! - [`TtlCache`]: in-process key-value store with per-entry expiry
//! - [`RedisCache`]: optional external cache, a no-op when unconfigured
//! - [`TieredCache`]: ordered list of tiers consulted front to back

mod memory;
mod redis_impl;
mod tiered;

pub use memory::TtlCache;
pub use redis_impl::RedisCache;
pub use tiered::TieredCache;
