//! Functional core for leaguehub.
//!
//! Everything in this crate is free of I/O: domain types, standings
//! ordering, result application, cache and repository traits, and the
//! pure helpers the server crate builds on.

pub mod auth;
pub mod cache;
pub mod league;
pub mod storage;
