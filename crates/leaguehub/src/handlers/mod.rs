pub mod admin;
pub mod api;
pub mod auth;
pub mod error;
pub mod health;
pub mod pages;
pub mod profile;
pub mod threads;
pub mod ws;

pub use error::AppError;
