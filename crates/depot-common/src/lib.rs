//! # depot-common
//!
//! Shared configuration and error types for appdepot.

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
