//! Cassette Core Library
//!
//! This crate provides the error taxonomy and configuration shared across
//! the cassette components.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
