//! Centralized error handling for the IPTV scanner
//!
//! # Error Categories
//!
//! - **Configuration Errors**: unreadable or invalid config, bad normalizer rules
//! - **Input/Output Errors**: seed list cannot be read, result files cannot be written
//! - **Source Errors**: per-host network and parse failures; never fatal
//!
//! # Usage
//!
//! ```rust
//! use iptv_scanner::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
