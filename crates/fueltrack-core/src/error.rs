//! Error types for fueltrack
//!
//! This module defines the error types used throughout the fueltrack crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! The analytics engine itself never fails: a fill whose efficiency cannot be
//! computed simply carries no derived fields. Errors only come from loading
//! fill logs, parsing command-line input and resolving configuration.
//!
//! # Example
//!
//! ```
//! use fueltrack_core::error::{FueltrackError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to FueltrackError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fueltrack operations
#[derive(Error, Debug)]
pub enum FueltrackError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No fill log could be found at the given location
    #[error("No fill log found at {0}")]
    NoData(PathBuf),
}

/// Convenience type alias for Results in fueltrack
///
/// # Example
///
/// ```
/// use fueltrack_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FueltrackError>;
