// src/error.rs
//! Crate-wide error type

use thiserror::Error;

/// Result type for pantry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the recipe store and snapshot layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization or parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
