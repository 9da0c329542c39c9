//! Error types for docindexlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a listing
#[derive(Error, Debug)]
pub enum DocindexError {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A metadata row does not have as many fields as the header
    #[error("{source_name}, line {line}: expected {expected} fields, found {found}")]
    Format {
        source_name: String,
        line: u64,
        expected: u64,
        found: u64,
    },

    /// Any other CSV decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is not part of the header
    #[error("metadata header has no '{column}' column")]
    MissingColumn { column: String },

    /// Two metadata rows describe the same file and duplicates are rejected
    #[error("duplicate entry for '{filename}' on line {line} (first seen on line {first_line})")]
    DuplicateKey {
        filename: String,
        first_line: u64,
        line: u64,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Byte count too large for the largest size unit
    #[error("size of {0} bytes is beyond the largest supported unit")]
    SizeOutOfRange(u128),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
