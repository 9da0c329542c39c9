//! Source discovery: find the documents to list.
//!
//! This module handles the first stage of the pipeline. It lists the files
//! directly inside the target directory, filtered by extension and optional
//! exclude globs, in ascending or reversed order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use docindexlib::source::{discover_files, FilterConfig};
//!
//! let filter = FilterConfig::new().extensions(["pdf"]).reverse(true);
//! let files = discover_files(".", &filter)?;
//! ```

pub mod filter;

pub use filter::{discover_files, FilterConfig, DEFAULT_EXTENSION};
