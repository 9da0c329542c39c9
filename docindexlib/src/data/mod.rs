//! Data collection: read metadata and merge it with the file listing.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Metadata**: CSV parsing into header plus records (`read_metadata`)
//! - **Merging**: one ordered row per filename (`merge`, `MergedListing`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use docindexlib::data::{merge, read_metadata, DuplicatePolicy};
//!
//! let metadata = read_metadata("sources.csv")?;
//! let listing = merge(files, &metadata, "filename", DuplicatePolicy::LastWins)?;
//! println!("{} rows", listing.len());
//! ```

pub mod merge;
pub mod metadata;

pub use merge::{merge, DuplicateEntry, DuplicatePolicy, MergeSummary, MergedListing, MergedRow};
pub use metadata::{read_metadata, MetadataRecord, MetadataTable, DEFAULT_METADATA_FILE};
