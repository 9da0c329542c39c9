//! # docindexlib
//!
//! Build an HTML index page for a directory of documents described by a CSV
//! file.
//!
//! ## Overview
//!
//! The pipeline has four stages:
//!
//! - **Source**: list the matching files in a directory (`discover_files`)
//! - **Data**: read the CSV metadata and merge it with the file list (`merge`)
//! - **Format**: decimal byte sizes and HTML/URL escaping (`format_size`)
//! - **Output**: render one table row per file and wrap it in a page (`render_page`)
//!
//! Every file on disk gets a row, described or not. Every CSV row gets a row,
//! even when its file is gone; its size cell then shows a placeholder.
//!
//! ## Example
//!
//! ```rust
//! use docindexlib::{build_listing, ListingOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(
//!     dir.path().join("sources.csv"),
//!     "filename,description,blog_url\nintro.pdf,An introduction,\n",
//! )
//! .unwrap();
//! fs::write(dir.path().join("intro.pdf"), vec![0u8; 1_200]).unwrap();
//! fs::write(dir.path().join("extra.pdf"), "%PDF").unwrap();
//!
//! let options = ListingOptions::new();
//! let listing = build_listing(dir.path(), &options).unwrap();
//! assert_eq!(listing.table.summary.described, 1);
//! assert_eq!(listing.table.summary.undescribed, 1);
//!
//! let html = listing.to_html(&options);
//! assert!(html.contains("An introduction"));
//! assert!(html.contains("this file is not described"));
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod listing;
pub mod options;
pub mod output;
pub mod source;

pub use data::{
    merge, read_metadata, DuplicatePolicy, MergeSummary, MergedListing, MergedRow,
    MetadataRecord, MetadataTable,
};
pub use error::DocindexError;
pub use format::{escape_html, escape_url, format_size};
pub use listing::{build_listing, Listing};
pub use options::{ColumnNames, ListingOptions, PlaceholderText};
pub use output::{render_page, CellFormat, ColumnPlan, ListingTable, PageConfig, TableRow};
pub use source::{discover_files, FilterConfig};

/// Result type for docindexlib operations
pub type Result<T> = std::result::Result<T, DocindexError>;
