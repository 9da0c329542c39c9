//! Output formatting: present the merged listing as HTML.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **ListingTable**: headers and rows of escaped cell fragments
//! - **ColumnPlan**: per-column rendering rules, resolved once per header
//! - **render_page**: the complete HTML document around the table
//!
//! ListingTable is a pure presentation layer; merging and ordering happen in
//! the data stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use docindexlib::output::{render_page, ColumnPlan, ListingTable, PageConfig, SizeColumn};
//!
//! let plan = ColumnPlan::resolve(metadata.header(), &columns, &text)?;
//! let table = ListingTable::build(metadata.header(), &listing, &plan, &SizeColumn::new(".", "unavailable"));
//! let html = render_page(&table, &PageConfig::default());
//! ```

pub mod page;
pub mod table;

pub use page::{render_page, render_table, PageConfig};
pub use table::{CellFormat, ColumnPlan, ListingTable, RowKind, SizeColumn, TableRow, SIZE_HEADER};
