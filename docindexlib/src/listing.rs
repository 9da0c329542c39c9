//! High-level listing API.
//!
//! This module provides the main entry point: read the metadata, list the
//! directory, merge both, and build the table.

use std::path::Path;

use tracing::info;

use crate::data::{merge, read_metadata};
use crate::options::ListingOptions;
use crate::output::{render_page, ColumnPlan, ListingTable, SizeColumn};
use crate::source::discover_files;
use crate::Result;

/// Result of building a listing.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Rendered table, including its row counts
    pub table: ListingTable,
}

impl Listing {
    /// Render the complete HTML page using the options' page settings.
    pub fn to_html(&self, options: &ListingOptions) -> String {
        render_page(&self.table, &options.page)
    }
}

/// Build the listing for a directory.
///
/// This:
/// 1. Reads the metadata file (any error here is fatal)
/// 2. Lists matching files in `dir`
/// 3. Merges both into one row per filename
/// 4. Renders every row, stating files for their size
///
/// # Example
///
/// ```rust,ignore
/// use docindexlib::{build_listing, ListingOptions};
///
/// let options = ListingOptions::new().reverse(true);
/// let listing = build_listing(".", &options)?;
/// println!("{}", listing.to_html(&options));
/// ```
pub fn build_listing(dir: impl AsRef<Path>, options: &ListingOptions) -> Result<Listing> {
    let dir = dir.as_ref();

    let metadata = read_metadata(options.csv_path(dir))?;
    let plan = ColumnPlan::resolve(metadata.header(), &options.columns, &options.text)?;

    let files = discover_files(dir, &options.filter()?)?;
    let merged = merge(
        files,
        &metadata,
        &options.columns.filename,
        options.duplicates,
    )?;

    let sizes = SizeColumn::new(dir, options.text.missing_size.clone());
    let table = ListingTable::build(metadata.header(), &merged, &plan, &sizes);
    let summary = &table.summary;

    info!(
        dir = %dir.display(),
        rows = summary.total(),
        described = summary.described,
        undescribed = summary.undescribed,
        orphaned = summary.orphaned,
        "built listing"
    );

    Ok(Listing { table })
}
