//! Merging: reconcile the directory listing with the metadata records.
//!
//! The result is an ordered mapping from filename to [`MergedRow`]. Files
//! found on disk keep their enumeration order; records naming files that are
//! not on disk are appended afterwards, in the order they appear in the CSV.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::metadata::{MetadataRecord, MetadataTable};
use crate::error::DocindexError;
use crate::Result;

/// What to do when two metadata rows name the same file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier one; the collision is reported
    #[default]
    LastWins,
    /// The first collision aborts the merge
    Reject,
}

/// Merged value for one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedRow {
    /// On disk and described by a metadata row
    Described(MetadataRecord),
    /// On disk, no metadata row
    Undescribed,
    /// Described by a metadata row, but not on disk
    Orphaned(MetadataRecord),
}

impl MergedRow {
    /// Metadata attached to this row, if any.
    pub fn record(&self) -> Option<&MetadataRecord> {
        match self {
            MergedRow::Described(record) | MergedRow::Orphaned(record) => Some(record),
            MergedRow::Undescribed => None,
        }
    }

    /// Whether the enumerator saw this file.
    pub fn on_disk(&self) -> bool {
        !matches!(self, MergedRow::Orphaned(_))
    }
}

/// A metadata row that replaced an earlier row for the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub filename: String,
    pub first_line: u64,
    pub line: u64,
}

/// Row counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub described: usize,
    pub undescribed: usize,
    pub orphaned: usize,
    pub duplicates: usize,
}

impl MergeSummary {
    /// Total number of rows.
    pub fn total(&self) -> usize {
        self.described + self.undescribed + self.orphaned
    }
}

/// Ordered filename → [`MergedRow`] mapping.
#[derive(Debug, Clone, Default)]
pub struct MergedListing {
    entries: Vec<(String, MergedRow)>,
    index: HashMap<String, usize>,
    duplicates: Vec<DuplicateEntry>,
}

impl MergedListing {
    /// Look up a row by filename.
    pub fn get(&self, filename: &str) -> Option<&MergedRow> {
        self.index.get(filename).map(|&idx| &self.entries[idx].1)
    }

    /// Iterate rows in merge order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MergedRow)> {
        self.entries.iter().map(|(name, row)| (name.as_str(), row))
    }

    /// Filenames in merge order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata rows that were overwritten by a later row.
    pub fn duplicates(&self) -> &[DuplicateEntry] {
        &self.duplicates
    }

    /// Count rows by kind.
    pub fn summary(&self) -> MergeSummary {
        let mut summary = MergeSummary {
            duplicates: self.duplicates.len(),
            ..MergeSummary::default()
        };
        for (_, row) in &self.entries {
            match row {
                MergedRow::Described(_) => summary.described += 1,
                MergedRow::Undescribed => summary.undescribed += 1,
                MergedRow::Orphaned(_) => summary.orphaned += 1,
            }
        }
        summary
    }

    fn push(&mut self, filename: String, row: MergedRow) {
        self.index.insert(filename.clone(), self.entries.len());
        self.entries.push((filename, row));
    }
}

/// Merge enumerated filenames with metadata records.
///
/// `key_column` names the header column holding the filename. Records whose
/// key cell is blank cannot be matched to anything and are skipped with a
/// warning.
pub fn merge<I, S>(
    filenames: I,
    metadata: &MetadataTable,
    key_column: &str,
    policy: DuplicatePolicy,
) -> Result<MergedListing>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let key_idx = metadata.require_column(key_column)?;
    let mut listing = MergedListing::default();

    for name in filenames {
        let name = name.into();
        if listing.index.contains_key(&name) {
            continue;
        }
        listing.push(name, MergedRow::Undescribed);
    }

    let mut seen: HashMap<&str, u64> = HashMap::new();

    for record in metadata.records() {
        let key = record.value(key_idx).unwrap_or_default();
        if key.is_empty() {
            warn!(line = record.line(), "metadata row has no filename, skipping");
            continue;
        }

        if let Some(&first_line) = seen.get(key) {
            if policy == DuplicatePolicy::Reject {
                return Err(DocindexError::DuplicateKey {
                    filename: key.to_string(),
                    first_line,
                    line: record.line(),
                });
            }
            warn!(
                filename = key,
                first_line,
                line = record.line(),
                "duplicate metadata row, keeping the later one"
            );
            listing.duplicates.push(DuplicateEntry {
                filename: key.to_string(),
                first_line,
                line: record.line(),
            });
        }
        seen.insert(key, record.line());

        match listing.index.get(key) {
            Some(&idx) => {
                let row = &mut listing.entries[idx].1;
                *row = if row.on_disk() {
                    MergedRow::Described(record.clone())
                } else {
                    MergedRow::Orphaned(record.clone())
                };
            }
            None => listing.push(key.to_string(), MergedRow::Orphaned(record.clone())),
        }
    }

    debug!(summary = ?listing.summary(), "merged listing");

    Ok(listing)
}
