//! Metadata reading: parse the CSV file describing the documents.
//!
//! The first row is the header and names the columns. Every following row
//! becomes a [`MetadataRecord`] holding one value per header column. A row
//! with a different number of fields is a fatal [`DocindexError::Format`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::DocindexError;
use crate::Result;

/// Metadata file read when none is configured.
pub const DEFAULT_METADATA_FILE: &str = "sources.csv";

/// One data row, keyed by the header's column names.
///
/// Values are stored in header order. Looking up a column that the header
/// does not define returns `None`; a cell that exists but is blank returns
/// `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    header: Arc<[String]>,
    values: Vec<String>,
    line: u64,
}

impl MetadataRecord {
    /// Build a record against a header. `values` must be header-aligned.
    pub fn new(header: Arc<[String]>, values: Vec<String>, line: u64) -> Self {
        debug_assert_eq!(header.len(), values.len());
        Self {
            header,
            values,
            line,
        }
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.value(idx))
    }

    /// Value at a header position.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Iterate `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Line in the source file this record was read from (1-based).
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Parsed metadata file: header plus records in file order.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    header: Arc<[String]>,
    records: Vec<MetadataRecord>,
}

impl MetadataTable {
    /// Parse CSV text from any reader.
    ///
    /// `source_name` only appears in error messages.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(Trim::Headers)
            .from_reader(reader);

        let header: Arc<[String]> = rdr
            .headers()
            .map_err(|e| format_error(e, source_name))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into();

        let mut records = Vec::new();
        let mut row = StringRecord::new();
        loop {
            match rdr.read_record(&mut row) {
                Ok(true) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    let values = row.iter().map(str::to_string).collect();
                    records.push(MetadataRecord::new(Arc::clone(&header), values, line));
                }
                Ok(false) => break,
                Err(e) => return Err(format_error(e, source_name)),
            }
        }

        debug!(
            source = source_name,
            columns = header.len(),
            records = records.len(),
            "read metadata"
        );

        Ok(Self { header, records })
    }

    /// Column names in file order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Records in file order.
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    /// Position of a column in the header.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|name| name == column)
    }

    /// Position of a column that must exist.
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| DocindexError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the file has a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse a metadata file.
pub fn read_metadata(path: impl AsRef<Path>) -> Result<MetadataTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DocindexError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    MetadataTable::from_reader(file, &path.display().to_string())
}

fn format_error(err: csv::Error, source_name: &str) -> DocindexError {
    match err.kind() {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => DocindexError::Format {
            source_name: source_name.to_string(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected: *expected_len,
            found: *len,
        },
        _ => DocindexError::Csv(err),
    }
}
