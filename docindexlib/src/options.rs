//! Input options for building a listing.
//!
//! Every setting has a default matching the conventional layout: a
//! `sources.csv` next to the PDFs, with `filename`, `description`, and
//! `blog_url` columns. Options can be built in code or loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::{DuplicatePolicy, DEFAULT_METADATA_FILE};
use crate::error::DocindexError;
use crate::output::PageConfig;
use crate::source::{FilterConfig, DEFAULT_EXTENSION};
use crate::Result;

/// Names of the columns that get special rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Merge key, rendered as a link to the file
    pub filename: String,
    /// Rendered with a warning when blank
    pub description: String,
    /// Rendered as a glyph link when set
    pub blog_url: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            filename: "filename".to_string(),
            description: "description".to_string(),
            blog_url: "blog_url".to_string(),
        }
    }
}

/// Fixed strings shown in place of missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderText {
    /// Shown in the description column of undescribed files
    pub missing_description: String,
    /// Shown in the size column when the file cannot be read
    pub missing_size: String,
    /// Link text for the blog link column
    pub link_glyph: String,
}

impl Default for PlaceholderText {
    fn default() -> Self {
        Self {
            missing_description: "this file is not described".to_string(),
            missing_size: "unavailable".to_string(),
            link_glyph: "\u{1F517}".to_string(),
        }
    }
}

/// Options for building a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingOptions {
    /// Metadata file, relative to the listed directory unless absolute
    pub csv: PathBuf,
    /// Extensions to list (empty lists every file)
    pub extensions: Vec<String>,
    /// Glob patterns of filenames to leave out
    pub exclude: Vec<String>,
    /// List files in descending instead of ascending order
    pub reverse: bool,
    /// Special column names
    pub columns: ColumnNames,
    /// Placeholder strings
    pub text: PlaceholderText,
    /// Handling of metadata rows that repeat a filename
    pub duplicates: DuplicatePolicy,
    /// Page chrome
    pub page: PageConfig,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            csv: PathBuf::from(DEFAULT_METADATA_FILE),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            exclude: Vec::new(),
            reverse: false,
            columns: ColumnNames::default(),
            text: PlaceholderText::default(),
            duplicates: DuplicatePolicy::default(),
            page: PageConfig::default(),
        }
    }
}

impl ListingOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON text. Missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DocindexError::Config(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocindexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| DocindexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Set the metadata file.
    pub fn csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv = path.into();
        self
    }

    /// Set the listed extensions.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the exclude patterns.
    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Set the enumeration direction.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Set the duplicate policy.
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Build the enumerator filter these options describe.
    pub fn filter(&self) -> Result<FilterConfig> {
        FilterConfig::new()
            .extensions(&self.extensions)
            .reverse(self.reverse)
            .exclude_many(&self.exclude)
    }

    /// Metadata file location for a listed directory.
    pub fn csv_path(&self, dir: &Path) -> PathBuf {
        if self.csv.is_absolute() {
            self.csv.clone()
        } else {
            dir.join(&self.csv)
        }
    }
}
