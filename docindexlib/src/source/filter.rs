//! File filtering and discovery.
//!
//! Lists the documents sitting directly inside a directory, keeping only the
//! configured extensions and dropping anything an exclude glob matches.

use std::path::Path;

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::DocindexError;
use crate::Result;

/// Extension listed when none is configured.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Extensions to keep, compared case-insensitively (empty keeps every file)
    pub extensions: Vec<String>,
    /// Glob patterns matched against the bare filename
    pub exclude: Vec<Pattern>,
    /// Reverse the natural (ascending) enumeration order
    pub reverse: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            exclude: Vec::new(),
            reverse: false,
        }
    }
}

impl FilterConfig {
    /// Create a filter keeping `.pdf` files in ascending order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension set.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| DocindexError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Set the enumeration direction.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Check if a filename matches the filter criteria.
    ///
    /// A name matches if:
    /// 1. It is not hidden
    /// 2. Its extension is one of the configured ones (or none are configured)
    /// 3. It doesn't match any exclude pattern
    pub fn matches(&self, filename: &str) -> bool {
        if filename.starts_with('.') {
            return false;
        }

        if !self.extensions.is_empty() {
            let ext = match Path::new(filename).extension().and_then(|e| e.to_str()) {
                Some(ext) => ext,
                None => return false,
            };
            if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                return false;
            }
        }

        !self.exclude.iter().any(|pattern| pattern.matches(filename))
    }
}

/// Discover matching files directly inside `dir`.
///
/// Subdirectories are not entered. Names come back in ascending byte order,
/// or descending when the filter asks for it. An empty directory yields an
/// empty list.
pub fn discover_files(dir: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<String>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(DocindexError::PathNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(name) => name,
            None => {
                debug!(path = %entry.path().display(), "skipping non UTF-8 filename");
                continue;
            }
        };

        if filter.matches(name) {
            files.push(name.to_string());
        }
    }

    files.sort();
    if filter.reverse {
        files.reverse();
    }

    debug!(dir = %dir.display(), count = files.len(), "discovered files");

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("archive")).unwrap();
        fs::create_dir_all(dir.join("nested.pdf")).unwrap();

        fs::write(dir.join("b-report.pdf"), "%PDF-1.4").unwrap();
        fs::write(dir.join("a-paper.pdf"), "%PDF-1.4").unwrap();
        fs::write(dir.join("c-slides.PDF"), "%PDF-1.4").unwrap();
        fs::write(dir.join("draft-notes.pdf"), "%PDF-1.4").unwrap();
        fs::write(dir.join("notes.txt"), "plain").unwrap();
        fs::write(dir.join(".hidden.pdf"), "%PDF-1.4").unwrap();
        fs::write(dir.join("sources.csv"), "filename\n").unwrap();
        fs::write(dir.join("archive/old.pdf"), "%PDF-1.4").unwrap();
    }

    #[test]
    fn test_filter_matches_extension() {
        let filter = FilterConfig::new();

        assert!(filter.matches("paper.pdf"));
        assert!(filter.matches("PAPER.PDF"));
        assert!(!filter.matches("paper.txt"));
        assert!(!filter.matches("pdf"));
        assert!(!filter.matches(".hidden.pdf"));
    }

    #[test]
    fn test_filter_with_several_extensions() {
        let filter = FilterConfig::new().extensions([".pdf", "epub"]);

        assert!(filter.matches("book.epub"));
        assert!(filter.matches("paper.pdf"));
        assert!(!filter.matches("notes.md"));
    }

    #[test]
    fn test_filter_without_extensions_keeps_everything() {
        let filter = FilterConfig::new().extensions(Vec::<String>::new());

        assert!(filter.matches("README"));
        assert!(filter.matches("notes.md"));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("draft-*").unwrap();

        assert!(filter.matches("paper.pdf"));
        assert!(!filter.matches("draft-paper.pdf"));
    }

    #[test]
    fn test_discover_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert_eq!(
            files,
            vec!["a-paper.pdf", "b-report.pdf", "c-slides.PDF", "draft-notes.pdf"]
        );
    }

    #[test]
    fn test_discover_files_reversed() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::new().reverse(true);
        let files = discover_files(temp.path(), &filter).unwrap();

        assert_eq!(
            files,
            vec!["draft-notes.pdf", "c-slides.PDF", "b-report.pdf", "a-paper.pdf"]
        );
    }

    #[test]
    fn test_discover_files_with_exclude() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::new().exclude_many(&["draft-*", "c-*"]).unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();

        assert_eq!(files, vec!["a-paper.pdf", "b-report.pdf"]);
    }

    #[test]
    fn test_discover_files_empty_directory() {
        let temp = tempdir().unwrap();

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_files_nonexistent() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());

        assert!(matches!(result, Err(DocindexError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().exclude("[invalid");

        if let Err(DocindexError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
