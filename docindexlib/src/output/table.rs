//! Table-ready data structures for the listing.
//!
//! The data flow is:
//! 1. Raw data (file names, `MetadataTable`)
//! 2. `MergedListing` (one row per filename, in display order)
//! 3. `ListingTable` (HTML cell fragments, ready for the page)
//!
//! How a column is rendered is decided once per header by [`ColumnPlan`];
//! building rows only walks the resolved [`CellFormat`]s.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{MergeSummary, MergedListing, MergedRow};
use crate::error::DocindexError;
use crate::format::{escape_html, escape_url, format_size};
use crate::options::{ColumnNames, PlaceholderText};
use crate::Result;

/// Header label of the computed size column.
pub const SIZE_HEADER: &str = "filesize";

/// Rendering rule for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellFormat {
    /// Escaped value
    PlainText,
    /// Link to the file: escaped URL as target, escaped name as text
    FileLink,
    /// Escaped value, or the placeholder when blank or absent
    TextWithFallback { placeholder: String },
    /// Link to the raw value with a glyph as text; empty cell when blank
    GlyphLink { glyph: String },
}

impl CellFormat {
    /// Render a cell's inner HTML.
    pub fn render(&self, value: Option<&str>) -> String {
        let value = value.filter(|v| !v.trim().is_empty());
        match (self, value) {
            (CellFormat::PlainText, v) => escape_html(v.unwrap_or_default()),
            (CellFormat::FileLink, Some(name)) => format!(
                r#"<a href="{}">{}</a>"#,
                escape_url(name),
                escape_html(name)
            ),
            (CellFormat::FileLink, None) => String::new(),
            (CellFormat::TextWithFallback { .. }, Some(text)) => escape_html(text),
            (CellFormat::TextWithFallback { placeholder }, None) => missing(placeholder),
            (CellFormat::GlyphLink { glyph }, Some(href)) => {
                format!(r#"<a href="{}">{}</a>"#, href, escape_html(glyph))
            }
            (CellFormat::GlyphLink { .. }, None) => String::new(),
        }
    }
}

/// Per-column rendering rules resolved from a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    formats: Vec<CellFormat>,
    key_index: usize,
}

impl ColumnPlan {
    /// Resolve a format for every header column.
    ///
    /// Fails when the header lacks the filename column.
    pub fn resolve(
        header: &[String],
        columns: &ColumnNames,
        text: &PlaceholderText,
    ) -> Result<Self> {
        let key_index = header
            .iter()
            .position(|name| *name == columns.filename)
            .ok_or_else(|| DocindexError::MissingColumn {
                column: columns.filename.clone(),
            })?;

        let formats = header
            .iter()
            .map(|name| {
                if *name == columns.filename {
                    CellFormat::FileLink
                } else if *name == columns.description {
                    CellFormat::TextWithFallback {
                        placeholder: text.missing_description.clone(),
                    }
                } else if *name == columns.blog_url {
                    CellFormat::GlyphLink {
                        glyph: text.link_glyph.clone(),
                    }
                } else {
                    CellFormat::PlainText
                }
            })
            .collect();

        Ok(Self { formats, key_index })
    }

    /// Formats in header order.
    pub fn formats(&self) -> &[CellFormat] {
        &self.formats
    }

    /// Header position of the filename column.
    pub fn key_index(&self) -> usize {
        self.key_index
    }
}

/// Computes the size column from the files on disk.
#[derive(Debug, Clone)]
pub struct SizeColumn {
    dir: PathBuf,
    placeholder: String,
}

impl SizeColumn {
    pub fn new(dir: impl Into<PathBuf>, placeholder: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Size cell for a row: zero-decimal size, or the placeholder when the
    /// row has no file in the directory or the file cannot be read.
    ///
    /// Only rows found on disk are stat'ed, and only as plain entries of the
    /// listed directory.
    pub fn render(&self, filename: &str, on_disk: bool) -> String {
        if !on_disk || !is_plain_name(filename) {
            return missing(&self.placeholder);
        }

        let path = self.dir.join(filename);
        let size = fs::metadata(&path).map_err(DocindexError::from).and_then(|meta| {
            if meta.is_file() {
                format_size(u128::from(meta.len()), 0)
            } else {
                Err(DocindexError::PathNotFound(path.clone()))
            }
        });
        match size {
            Ok(size) => size,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "file size unavailable");
                missing(&self.placeholder)
            }
        }
    }
}

/// A single normal path component: no separators, no `..`, not absolute.
fn is_plain_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Kind of a table row, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Described,
    Undescribed,
    Orphaned,
}

impl RowKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            RowKind::Described => "described",
            RowKind::Undescribed => "undescribed",
            RowKind::Orphaned => "orphaned",
        }
    }
}

impl From<&MergedRow> for RowKind {
    fn from(row: &MergedRow) -> Self {
        match row {
            MergedRow::Described(_) => RowKind::Described,
            MergedRow::Undescribed => RowKind::Undescribed,
            MergedRow::Orphaned(_) => RowKind::Orphaned,
        }
    }
}

/// A single body row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Merge key of the row
    pub filename: String,
    /// Where the row came from
    pub kind: RowKind,
    /// Inner HTML of each cell, size cell last
    pub cells: Vec<String>,
}

/// Table-ready listing.
///
/// Header labels and cells are already escaped; the page renderer only
/// wraps them in markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingTable {
    /// Header labels: CSV columns, then the size column
    pub headers: Vec<String>,
    /// Body rows in merge order
    pub rows: Vec<TableRow>,
    /// Row counts by kind
    pub summary: MergeSummary,
}

impl ListingTable {
    /// Render every merged row against a resolved column plan.
    pub fn build(
        header: &[String],
        listing: &MergedListing,
        plan: &ColumnPlan,
        sizes: &SizeColumn,
    ) -> Self {
        let mut headers: Vec<String> = header.iter().map(|name| escape_html(name)).collect();
        headers.push(SIZE_HEADER.to_string());

        let rows = listing
            .iter()
            .map(|(filename, row)| {
                let record = row.record();
                let mut cells: Vec<String> = plan
                    .formats()
                    .iter()
                    .enumerate()
                    .map(|(idx, format)| {
                        let value = if idx == plan.key_index() {
                            Some(filename)
                        } else {
                            record.and_then(|r| r.value(idx))
                        };
                        format.render(value)
                    })
                    .collect();
                cells.push(sizes.render(filename, row.on_disk()));

                TableRow {
                    filename: filename.to_string(),
                    kind: RowKind::from(row),
                    cells,
                }
            })
            .collect();

        ListingTable {
            headers,
            rows,
            summary: listing.summary(),
        }
    }

    /// Find a row by filename.
    pub fn row(&self, filename: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.filename == filename)
    }
}

fn missing(placeholder: &str) -> String {
    format!(r#"<em class="missing">{}</em>"#, escape_html(placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{merge, DuplicatePolicy, MetadataTable};
    use std::fs;
    use tempfile::tempdir;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn plan(names: &[&str]) -> ColumnPlan {
        ColumnPlan::resolve(
            &header(names),
            &ColumnNames::default(),
            &PlaceholderText::default(),
        )
        .unwrap()
    }

    fn build(dir: &Path, files: &[&str], csv: &str) -> ListingTable {
        let meta = MetadataTable::from_reader(csv.as_bytes(), "sources.csv").unwrap();
        let listing = merge(
            files.iter().copied(),
            &meta,
            "filename",
            DuplicatePolicy::LastWins,
        )
        .unwrap();
        let plan = ColumnPlan::resolve(
            meta.header(),
            &ColumnNames::default(),
            &PlaceholderText::default(),
        )
        .unwrap();
        let sizes = SizeColumn::new(dir, "unavailable");
        ListingTable::build(meta.header(), &listing, &plan, &sizes)
    }

    #[test]
    fn test_plan_resolves_special_columns() {
        let plan = plan(&["filename", "description", "blog_url", "year"]);

        assert_eq!(plan.key_index(), 0);
        assert_eq!(plan.formats()[0], CellFormat::FileLink);
        assert!(matches!(
            &plan.formats()[1],
            CellFormat::TextWithFallback { placeholder } if placeholder == "this file is not described"
        ));
        assert!(matches!(&plan.formats()[2], CellFormat::GlyphLink { .. }));
        assert_eq!(plan.formats()[3], CellFormat::PlainText);
    }

    #[test]
    fn test_plan_with_renamed_columns() {
        let columns = ColumnNames {
            filename: "file".to_string(),
            description: "summary".to_string(),
            blog_url: "post".to_string(),
        };
        let plan = ColumnPlan::resolve(
            &header(&["summary", "file", "post"]),
            &columns,
            &PlaceholderText::default(),
        )
        .unwrap();

        assert_eq!(plan.key_index(), 1);
        assert_eq!(plan.formats()[1], CellFormat::FileLink);
        assert!(matches!(&plan.formats()[2], CellFormat::GlyphLink { .. }));
    }

    #[test]
    fn test_plan_requires_filename_column() {
        let result = ColumnPlan::resolve(
            &header(&["description"]),
            &ColumnNames::default(),
            &PlaceholderText::default(),
        );

        assert!(matches!(result, Err(DocindexError::MissingColumn { .. })));
    }

    #[test]
    fn test_file_link_escapes_target_and_text() {
        let cell = CellFormat::FileLink.render(Some("Q&A <draft>.pdf"));

        assert_eq!(
            cell,
            r#"<a href="Q%26A%20%3Cdraft%3E.pdf">Q&amp;A &lt;draft&gt;.pdf</a>"#
        );
    }

    #[test]
    fn test_glyph_link_keeps_raw_href() {
        let format = CellFormat::GlyphLink {
            glyph: "#".to_string(),
        };

        assert_eq!(
            format.render(Some("https://example.org/post?a=1&b=2")),
            r#"<a href="https://example.org/post?a=1&b=2">#</a>"#
        );
        assert_eq!(format.render(Some("")), "");
        assert_eq!(format.render(None), "");
    }

    #[test]
    fn test_fallback_text() {
        let format = CellFormat::TextWithFallback {
            placeholder: "nothing here".to_string(),
        };

        assert_eq!(format.render(Some("Fine")), "Fine");
        assert_eq!(
            format.render(Some("   ")),
            r#"<em class="missing">nothing here</em>"#
        );
        assert_eq!(
            format.render(None),
            r#"<em class="missing">nothing here</em>"#
        );
    }

    #[test]
    fn test_headers_end_with_size_column() {
        let temp = tempdir().unwrap();
        let table = build(temp.path(), &[], "filename,description,blog_url\n");

        assert_eq!(table.headers, vec!["filename", "description", "blog_url", "filesize"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_undescribed_file_row() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("report.pdf"), vec![0u8; 1500]).unwrap();

        let table = build(temp.path(), &["report.pdf"], "filename,description,blog_url\n");
        let row = table.row("report.pdf").unwrap();

        assert_eq!(row.kind, RowKind::Undescribed);
        assert_eq!(row.cells[0], r#"<a href="report.pdf">report.pdf</a>"#);
        assert!(row.cells[1].contains("this file is not described"));
        assert_eq!(row.cells[2], "");
        assert_eq!(row.cells[3], "2kB");
    }

    #[test]
    fn test_described_file_row() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.pdf"), b"12345").unwrap();

        let table = build(
            temp.path(),
            &["a.pdf"],
            "filename,description,blog_url,year\na.pdf,A <b>bold</b> claim,https://blog.example/a,2021\n",
        );
        let row = table.row("a.pdf").unwrap();

        assert_eq!(row.kind, RowKind::Described);
        assert_eq!(row.cells[1], "A &lt;b&gt;bold&lt;/b&gt; claim");
        assert!(row.cells[2].starts_with(r#"<a href="https://blog.example/a">"#));
        assert_eq!(row.cells[3], "2021");
        assert_eq!(row.cells[4], "5B");
    }

    #[test]
    fn test_missing_file_gets_size_placeholder() {
        let temp = tempdir().unwrap();

        let table = build(
            temp.path(),
            &[],
            "filename,description\nmissing.pdf,Gone\n",
        );
        let row = table.row("missing.pdf").unwrap();

        assert_eq!(row.kind, RowKind::Orphaned);
        assert_eq!(row.cells[1], "Gone");
        assert_eq!(row.cells[2], r#"<em class="missing">unavailable</em>"#);
        assert!(!row.cells[2].chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_orphans_outside_directory_get_size_placeholder() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("nested")).unwrap();
        fs::write(temp.path().join("secret.bin"), vec![0u8; 12_345]).unwrap();

        let table = build(
            &docs,
            &[],
            "filename,description
../secret.bin,Up
/etc/passwd,Root
nested,Dir
",
        );

        for name in ["../secret.bin", "/etc/passwd", "nested"] {
            let row = table.row(name).unwrap();
            assert_eq!(row.kind, RowKind::Orphaned);
            assert_eq!(row.cells[2], r#"<em class="missing">unavailable</em>"#);
        }
    }

    #[test]
    fn test_size_column_only_reads_plain_files() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("nested")).unwrap();
        fs::write(docs.join("a.pdf"), b"abc").unwrap();
        fs::write(temp.path().join("secret.bin"), vec![0u8; 12_345]).unwrap();
        let sizes = SizeColumn::new(&docs, "n/a");
        let placeholder = r#"<em class="missing">n/a</em>"#;

        assert_eq!(sizes.render("a.pdf", true), "3B");
        assert_eq!(sizes.render("a.pdf", false), placeholder);
        assert_eq!(sizes.render("../secret.bin", true), placeholder);
        assert_eq!(sizes.render("nested", true), placeholder);
        assert_eq!(sizes.render("nested/../a.pdf", true), placeholder);
    }

    #[test]
    fn test_script_in_description_is_escaped() {
        let temp = tempdir().unwrap();

        let table = build(
            temp.path(),
            &[],
            "filename,description\nx.pdf,<script>alert(1)</script>\n",
        );
        let row = table.row("x.pdf").unwrap();

        assert!(!row.cells[1].contains("<script>"));
        assert!(row.cells[1].contains("&lt;script&gt;"));
    }

    #[test]
    fn test_header_labels_are_escaped() {
        let temp = tempdir().unwrap();
        let table = build(temp.path(), &[], "filename,<i>notes</i>\n");

        assert_eq!(table.headers[1], "&lt;i&gt;notes&lt;/i&gt;");
    }

    #[test]
    fn test_rows_follow_merge_order() {
        let temp = tempdir().unwrap();
        let table = build(
            temp.path(),
            &["b.pdf", "a.pdf"],
            "filename\nz.pdf\na.pdf\n",
        );

        let order: Vec<&str> = table.rows.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(order, vec!["b.pdf", "a.pdf", "z.pdf"]);
        assert_eq!(table.summary.orphaned, 1);
    }
}
