//! HTML page generation
//!
//! Wraps a [`ListingTable`] in a self-contained HTML document with an
//! embedded stylesheet.

use serde::{Deserialize, Serialize};

use crate::format::escape_html;
use crate::output::table::ListingTable;

/// Text around the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Content of `<title>`
    pub title: String,
    /// Content of the `<h1>` heading
    pub heading: String,
    /// Paragraphs shown between heading and table
    pub intro: Vec<String>,
    /// Footer line, omitted when unset
    pub footer: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Documents".to_string(),
            heading: "Documents".to_string(),
            intro: Vec::new(),
            footer: None,
        }
    }
}

/// Render the listing as a complete HTML document.
pub fn render_page(table: &ListingTable, page: &PageConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{heading}</h1>
{intro}{table}{footer}</body>
</html>
"#,
        title = escape_html(&page.title),
        css = inline_css(),
        heading = escape_html(&page.heading),
        intro = render_intro(&page.intro),
        table = render_table(table),
        footer = render_footer(page.footer.as_deref()),
    )
}

/// Render only the `<table>` element.
pub fn render_table(table: &ListingTable) -> String {
    let mut html = String::from("    <table>\n        <thead>\n            <tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>\n        </thead>\n        <tbody>\n");

    for row in &table.rows {
        html.push_str(&format!(
            "            <tr class=\"{}\">",
            row.kind.css_class()
        ));
        for cell in &row.cells {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("        </tbody>\n    </table>\n");
    html
}

fn render_intro(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| format!("    <p>{}</p>\n", escape_html(p)))
        .collect()
}

fn render_footer(footer: Option<&str>) -> String {
    footer
        .map(|text| format!("    <footer>{}</footer>\n", escape_html(text)))
        .unwrap_or_default()
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.5;
    color: #111827;
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem;
}

table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.9rem;
}

th, td {
    text-align: left;
    padding: 0.4rem 0.6rem;
    border-bottom: 1px solid #e5e7eb;
    vertical-align: top;
}

th {
    background: #f9fafb;
    font-weight: 600;
}

td:last-child, th:last-child {
    text-align: right;
    white-space: nowrap;
}

tr.orphaned td:first-child a {
    color: #9ca3af;
    text-decoration: line-through;
}

.missing {
    color: #b45309;
}

footer {
    margin-top: 2rem;
    color: #6b7280;
    font-size: 0.8rem;
}
"#
}
