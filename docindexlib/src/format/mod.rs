//! Value formatting shared by the output stage: byte sizes and escaping.

pub mod escape;
pub mod size;

pub use escape::{escape_html, escape_url};
pub use size::{format_size, UNITS};
