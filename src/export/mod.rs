//! Textual export of patterns.

#[cfg(feature = "json")]
mod json;
mod literal;

#[cfg(feature = "json")]
pub use json::{from_json, to_json};
pub use literal::{ExportOptions, Exporter, export};
