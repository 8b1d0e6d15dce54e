//! Docsplit wrapper library
//!
//! Typed Rust interface to the Docsplit Java toolkit. All document
//! processing is delegated to the external tool via subprocess:
//! - `extract_pages`: split a document into one PDF per page
//! - `extract_text`: write the document's text to a file, optionally
//!   returning it
//! - `extract_images`: rasterize pages at requested sizes and formats
//! - `extract_metadata`: read a single metadata field
//!
//! Non-PDF inputs (office formats) are converted to PDF first, also by
//! subprocess, via the toolkit's bundled office converter.

pub mod config;
pub mod error;
pub mod exec;
pub mod images;
pub mod splitter;

pub use config::DocsplitConfig;
pub use error::{Error, Result};
pub use exec::{Options, Pages};
pub use images::{ImageExtractor, ImageOptions};
pub use splitter::{Docsplit, MetadataField};
