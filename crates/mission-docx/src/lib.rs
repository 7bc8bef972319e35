//! # mission-docx
//!
//! Word-processor export for Mission Control lesson plans.
//!
//! This crate provides functionality to:
//! - Write parsed plan sections as a standalone DOCX
//! - Inject plan content into an existing DOCX/DOTX template
//! - Read back paragraph styles and text from a generated document
//!
//! ## Example
//!
//! ```no_run
//! use mission_core::{parse_sections, Palette, StyleTable};
//! use mission_docx::DocxWriter;
//!
//! let sections = parse_sections("## Objectives\n- Explain **erosion**\n");
//! let styles = StyleTable::default();
//! let palette = Palette::default();
//! let bytes = DocxWriter::new(&styles, &palette).generate(&sections)?;
//! std::fs::write("plan.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod error;
pub mod parts;
pub mod reader;
pub mod relationships;
pub mod writer;
pub mod xml;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

pub use archive::PackageArchive;
pub use error::{DocxError, Result};
pub use reader::{extract_paragraphs, read_paragraphs, DocParagraph};
pub use relationships::Relationships;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
