//! Error types for DOCX export

use thiserror::Error;

/// Errors that can occur while building or reading a DOCX package
#[derive(Error, Debug)]
pub enum DocxError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in the package
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Template cannot be used for injection
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;
