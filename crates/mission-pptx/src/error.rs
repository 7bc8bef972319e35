//! Error types for PPTX generation.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur during PPTX generation
#[derive(Error, Debug)]
pub enum PptxError {
    /// DeckContract configuration error
    #[error("DeckContract error: {reason}")]
    ContractError { reason: String },

    /// Slide dimensions outside what presentation apps accept
    #[error("Invalid slide size {width}x{height} EMU: {reason}")]
    InvalidSlideSize {
        width: i64,
        height: i64,
        reason: String,
    },

    /// Required part missing when reading a deck back
    #[error("Missing part: {path}")]
    MissingPart { path: String },

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error (for DeckContract)
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PptxError {
    /// Create a contract error
    pub fn contract_error(reason: impl Into<String>) -> Self {
        Self::ContractError {
            reason: reason.into(),
        }
    }

    /// Create an invalid slide size error
    pub fn invalid_slide_size(width: i64, height: i64, reason: impl Into<String>) -> Self {
        Self::InvalidSlideSize {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Create a missing part error
    pub fn missing_part(path: impl Into<String>) -> Self {
        Self::MissingPart { path: path.into() }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContractError { .. } => "PPTX001",
            Self::InvalidSlideSize { .. } => "PPTX002",
            Self::MissingPart { .. } => "PPTX003",
            Self::XmlError(_) => "PPTX004",
            Self::ZipError(_) => "PPTX005",
            Self::IoError(_) => "PPTX006",
            Self::TomlError(_) => "PPTX007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::contract_error("max_lines_per_slide must be at least 1");
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("max_lines_per_slide"));

        let err = PptxError::invalid_slide_size(0, 6_858_000, "width must be positive");
        assert_eq!(err.code(), "PPTX002");
        assert!(err.to_string().contains("0x6858000"));
    }

    #[test]
    fn test_error_display() {
        let err = PptxError::missing_part("ppt/presentation.xml");
        assert_eq!(err.code(), "PPTX003");
        assert!(err.to_string().contains("ppt/presentation.xml"));

        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err = PptxError::from(toml_err);
        assert_eq!(err.code(), "PPTX007");
    }
}
