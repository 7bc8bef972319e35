//! Inline emphasis runs
//!
//! Renderers that support emphasis expand `**bold**` and `` `code` `` spans
//! of a line's content into these runs. They never feed back into line
//! classification.

use serde::{Deserialize, Serialize};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    /// Plain text content
    Text(String),
    /// Formatted text with its markers removed
    Format(FormatType, String),
}

/// Text formatting types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    /// Strong/bold text, written `**...**`
    Bold,
    /// Inline code, written between single backticks
    Monospace,
}

impl Inline {
    /// The visible text of this run
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Format(_, text) => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Self::Format(FormatType::Bold, _))
    }

    pub fn is_monospace(&self) -> bool {
        matches!(self, Self::Format(FormatType::Monospace, _))
    }
}

/// Concatenate the visible text of a run sequence
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::text).collect()
}
