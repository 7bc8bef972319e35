//! Sections and classified lines
//!
//! A generated plan is split into [`Section`]s by level-2 headings, and each
//! section's content is classified line by line into [`Line`]s. Both are
//! plain values: they are rebuilt from the raw text on every render and have
//! no identity beyond their position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A titled block of a generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display name, taken from the `## ` heading (or the fallback title)
    pub title: String,
    /// Raw text between this heading and the next, newlines included
    pub content: String,
}

impl Section {
    /// Create a section from a title and its raw content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check whether the section carries any non-whitespace content
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// The classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Blank,
    Bullet,
    Numbered,
    Timeline,
    Text,
}

impl LineKind {
    /// Lowercase name, as used in JSON and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Bullet => "bullet",
            Self::Numbered => "numbered",
            Self::Timeline => "timeline",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified line of section content.
///
/// Marker prefixes (`- `, `3. `, `**5 min**:`) are already stripped from
/// `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// Empty or whitespace-only line; a spacing signal
    Blank,
    /// `-` or `*` list item
    Bullet { content: String },
    /// `<digits>.` item; the ordinal is taken verbatim from the source
    Numbered { ordinal: u64, content: String },
    /// Line led by a duration such as `5-10 min` or `~20 minutes`
    Timeline {
        #[serde(rename = "timeLabel")]
        time_label: String,
        content: String,
    },
    /// Anything else
    Text { content: String },
}

impl Line {
    /// The kind of this line
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Blank => LineKind::Blank,
            Self::Bullet { .. } => LineKind::Bullet,
            Self::Numbered { .. } => LineKind::Numbered,
            Self::Timeline { .. } => LineKind::Timeline,
            Self::Text { .. } => LineKind::Text,
        }
    }

    /// The payload text (empty for blank lines)
    pub fn content(&self) -> &str {
        match self {
            Self::Blank => "",
            Self::Bullet { content }
            | Self::Numbered { content, .. }
            | Self::Timeline { content, .. }
            | Self::Text { content } => content,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Reconstruct a source line that classifies back to the same kind
    pub fn to_source(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Bullet { content } => format!("- {}", content),
            Self::Numbered { ordinal, content } => format!("{}. {}", ordinal, content),
            Self::Timeline {
                time_label,
                content,
            } => format!("**{}**: {}", time_label, content),
            Self::Text { content } => content.clone(),
        }
    }
}
