//! Slide data structures.
//!
//! The intermediate representation between a parsed plan and PPTX XML.

use serde::{Deserialize, Serialize};

/// What a slide is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    /// Centered title and subtitle
    Title,
    /// Title and body paragraphs
    #[default]
    Content,
}

/// A single slide in a deck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide number (1-based)
    pub number: u32,

    pub kind: SlideKind,

    pub title: String,

    /// Subtitle (title slides only)
    pub subtitle: Option<String>,

    /// Title colour as hex RGB, without `#`
    pub accent: Option<String>,

    pub paragraphs: Vec<SlideParagraph>,

    /// Index of the plan section this slide came from
    pub section: Option<usize>,
}

impl Slide {
    /// Create a title slide
    pub fn title_slide(number: u32, title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self {
            number,
            kind: SlideKind::Title,
            title: title.into(),
            subtitle,
            ..Default::default()
        }
    }

    /// Create a content slide
    pub fn content_slide(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            kind: SlideKind::Content,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a paragraph to the slide
    pub fn with_paragraph(mut self, paragraph: SlideParagraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    pub fn is_title_slide(&self) -> bool {
        self.kind == SlideKind::Title
    }
}

/// How a body paragraph is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    /// Bulleted with `•`
    Bullet,
    /// Plain paragraph starting with its `N. ` prefix
    Numbered,
    /// Bold time label followed by content
    Timeline,
    Text,
    /// Empty paragraph
    Spacer,
    /// Italic placeholder for an empty section
    Placeholder,
}

/// A paragraph in the body placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideParagraph {
    pub kind: ParagraphKind,
    pub runs: Vec<TextRun>,
}

impl SlideParagraph {
    pub fn new(kind: ParagraphKind, runs: Vec<TextRun>) -> Self {
        Self { kind, runs }
    }

    /// A paragraph with a single unformatted run
    pub fn plain(kind: ParagraphKind, text: impl Into<String>) -> Self {
        Self::new(kind, vec![TextRun::plain(text)])
    }

    pub fn spacer() -> Self {
        Self::new(ParagraphKind::Spacer, Vec::new())
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A run of text with consistent formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }
}
