//! DeckContract configuration for PPTX generation.
//!
//! DeckContract controls how a lesson plan is laid out as slides: slide
//! size, how many lines fit on one slide, and the optional title slide.

use crate::constants::*;
use crate::error::{PptxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// DeckContract configuration for PPTX generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckContract {
    /// Metadata about the contract
    #[serde(default)]
    pub meta: ContractMeta,

    /// Slide dimensions
    #[serde(default)]
    pub slide: SlideConfig,

    /// Body content settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Title slide settings
    #[serde(default)]
    pub title_slide: TitleSlideConfig,
}

/// Contract metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMeta {
    /// Locale code (e.g., "en-US", "it-IT")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Author written to the core properties
    #[serde(default = "default_author")]
    pub author: String,

    /// Description
    #[serde(default)]
    pub description: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_author() -> String {
    "Mission Control".to_string()
}

/// Named slide sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlidePreset {
    /// 10" x 7.5" (4:3)
    Standard,
    /// 13.333" x 7.5" (16:9)
    #[default]
    Widescreen,
}

/// Slide size: a preset, optionally overridden in EMU
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    #[serde(default)]
    pub preset: SlidePreset,

    /// Explicit width in EMU
    #[serde(default)]
    pub width: Option<i64>,

    /// Explicit height in EMU
    #[serde(default)]
    pub height: Option<i64>,
}

impl SlideConfig {
    /// Effective (width, height) in EMU
    pub fn size(&self) -> (i64, i64) {
        let (width, height) = match self.preset {
            SlidePreset::Standard => (DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU),
            SlidePreset::Widescreen => (WIDESCREEN_SLIDE_WIDTH_EMU, WIDESCREEN_SLIDE_HEIGHT_EMU),
        };
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}

/// Body content settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Paragraphs per slide before a section continues on the next slide
    #[serde(default = "default_max_lines")]
    pub max_lines_per_slide: usize,

    /// Appended to the title of continuation slides
    #[serde(default = "default_continued_suffix")]
    pub continued_suffix: String,

    /// Text for a section with no lines
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Body font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Colour the slide title with the section accent
    #[serde(default = "default_true")]
    pub accent_titles: bool,
}

fn default_max_lines() -> usize {
    8
}
fn default_continued_suffix() -> String {
    " (cont.)".to_string()
}
fn default_placeholder() -> String {
    "—".to_string()
}
fn default_font_size() -> u32 {
    20
}
fn default_true() -> bool {
    true
}

/// Title slide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSlideConfig {
    /// Emit a title slide when plan metadata is available
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Use the `subject · grade · duration` summary as subtitle
    #[serde(default = "default_true")]
    pub show_summary: bool,
}

impl Default for ContractMeta {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            author: default_author(),
            description: String::new(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_lines_per_slide: default_max_lines(),
            continued_suffix: default_continued_suffix(),
            placeholder: default_placeholder(),
            font_size: default_font_size(),
            accent_titles: true,
        }
    }
}

impl Default for TitleSlideConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_summary: true,
        }
    }
}

impl DeckContract {
    /// Load DeckContract from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse DeckContract from a TOML string and validate it
    pub fn parse(toml_content: &str) -> Result<Self> {
        let contract: DeckContract = toml::from_str(toml_content)?;
        contract.validate()?;
        Ok(contract)
    }

    /// Effective slide size in EMU
    pub fn slide_size(&self) -> (i64, i64) {
        self.slide.size()
    }

    /// Check values that would produce an unusable deck
    pub fn validate(&self) -> Result<()> {
        if self.content.max_lines_per_slide == 0 {
            return Err(PptxError::contract_error(
                "content.max_lines_per_slide must be at least 1",
            ));
        }
        if self.content.font_size == 0 {
            return Err(PptxError::contract_error("content.font_size must be at least 1"));
        }

        let (width, height) = self.slide_size();
        for (name, value) in [("width", width), ("height", height)] {
            if !(MIN_SLIDE_EMU..=MAX_SLIDE_EMU).contains(&value) {
                return Err(PptxError::invalid_slide_size(
                    width,
                    height,
                    format!(
                        "{} must be between {} and {} EMU",
                        name, MIN_SLIDE_EMU, MAX_SLIDE_EMU
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deck_contract() {
        let contract = DeckContract::default();

        assert_eq!(contract.meta.locale, "en-US");
        assert_eq!(contract.content.max_lines_per_slide, 8);
        assert_eq!(contract.content.continued_suffix, " (cont.)");
        assert!(contract.title_slide.enabled);
        assert_eq!(
            contract.slide_size(),
            (WIDESCREEN_SLIDE_WIDTH_EMU, WIDESCREEN_SLIDE_HEIGHT_EMU)
        );
        assert!(contract.validate().is_ok());
    }

    #[test]
    fn test_parse_deck_contract() {
        let toml = r#"
[meta]
locale = "it-IT"

[slide]
preset = "standard"

[content]
max_lines_per_slide = 5

[title_slide]
show_summary = false
"#;

        let contract = DeckContract::parse(toml).unwrap();

        assert_eq!(contract.meta.locale, "it-IT");
        assert_eq!(contract.meta.author, "Mission Control");
        assert_eq!(
            contract.slide_size(),
            (DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU)
        );
        assert_eq!(contract.content.max_lines_per_slide, 5);
        // Defaults preserved
        assert_eq!(contract.content.placeholder, "—");
        assert!(contract.title_slide.enabled);
        assert!(!contract.title_slide.show_summary);
    }

    #[test]
    fn test_explicit_size_overrides_preset() {
        let contract = DeckContract::parse("[slide]\nwidth = 10000000\n").unwrap();
        assert_eq!(contract.slide_size(), (10_000_000, WIDESCREEN_SLIDE_HEIGHT_EMU));
    }

    #[test]
    fn test_validate_rejects_zero_lines() {
        let err = DeckContract::parse("[content]\nmax_lines_per_slide = 0\n").unwrap_err();
        assert_eq!(err.code(), "PPTX001");
    }

    #[test]
    fn test_validate_rejects_tiny_slide() {
        let err = DeckContract::parse("[slide]\nheight = 100\n").unwrap_err();
        assert!(matches!(err, PptxError::InvalidSlideSize { height: 100, .. }));
    }

    #[test]
    fn test_unknown_preset_is_toml_error() {
        let err = DeckContract::parse("[slide]\npreset = \"cinema\"\n").unwrap_err();
        assert_eq!(err.code(), "PPTX007");
    }
}
