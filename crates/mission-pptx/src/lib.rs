//! # mission-pptx
//!
//! Slide-deck (PPTX) export for Mission Control lesson plans.
//!
//! Each plan section becomes a titled slide whose body holds one paragraph
//! per classified line. Long sections continue on further slides, and an
//! optional title slide is built from the plan metadata.
//!
//! ## Features
//!
//! - **DeckContract**: TOML settings for locale, slide size, lines per
//!   slide and the title slide
//! - **Verbatim content**: line content is written as-is, numbered lines
//!   keep their `N. ` prefix and time labels are bold
//! - **Read-back**: [`read_slides`] extracts slide text for inspection
//!
//! ## Example
//!
//! ```rust,ignore
//! use mission_core::{parse_sections, Palette, StyleTable};
//! use mission_pptx::{DeckBuilder, DeckContract, PptxWriter};
//!
//! let contract = DeckContract::default();
//! let (styles, palette) = (StyleTable::default(), Palette::default());
//! let deck = DeckBuilder::new(&contract, &styles, &palette).build(&parse_sections(&text));
//!
//! let pptx_bytes = PptxWriter::new(contract).generate(&deck)?;
//! std::fs::write("plan.pptx", pptx_bytes)?;
//! ```

pub mod contract;
pub mod deck;
pub mod error;
pub mod reader;
pub mod slide;
pub mod writer;

// Re-exports
pub use contract::{DeckContract, SlidePreset};
pub use deck::{paragraph_for, Deck, DeckBuilder};
pub use error::{PptxError, Result};
pub use reader::{read_slides, SlideText};
pub use slide::{ParagraphKind, Slide, SlideKind, SlideParagraph, TextRun};
pub use writer::PptxWriter;

/// PPTX-related constants
pub mod constants {
    /// Default slide width in EMU (914400 EMU = 1 inch, standard 10" width)
    pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// Default slide height in EMU (standard 7.5" height for 4:3)
    pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// Widescreen 16:9 slide width in EMU (13.333" width)
    pub const WIDESCREEN_SLIDE_WIDTH_EMU: i64 = 12_192_000;

    /// Widescreen 16:9 slide height in EMU (7.5" height)
    pub const WIDESCREEN_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// Smallest accepted slide edge (1")
    pub const MIN_SLIDE_EMU: i64 = 914_400;

    /// Largest accepted slide edge (56")
    pub const MAX_SLIDE_EMU: i64 = 51_206_400;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// EMU per point
    pub const EMU_PER_POINT: i64 = 12_700;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationship id namespace (`r:id` attributes)
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Namespace of `.rels` parts
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_constants() {
        // 1 inch = 72 points
        assert_eq!(constants::EMU_PER_INCH, 72 * constants::EMU_PER_POINT);
    }

    #[test]
    fn test_default_slide_dimensions() {
        // Standard 4:3 slide is 10" x 7.5"
        let expected_width = 10 * constants::EMU_PER_INCH;
        let expected_height = (7.5 * constants::EMU_PER_INCH as f64) as i64;

        assert_eq!(constants::DEFAULT_SLIDE_WIDTH_EMU, expected_width);
        assert_eq!(constants::DEFAULT_SLIDE_HEIGHT_EMU, expected_height);
    }

    #[test]
    fn test_widescreen_dimensions() {
        let aspect_ratio = constants::WIDESCREEN_SLIDE_WIDTH_EMU as f64
            / constants::WIDESCREEN_SLIDE_HEIGHT_EMU as f64;
        assert!((aspect_ratio - 16.0 / 9.0).abs() < 0.01);
    }

    #[test]
    fn test_slide_limits() {
        assert!(constants::MIN_SLIDE_EMU < constants::DEFAULT_SLIDE_HEIGHT_EMU);
        assert!(constants::WIDESCREEN_SLIDE_WIDTH_EMU < constants::MAX_SLIDE_EMU);
    }
}
