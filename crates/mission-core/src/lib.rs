//! mission-core - lesson plan outlines and signal gauges
//!
//! Core library for Mission Control: turns a generated lesson plan into
//! sections and classified lines, drives renderers over them, and maps
//! consensus signals onto a gauge.
//!
//! # Example
//!
//! ```
//! use mission_core::{parse_sections, classify_lines, Palette, ScreenRenderer, StyleTable};
//! use mission_ast::Line;
//!
//! let sections = parse_sections("# Plan\n## Materials\n- glue\n- paper\n");
//! assert_eq!(sections[0].title, "Materials");
//!
//! let lines = classify_lines(&sections[0].content);
//! assert_eq!(lines[0], Line::Bullet { content: "glue".to_string() });
//!
//! let styles = StyleTable::default();
//! let palette = Palette::default();
//! let cards = ScreenRenderer::new(&styles, &palette).render(&sections);
//! assert_eq!(cards[0].items.len(), 2);
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod gauge;
pub mod inline;
pub mod outline;
pub mod render;
pub mod screen;
pub mod store;
pub mod style;
pub mod view;
pub mod xml;

// Re-export main types and functions
pub use classify::{classify_line, classify_lines, SectionLines};
pub use config::Settings;
pub use error::{CoreError, Result};
pub use gauge::{fill_arc, needle_angle, needle_offset, GaugeGeometry, GaugeReading, SourceBar};
pub use inline::expand_emphasis;
pub use outline::{parse_sections, parse_sections_with, DEFAULT_SECTION_TITLE};
pub use render::{render_sections, DisplayMode, Emitted, KindRecorder, PlanRenderer};
pub use screen::{Card, CardItem, ChecklistState, ScreenPage, ScreenRenderer};
pub use store::PlanStore;
pub use style::{AccentColors, Palette, SectionStyle, StyleTable};
pub use view::{PlanView, RecordState, RegenerateGate};
pub use xml::escape_xml;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
