//! Renderer contract
//!
//! Every output target implements [`PlanRenderer`] and is driven by
//! [`render_sections`], so all targets see the same sections and the same
//! lines in the same order. Targets only decide how each line looks.
//!
//! | Line kind  | Required rendering                                   |
//! |------------|------------------------------------------------------|
//! | `blank`    | spacing break, no visible text                       |
//! | `bullet`   | unordered list item                                  |
//! | `numbered` | `"<ordinal>. <content>"` or an ordered item          |
//! | `timeline` | time label visually set apart from the content      |
//! | `text`     | plain paragraph                                      |

use std::fmt;

use mission_ast::{Line, Section};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classify::classify_lines;

/// Per-section layout strategy, chosen from the section title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Title mentions "outline": chronological rows
    Outline,
    /// Title mentions "material": toggleable items
    Checklist,
    #[default]
    Default,
}

impl DisplayMode {
    /// Case-insensitive keyword match on the section title.
    ///
    /// "outline" is checked before "material".
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("outline") {
            Self::Outline
        } else if title.contains("material") {
            Self::Checklist
        } else {
            Self::Default
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Checklist => "checklist",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An output target for parsed plans.
///
/// Calls arrive as `begin_section`, then either one `placeholder` or one
/// `line` per classified line, then `end_section`, for each section in order.
pub trait PlanRenderer {
    fn begin_section(&mut self, index: usize, section: &Section, mode: DisplayMode);
    fn line(&mut self, line: &Line);
    /// Called once instead of `line` for a section with no lines
    fn placeholder(&mut self);
    fn end_section(&mut self);
}

/// Drive `renderer` over `sections`.
///
/// Never fails; an empty slice produces no calls at all.
pub fn render_sections<R: PlanRenderer + ?Sized>(sections: &[Section], renderer: &mut R) {
    for (index, section) in sections.iter().enumerate() {
        let mode = DisplayMode::for_title(&section.title);
        let lines = classify_lines(&section.content);
        trace!(index, title = %section.title, %mode, lines = lines.len(), "rendering section");

        renderer.begin_section(index, section, mode);
        if lines.is_empty() {
            renderer.placeholder();
        } else {
            for line in &lines {
                renderer.line(line);
            }
        }
        renderer.end_section();
    }
}

/// What a renderer was asked to emit; see [`KindRecorder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emitted {
    Line(mission_ast::LineKind),
    Placeholder,
}

/// A renderer that only records the sequence of emitted kinds.
///
/// Useful as a reference when checking that a target neither skips nor
/// reorders lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindRecorder {
    pub sections: Vec<(String, DisplayMode, Vec<Emitted>)>,
}

impl KindRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All emitted kinds, flattened across sections
    pub fn sequence(&self) -> Vec<Emitted> {
        self.sections
            .iter()
            .flat_map(|(_, _, kinds)| kinds.iter().copied())
            .collect()
    }
}

impl PlanRenderer for KindRecorder {
    fn begin_section(&mut self, _index: usize, section: &Section, mode: DisplayMode) {
        self.sections.push((section.title.clone(), mode, Vec::new()));
    }

    fn line(&mut self, line: &Line) {
        if let Some((_, _, kinds)) = self.sections.last_mut() {
            kinds.push(Emitted::Line(line.kind()));
        }
    }

    fn placeholder(&mut self) {
        if let Some((_, _, kinds)) = self.sections.last_mut() {
            kinds.push(Emitted::Placeholder);
        }
    }

    fn end_section(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_ast::LineKind;

    #[test]
    fn test_display_mode_keywords() {
        assert_eq!(DisplayMode::for_title("Lesson Outline"), DisplayMode::Outline);
        assert_eq!(DisplayMode::for_title("MATERIALS"), DisplayMode::Checklist);
        assert_eq!(DisplayMode::for_title("Objectives"), DisplayMode::Default);
        assert_eq!(
            DisplayMode::for_title("Outline of materials"),
            DisplayMode::Outline
        );
    }

    #[test]
    fn test_empty_section_gets_one_placeholder() {
        let sections = vec![
            Section::new("Empty", "\n\n"),
            Section::new("Full", "- a\n\nb\n"),
        ];
        let mut recorder = KindRecorder::new();
        render_sections(&sections, &mut recorder);

        assert_eq!(recorder.sections[0].2, vec![Emitted::Placeholder]);
        assert_eq!(
            recorder.sections[1].2,
            vec![
                Emitted::Line(LineKind::Bullet),
                Emitted::Line(LineKind::Blank),
                Emitted::Line(LineKind::Text),
            ]
        );
    }

    #[test]
    fn test_no_sections_no_calls() {
        let mut recorder = KindRecorder::new();
        render_sections(&[], &mut recorder);
        assert!(recorder.sections.is_empty());
    }

    #[test]
    fn test_modes_reported() {
        let sections = vec![Section::new("Materials", "- glue\n")];
        let mut recorder = KindRecorder::new();
        render_sections(&sections, &mut recorder);
        assert_eq!(recorder.sections[0].1, DisplayMode::Checklist);
    }
}
