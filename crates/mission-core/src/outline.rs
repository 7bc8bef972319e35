//! Outline Parser
//!
//! Splits a generated plan into [`Section`]s.
//!
//! # Rules
//!
//! - `## Title` opens a new section; the title is the rest of the line, trimmed
//! - `# Title` is document preamble and is discarded
//! - every other line is appended, with its original newline, to the open
//!   section; lines before the first `##` heading are dropped
//! - if no heading was seen and the input is not blank, the whole input
//!   becomes one section under the default title
//! - blank input yields no sections
//!
//! # Example
//!
//! ```
//! use mission_core::outline::parse_sections;
//!
//! let sections = parse_sections("# Plan\n## Intro\nHello\n## Next\nWorld\n");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].title, "Intro");
//! assert_eq!(sections[1].content, "World\n");
//! ```

use mission_ast::Section;
use tracing::debug;

/// Title of the synthetic section produced for heading-less input
pub const DEFAULT_SECTION_TITLE: &str = "Lesson Plan";

/// What a single source line means to the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutlineLine<'a> {
    /// `## Title`
    SectionHeading(&'a str),
    /// `# Title`
    DocumentHeading,
    /// Anything else, newline included
    Body(&'a str),
}

/// Parser state while walking the input
struct OutlineParser<'a> {
    sections: Vec<Section>,
    current: Option<(&'a str, String)>,
}

impl<'a> OutlineParser<'a> {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            current: None,
        }
    }

    fn parse(mut self, raw: &'a str) -> Vec<Section> {
        for line in raw.split_inclusive('\n') {
            match scan_line(line) {
                OutlineLine::SectionHeading(title) => {
                    self.flush();
                    self.current = Some((title, String::new()));
                }
                OutlineLine::DocumentHeading => {}
                OutlineLine::Body(text) => {
                    if let Some((_, content)) = &mut self.current {
                        content.push_str(text);
                    }
                }
            }
        }
        self.flush();
        self.sections
    }

    fn flush(&mut self) {
        if let Some((title, content)) = self.current.take() {
            self.sections.push(Section::new(title, content));
        }
    }
}

/// Classify one raw line (which may still carry its newline)
fn scan_line(line: &str) -> OutlineLine<'_> {
    let bare = line.trim_end_matches(['\n', '\r']);

    if let Some(title) = heading_text(bare, 2) {
        return OutlineLine::SectionHeading(title);
    }
    if heading_text(bare, 1).is_some() {
        return OutlineLine::DocumentHeading;
    }
    OutlineLine::Body(line)
}

/// Match exactly `level` leading `#` characters followed by whitespace
fn heading_text(line: &str, level: usize) -> Option<&str> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes != level {
        return None;
    }
    let rest = &line[level..];
    if rest.starts_with(|c: char| c.is_whitespace()) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Parse a generated plan into sections, using [`DEFAULT_SECTION_TITLE`]
/// for heading-less input.
pub fn parse_sections(raw: &str) -> Vec<Section> {
    parse_sections_with(raw, DEFAULT_SECTION_TITLE)
}

/// Parse a generated plan into sections with an explicit fallback title.
///
/// Never fails: missing headings produce the single fallback section and
/// blank input produces an empty list.
pub fn parse_sections_with(raw: &str, default_title: &str) -> Vec<Section> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let sections = OutlineParser::new().parse(raw);
    if sections.is_empty() {
        debug!("no level-2 headings found, using fallback section");
        return vec![Section::new(default_title, raw)];
    }

    debug!(count = sections.len(), "parsed plan sections");
    sections
}
