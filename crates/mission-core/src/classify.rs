//! Line Classifier
//!
//! Turns one section's raw content into an ordered list of [`Line`]s.
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. empty or whitespace-only: [`Line::Blank`]
//! 2. `-` or `*` followed by whitespace: [`Line::Bullet`]
//! 3. `<digits>.` followed by whitespace: [`Line::Numbered`]
//! 4. a duration prefix such as `**5-10 min**:` or `~20 minutes`: [`Line::Timeline`]
//! 5. anything else: [`Line::Text`]
//!
//! The order matters. `10. min break` is numbered, not a timeline.

use mission_ast::{Line, Section};
use once_cell::sync::Lazy;
use regex::Regex;

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+(?P<rest>.*)$").expect("valid bullet pattern"));

static NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<ordinal>\d+)\.\s+(?P<rest>.*)$").expect("valid numbered pattern"));

static TIMELINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\*{0,2}(?P<label>~?\d+(?:\s*-\s*\d+)?\s*(?:minutes|min|hours|hour)\b)\*{0,2}:?\*{0,2}\s*(?P<rest>.*)$",
    )
    .expect("valid timeline pattern")
});

/// Classify a single line.
///
/// Trailing whitespace is ignored. Leading indentation is skipped before
/// the marker rules are tried, but a `text` line keeps it.
pub fn classify_line(raw: &str) -> Line {
    let line = raw.trim_end();
    let body = line.trim_start();

    if body.is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = BULLET_RE.captures(body) {
        return Line::Bullet {
            content: caps["rest"].to_string(),
        };
    }

    if let Some(caps) = NUMBERED_RE.captures(body) {
        // Ordinals too large for u64 fall through to the remaining rules
        if let Ok(ordinal) = caps["ordinal"].parse::<u64>() {
            return Line::Numbered {
                ordinal,
                content: caps["rest"].to_string(),
            };
        }
    }

    if let Some(caps) = TIMELINE_RE.captures(body) {
        return Line::Timeline {
            time_label: caps["label"].to_string(),
            content: caps["rest"].to_string(),
        };
    }

    Line::Text {
        content: line.to_string(),
    }
}

/// Classify every line of a section's content, dropping leading and
/// trailing blanks. Interior blanks are kept as spacing.
pub fn classify_lines(content: &str) -> Vec<Line> {
    let mut lines: Vec<Line> = content.lines().map(classify_line).collect();

    let trailing = lines.iter().rev().take_while(|l| l.is_blank()).count();
    lines.truncate(lines.len() - trailing);

    let leading = lines.iter().take_while(|l| l.is_blank()).count();
    lines.drain(..leading);

    lines
}

/// Classification helpers on [`Section`]
pub trait SectionLines {
    /// Classified lines of this section's content
    fn lines(&self) -> Vec<Line>;
}

impl SectionLines for Section {
    fn lines(&self) -> Vec<Line> {
        classify_lines(&self.content)
    }
}
