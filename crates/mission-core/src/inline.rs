//! Inline emphasis expansion
//!
//! Expands `**bold**` and `` `code` `` spans inside a line's content into
//! [`Inline`] runs. Runs left to right, always taking the earliest marker.
//! Unpaired markers stay as literal text.

use mission_ast::{FormatType, Inline};
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold pattern"));
static MONO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code pattern"));

/// Expand emphasis markers in `content`.
///
/// Returns a single empty text run for empty input so callers always have
/// something to emit.
pub fn expand_emphasis(content: &str) -> Vec<Inline> {
    let mut result = Vec::new();
    let mut remaining = content;

    while !remaining.is_empty() {
        let earliest = [
            BOLD_RE
                .captures(remaining)
                .map(|c| (c, FormatType::Bold)),
            MONO_RE
                .captures(remaining)
                .map(|c| (c, FormatType::Monospace)),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|(caps, _)| caps.get(0).map_or(usize::MAX, |m| m.start()));

        let Some((caps, format)) = earliest else {
            result.push(Inline::Text(remaining.to_string()));
            break;
        };

        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            result.push(Inline::Text(remaining.to_string()));
            break;
        };

        if whole.start() > 0 {
            result.push(Inline::Text(remaining[..whole.start()].to_string()));
        }
        result.push(Inline::Format(format, inner.as_str().to_string()));
        remaining = &remaining[whole.end()..];
    }

    if result.is_empty() {
        result.push(Inline::Text(String::new()));
    }

    result
}
