//! XML text escaping shared by the document and slide writers

/// Whether `c` is allowed in XML 1.0 character data
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape special XML characters in text and attribute values.
///
/// Characters outside the XML 1.0 `Char` production (C0 controls other
/// than tab, newline and carriage return, and the `U+FFFE`/`U+FFFF`
/// noncharacters) are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_control_chars_dropped() {
        assert_eq!(escape_xml("Page one\u{c}page two"), "Page onepage two");
        assert_eq!(escape_xml("bell \u{7} here\u{0}"), "bell  here");
        assert_eq!(escape_xml("a\u{FFFE}b\u{FFFF}"), "ab");
    }

    #[test]
    fn test_allowed_whitespace_and_unicode_kept() {
        assert_eq!(escape_xml("a\tb\nc\rd"), "a\tb\nc\rd");
        assert_eq!(escape_xml("Science · 45 min — 🔬"), "Science · 45 min — 🔬");
    }

    #[test]
    fn test_is_xml_char() {
        assert!(is_xml_char(' '));
        assert!(!is_xml_char('\u{1b}'));
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(is_xml_char('\u{10FFFF}'));
    }
}
