//! Small XML helpers shared by the part writers

pub use mission_core::xml::escape_xml;

/// Whether text needs `xml:space="preserve"` to keep its edges
pub(crate) fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}
