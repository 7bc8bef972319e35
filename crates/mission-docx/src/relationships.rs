//! Relationship parts (`_rels/*.rels`)
//!
//! Maps relationship ids to targets. Used to find or add the styles and
//! numbering parts when injecting into a template.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{DocxError, Result};
use crate::xml::escape_xml;

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const TYPE_EXTENDED_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Parsed relationships, in document order
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
    /// Highest numeric `rIdN` seen so far
    max_id: u32,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            rels.push(Relationship {
                                id,
                                rel_type: rel_type.unwrap_or_default(),
                                target,
                            });
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn push(&mut self, rel: Relationship) {
        if let Some(num) = extract_id_number(&rel.id) {
            self.max_id = self.max_id.max(num);
        }
        self.entries.push(rel);
    }

    /// Add a relationship and return its generated id
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.max_id + 1);
        self.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.into(),
            target: target.into(),
        });
        id
    }

    /// First relationship of a given type
    pub fn find_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.rel_type == rel_type)
    }

    /// Add a relationship of this type unless one exists; returns its target
    pub fn ensure(&mut self, target: &str, rel_type: &str) -> String {
        if let Some(existing) = self.find_by_type(rel_type) {
            return existing.target.clone();
        }
        self.add(target, rel_type);
        target.to_string()
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Serialize to a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for rel in &self.entries {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                escape_xml(&rel.id),
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Numeric portion of a relationship id (`rId5` -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")
        .or_else(|| id.strip_prefix("RId"))
        .or_else(|| id.strip_prefix("rid"))
        .and_then(|num_str| num_str.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#;

    #[test]
    fn test_parse() {
        let rels = Relationships::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.get("rId7").map(|r| r.target.as_str()), Some("theme/theme1.xml"));
        assert_eq!(
            rels.find_by_type(Relationships::TYPE_STYLES)
                .map(|r| r.id.as_str()),
            Some("rId1")
        );
    }

    #[test]
    fn test_add_continues_numbering() {
        let mut rels = Relationships::parse(SAMPLE.as_bytes()).unwrap();
        let id = rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
        assert_eq!(id, "rId8");
    }

    #[test]
    fn test_ensure_keeps_existing() {
        let mut rels = Relationships::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rels.ensure("other.xml", Relationships::TYPE_STYLES), "styles.xml");
        assert_eq!(rels.len(), 2);
        rels.ensure("numbering.xml", Relationships::TYPE_NUMBERING);
        assert_eq!(rels.len(), 3);
    }

    #[test]
    fn test_to_xml_roundtrip() {
        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        let reparsed = Relationships::parse(rels.to_xml().as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed.get("rId1").map(|r| r.target.as_str()), Some("styles.xml"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(Relationships::parse(b"<Relationships></Other>").is_err());
    }
}
