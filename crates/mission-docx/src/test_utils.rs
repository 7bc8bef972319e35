//! Shared test fixtures for mission-docx
//!
//! Small in-memory templates for template-injection tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::archive::{PackageArchive, DOCUMENT_PART};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Template</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

fn write_zip(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (path, contents) in parts {
        zip.start_file(*path, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// A minimal `.dotx`: content types, package rels and a placeholder body
pub fn create_minimal_template() -> Vec<u8> {
    write_zip(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        (
            "word/_rels/document.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
</Relationships>"#,
        ),
        ("word/document.xml", DOCUMENT),
    ])
}

/// A template with its own styles and numbering parts.
///
/// Defines `Normal`, `Heading1` and its own `PlanBody`, plus one existing
/// numbering instance.
pub fn create_template_with_styles() -> Vec<u8> {
    write_zip(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        (
            "word/_rels/document.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#,
        ),
        (
            "word/styles.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="PlanBody"><w:name w:val="Corporate Body"/></w:style>
</w:styles>"#,
        ),
        (
            "word/numbering.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#,
        ),
        ("word/document.xml", DOCUMENT),
    ])
}

/// Extract document.xml content from DOCX bytes
pub fn extract_document_xml(docx: &[u8]) -> String {
    extract_file(docx, DOCUMENT_PART).unwrap()
}

/// Extract any part as a string
pub fn extract_file(docx: &[u8], path: &str) -> Option<String> {
    PackageArchive::from_bytes(docx).unwrap().get_string(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_minimal_template() {
        let template = create_minimal_template();
        let archive = PackageArchive::from_bytes(&template).unwrap();
        assert!(archive.contains("word/document.xml"));
        assert!(!archive.contains("word/styles.xml"));
    }

    #[test]
    fn test_create_template_with_styles() {
        let template = create_template_with_styles();
        let styles = extract_file(&template, "word/styles.xml").unwrap();
        assert!(styles.contains("Heading1"));
        assert!(extract_document_xml(&template).contains("Template"));
    }
}
