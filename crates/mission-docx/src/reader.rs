//! Paragraph extraction from `word/document.xml`
//!
//! Reads back the paragraph style and plain text of each `<w:p>`. Used to
//! inspect generated documents.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::archive::PackageArchive;
use crate::error::{DocxError, Result};

/// A body paragraph: style id and concatenated run text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocParagraph {
    pub style: Option<String>,
    pub text: String,
}

/// Extract paragraphs from document XML, in order.
///
/// `<w:tab/>` becomes `\t`; all other markup is dropped.
pub fn extract_paragraphs(document_xml: &[u8]) -> Result<Vec<DocParagraph>> {
    let mut reader = Reader::from_reader(document_xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<DocParagraph> = None;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current = Some(DocParagraph::default()),
                b"t" => in_text = true,
                b"pStyle" => set_style(&mut current, e),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(DocParagraph::default()),
                b"pStyle" => set_style(&mut current, e),
                b"tab" => {
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.text.push('\t');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.extend(current.take()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Unpack a DOCX and extract its body paragraphs
pub fn read_paragraphs(docx: &[u8]) -> Result<Vec<DocParagraph>> {
    let archive = PackageArchive::from_bytes(docx)?;
    extract_paragraphs(archive.document_xml()?)
}

fn set_style(current: &mut Option<DocParagraph>, element: &BytesStart<'_>) {
    let Some(paragraph) = current.as_mut() else {
        return;
    };
    paragraph.style = element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|attr| attr.key.local_name().as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned());
}
