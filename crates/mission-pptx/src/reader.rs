//! Reading slide text back out of a generated deck.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{PptxError, Result};

/// Title and body paragraph text of one slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideText {
    pub title: String,
    /// Paragraphs of every non-title shape, in order
    pub paragraphs: Vec<String>,
}

/// Extract title and paragraphs from one slide part
pub fn extract_slide_text(slide_xml: &[u8]) -> Result<SlideText> {
    let mut reader = Reader::from_reader(slide_xml);
    reader.config_mut().trim_text(false);

    let mut slide = SlideText::default();
    let mut in_title_shape = false;
    let mut in_text = false;
    let mut paragraph: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"sp" => in_title_shape = false,
                b"p" => paragraph = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"ph" => {
                in_title_shape = e
                    .attributes()
                    .filter_map(|a| a.ok())
                    .any(|attr| {
                        attr.key.as_ref() == b"type"
                            && matches!(attr.value.as_ref(), b"title" | b"ctrTitle")
                    });
            }
            Ok(Event::Text(ref e)) if in_text => {
                if let Some(text) = paragraph.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(text) = paragraph.take() {
                        if in_title_shape {
                            slide.title.push_str(&text);
                        } else {
                            slide.paragraphs.push(text);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(slide)
}

/// Read every slide of a PPTX, in slide-number order
pub fn read_slides(pptx: &[u8]) -> Result<Vec<SlideText>> {
    let mut archive = ZipArchive::new(Cursor::new(pptx))?;
    if archive.by_name("ppt/presentation.xml").is_err() {
        return Err(PptxError::missing_part("ppt/presentation.xml"));
    }

    let mut slides = Vec::new();
    for number in 1.. {
        let mut xml = Vec::new();
        match archive.by_name(&format!("ppt/slides/slide{}.xml", number)) {
            Ok(mut file) => file.read_to_end(&mut xml)?,
            Err(zip::result::ZipError::FileNotFound) => break,
            Err(e) => return Err(e.into()),
        };
        slides.push(extract_slide_text(&xml)?);
    }

    Ok(slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_and_body() {
        let xml = br#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>Materials</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:txBody>
<a:p><a:r><a:t>Sand &amp; trays</a:t></a:r></a:p>
<a:p><a:endParaRPr lang="en-US"/></a:p>
<a:p><a:r><a:t>5 min</a:t></a:r><a:r><a:t>  Setup</a:t></a:r></a:p>
</p:txBody></p:sp>
</p:spTree></p:cSld></p:sld>"#;

        let slide = extract_slide_text(xml).unwrap();
        assert_eq!(slide.title, "Materials");
        assert_eq!(slide.paragraphs, vec!["Sand & trays", "", "5 min  Setup"]);
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            read_slides(b"nope"),
            Err(PptxError::ZipError(_))
        ));
    }
}
