//! DOCX Writer
//!
//! Writes parsed plan sections to WordprocessingML, either as a standalone
//! package or injected into a template (`.dotx`/`.docx`).
//!
//! # Example
//!
//! ```ignore
//! use mission_core::{parse_sections, Palette, StyleTable};
//! use mission_docx::DocxWriter;
//!
//! let sections = parse_sections(&plan_text);
//! let (styles, palette) = (StyleTable::default(), Palette::default());
//! let bytes = DocxWriter::new(&styles, &palette).generate(&sections)?;
//! std::fs::write("plan.docx", bytes)?;
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mission_ast::{FormatType, Inline, Line, PlanMeta, Section};
use mission_core::render::render_sections;
use mission_core::screen::DEFAULT_PLACEHOLDER;
use mission_core::{expand_emphasis, DisplayMode, Palette, PlanRenderer, StyleTable};

use crate::archive::{PackageArchive, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART};
use crate::error::{DocxError, Result};
use crate::parts::{self, *};
use crate::relationships::Relationships;
use crate::xml::{escape_xml, needs_preserve};

/// Shown when there are no sections at all
pub const NO_CONTENT: &str = "No content";

const MONOSPACE_FONT: &str = "Courier New";

/// DOCX writer for lesson plans
pub struct DocxWriter<'a> {
    /// XML output buffer
    output: String,
    styles: &'a StyleTable,
    palette: &'a Palette,
    meta: Option<PlanMeta>,
    placeholder: String,
    locale: String,
    created: DateTime<Utc>,
    /// Paragraphs written for the current section
    section_paragraphs: usize,
}

impl<'a> DocxWriter<'a> {
    pub fn new(styles: &'a StyleTable, palette: &'a Palette) -> Self {
        Self {
            output: String::new(),
            styles,
            palette,
            meta: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            locale: "en-US".to_string(),
            created: Utc::now(),
            section_paragraphs: 0,
        }
    }

    /// Write a title block and core properties from plan metadata
    pub fn with_meta(mut self, meta: PlanMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Language tag for the standalone styles part
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Fix the core-properties timestamp
    pub fn with_timestamp(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Generate a standalone DOCX package
    pub fn generate(mut self, sections: &[Section]) -> Result<Vec<u8>> {
        let document_xml = self.generate_document_xml(sections);

        let mut document_rels = Relationships::new();
        document_rels.add("styles.xml", Relationships::TYPE_STYLES);
        document_rels.add("numbering.xml", Relationships::TYPE_NUMBERING);

        let mut archive = PackageArchive::new();
        archive.set_string(CONTENT_TYPES_PART, content_types_xml());
        archive.set_string(ROOT_RELS_PART, root_rels().to_xml());
        archive.set_string(DOCUMENT_PART, document_xml);
        archive.set_string(DOCUMENT_RELS_PART, document_rels.to_xml());
        archive.set_string(STYLES_PART, styles_xml(&self.locale));
        archive.set_string(NUMBERING_PART, numbering_xml());
        archive.set_string(CORE_PART, core_xml(self.meta.as_ref(), self.created));
        archive.set_string(APP_PART, app_xml());

        let bytes = archive.to_bytes()?;
        info!(
            sections = sections.len(),
            bytes = bytes.len(),
            "generated standalone docx"
        );
        Ok(bytes)
    }

    /// Generate a DOCX by replacing the body of a template.
    ///
    /// Template styles are kept; plan styles it lacks are appended, and
    /// the numbering part is created or extended for bullets.
    pub fn generate_with_template(mut self, sections: &[Section], template: &[u8]) -> Result<Vec<u8>> {
        let mut archive = PackageArchive::from_bytes(template)?;
        if !archive.contains(DOCUMENT_PART) {
            return Err(DocxError::InvalidTemplate(format!(
                "template has no {}",
                DOCUMENT_PART
            )));
        }

        let mut document_rels = match archive.get(DOCUMENT_RELS_PART) {
            Some(bytes) => Relationships::parse(bytes)?,
            None => Relationships::new(),
        };
        let mut content_types = archive
            .get_string(CONTENT_TYPES_PART)
            .ok_or_else(|| DocxError::MissingFile(CONTENT_TYPES_PART.to_string()))?;

        let styles_path = word_part(&document_rels.ensure("styles.xml", Relationships::TYPE_STYLES));
        let styles = match archive.get_string(&styles_path) {
            Some(existing) => parts::merge_styles(&existing),
            None => styles_xml(&self.locale),
        };
        debug!(part = %styles_path, "writing styles");
        archive.set_string(styles_path.as_str(), styles);
        content_types = ensure_override(&content_types, &format!("/{}", styles_path), CT_STYLES);

        let numbering_path =
            word_part(&document_rels.ensure("numbering.xml", Relationships::TYPE_NUMBERING));
        let numbering = match archive.get_string(&numbering_path) {
            Some(existing) => parts::merge_numbering(&existing),
            None => numbering_xml(),
        };
        debug!(part = %numbering_path, "writing numbering");
        archive.set_string(numbering_path.as_str(), numbering);
        content_types =
            ensure_override(&content_types, &format!("/{}", numbering_path), CT_NUMBERING);

        let mut package_rels = match archive.get(ROOT_RELS_PART) {
            Some(bytes) => Relationships::parse(bytes)?,
            None => Relationships::new(),
        };
        package_rels.ensure(DOCUMENT_PART, Relationships::TYPE_OFFICE_DOCUMENT);
        let core_path = package_rels.ensure(CORE_PART, Relationships::TYPE_CORE_PROPERTIES);
        let core_path = core_path.trim_start_matches('/').to_string();
        archive.set_string(core_path.as_str(), core_xml(self.meta.as_ref(), self.created));
        content_types = ensure_override(&content_types, &format!("/{}", core_path), CT_CORE);

        // A .dotx main part is retyped as a document
        if content_types.contains("template.main+xml") {
            content_types = content_types.replace(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
                CT_DOCUMENT,
            );
        }

        let document_xml = self.generate_document_xml(sections);
        archive.set_string(DOCUMENT_PART, document_xml);
        archive.set_string(DOCUMENT_RELS_PART, document_rels.to_xml());
        archive.set_string(ROOT_RELS_PART, package_rels.to_xml());
        archive.set_string(CONTENT_TYPES_PART, content_types);

        let bytes = archive.to_bytes()?;
        info!(
            sections = sections.len(),
            bytes = bytes.len(),
            "generated docx from template"
        );
        Ok(bytes)
    }

    /// Generate `word/document.xml` for the given sections
    pub fn generate_document_xml(&mut self, sections: &[Section]) -> String {
        self.output.clear();
        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\n",
            WORDML_NS
        ));
        self.output.push_str("<w:body>\n");

        self.write_title_block();

        if sections.is_empty() {
            self.write_paragraph(STYLE_PLACEHOLDER, |w| w.write_text_run(NO_CONTENT, None));
        } else {
            render_sections(sections, self);
        }

        self.output.push_str("<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>");
        self.output.push_str(
            "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>\n",
        );
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        debug!(bytes = self.output.len(), "generated document.xml");
        self.output.clone()
    }

    fn write_title_block(&mut self) {
        let Some(meta) = self.meta.take() else {
            return;
        };

        self.write_paragraph(STYLE_TITLE, |w| w.write_text_run(&meta.title, None));

        let summary = meta.summary();
        if !summary.is_empty() {
            self.write_paragraph(STYLE_SUBTITLE, |w| w.write_text_run(&summary, None));
        }

        for (label, value) in meta.details() {
            self.write_paragraph(STYLE_META, |w| {
                w.write_run(&format!("{}: ", label), RunFormat::bold());
                w.write_text_run(&value, None);
            });
        }

        self.meta = Some(meta);
    }

    /// Write one `<w:p>` with a paragraph style; `body` writes the runs
    fn write_paragraph(&mut self, style: &str, body: impl FnOnce(&mut Self)) {
        self.output.push_str("<w:p>");
        self.output.push_str(&format!(
            "<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>",
            escape_xml(style)
        ));
        body(self);
        self.output.push_str("</w:p>\n");
        self.section_paragraphs += 1;
    }

    fn write_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => self.write_text_run(text, None),
                Inline::Format(FormatType::Bold, text) => self.write_run(text, RunFormat::bold()),
                Inline::Format(FormatType::Monospace, text) => {
                    self.write_run(text, RunFormat::monospace())
                }
            }
        }
    }

    fn write_text_run(&mut self, text: &str, color: Option<&str>) {
        self.write_run(
            text,
            RunFormat {
                color: color.map(str::to_string),
                ..RunFormat::default()
            },
        );
    }

    fn write_run(&mut self, text: &str, format: RunFormat) {
        if text.is_empty() {
            return;
        }
        self.output.push_str("<w:r>");
        let rpr = format.to_xml();
        if !rpr.is_empty() {
            self.output.push_str(&format!("<w:rPr>{}</w:rPr>", rpr));
        }
        if needs_preserve(text) {
            self.output.push_str(&format!(
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape_xml(text)
            ));
        } else {
            self.output
                .push_str(&format!("<w:t>{}</w:t>", escape_xml(text)));
        }
        self.output.push_str("</w:r>");
    }

    fn write_tab(&mut self) {
        self.output.push_str("<w:r><w:tab/></w:r>");
    }
}

impl PlanRenderer for DocxWriter<'_> {
    fn begin_section(&mut self, index: usize, section: &Section, mode: DisplayMode) {
        let style = self.styles.lookup(&section.title);
        let color = self.palette.colors(&style.accent).text_hex().to_string();
        debug!(index, title = %section.title, %mode, "writing section");

        self.section_paragraphs = 0;
        let title = section.title.clone();
        self.write_paragraph(STYLE_HEADING, |w| w.write_text_run(&title, Some(&color)));
    }

    fn line(&mut self, line: &Line) {
        match line {
            Line::Blank => self.write_paragraph(STYLE_SPACER, |_| {}),
            Line::Bullet { content } => {
                let inlines = expand_emphasis(content);
                self.write_paragraph(STYLE_BULLET, |w| w.write_inlines(&inlines));
            }
            Line::Numbered { ordinal, content } => {
                let inlines = expand_emphasis(content);
                let prefix = format!("{}. ", ordinal);
                self.write_paragraph(STYLE_NUMBERED, |w| {
                    w.write_text_run(&prefix, None);
                    w.write_inlines(&inlines);
                });
            }
            Line::Timeline {
                time_label,
                content,
            } => {
                let inlines = expand_emphasis(content);
                self.write_paragraph(STYLE_TIMELINE, |w| {
                    w.write_run(time_label, RunFormat::bold());
                    w.write_tab();
                    w.write_inlines(&inlines);
                });
            }
            Line::Text { content } => {
                let inlines = expand_emphasis(content);
                self.write_paragraph(STYLE_BODY, |w| w.write_inlines(&inlines));
            }
        }
    }

    fn placeholder(&mut self) {
        let text = self.placeholder.clone();
        self.write_paragraph(STYLE_PLACEHOLDER, |w| w.write_text_run(&text, None));
    }

    fn end_section(&mut self) {
        debug!(paragraphs = self.section_paragraphs, "section written");
    }
}

/// Run properties for one `<w:r>`
#[derive(Debug, Default, Clone)]
struct RunFormat {
    bold: bool,
    monospace: bool,
    color: Option<String>,
}

impl RunFormat {
    fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    fn monospace() -> Self {
        Self {
            monospace: true,
            ..Self::default()
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::new();
        if self.monospace {
            xml.push_str(&format!(
                "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:cs=\"{0}\"/>",
                MONOSPACE_FONT
            ));
        }
        if self.bold {
            xml.push_str("<w:b/>");
        }
        if let Some(color) = &self.color {
            xml.push_str(&format!("<w:color w:val=\"{}\"/>", escape_xml(color)));
        }
        xml
    }
}

/// Resolve a document relationship target to a package path
fn word_part(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_core::parse_sections;

    fn document(plan: &str) -> String {
        let styles = StyleTable::default();
        let palette = Palette::default();
        let mut writer = DocxWriter::new(&styles, &palette);
        writer.generate_document_xml(&parse_sections(plan))
    }

    #[test]
    fn test_bullet_with_emphasis() {
        let xml = document("## Objectives\n- Explain **erosion** with `sand`\n");
        assert!(xml.contains("<w:pStyle w:val=\"PlanBullet\"/>"));
        assert!(xml.contains("<w:r><w:rPr><w:b/></w:rPr><w:t>erosion</w:t></w:r>"));
        assert!(xml.contains("Courier New"));
        assert!(!xml.contains("**"));
    }

    #[test]
    fn test_numbered_keeps_ordinal() {
        let xml = document("## Steps\n5. Mix\n");
        assert!(xml.contains("<w:t xml:space=\"preserve\">5. </w:t>"));
        assert!(xml.contains("<w:t>Mix</w:t>"));
    }

    #[test]
    fn test_timeline_label_is_bold_and_tabbed() {
        let xml = document("## Lesson Outline\n**10-15 min**: Demo\n");
        assert!(xml.contains(
            "<w:r><w:rPr><w:b/></w:rPr><w:t>10-15 min</w:t></w:r><w:r><w:tab/></w:r><w:r><w:t>Demo</w:t></w:r>"
        ));
    }

    #[test]
    fn test_heading_uses_accent_colour() {
        let xml = document("## Objectives\nText\n");
        let styles = StyleTable::default();
        let palette = Palette::default();
        let accent = &styles.lookup("Objectives").accent;
        let hex = palette.colors(accent).text_hex();
        assert!(xml.contains(&format!("<w:color w:val=\"{}\"/>", hex)));
    }

    #[test]
    fn test_empty_section_placeholder() {
        let xml = document("## Homework\n\n");
        assert!(xml.contains("<w:pStyle w:val=\"PlanPlaceholder\"/>"));
        assert!(xml.contains(DEFAULT_PLACEHOLDER));
    }

    #[test]
    fn test_no_sections() {
        let xml = document("   ");
        assert!(xml.contains(NO_CONTENT));
        assert!(!xml.contains("PlanHeading"));
    }

    #[test]
    fn test_escapes_text() {
        let xml = document("## Notes\nUse < and & carefully\n");
        assert!(xml.contains("Use &lt; and &amp; carefully"));
    }

    #[test]
    fn test_title_block() {
        let styles = StyleTable::default();
        let palette = Palette::default();
        let mut meta = PlanMeta::with_title("Erosion");
        meta.subject = Some("Science".to_string());
        let mut writer = DocxWriter::new(&styles, &palette).with_meta(meta);
        let xml = writer.generate_document_xml(&parse_sections("## A\nx\n"));

        let title = xml.find("PlanTitle").unwrap();
        let heading = xml.find("PlanHeading").unwrap();
        assert!(title < heading);
        assert!(xml.contains("<w:t xml:space=\"preserve\">Subject: </w:t>"));
        assert!(xml.contains("Not specified"));
    }

    #[test]
    fn test_word_part() {
        assert_eq!(word_part("styles.xml"), "word/styles.xml");
        assert_eq!(word_part("/word/styles2.xml"), "word/styles2.xml");
    }
}
