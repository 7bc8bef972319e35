//! Building a slide deck from plan sections.
//!
//! One section becomes one slide; a section with more paragraphs than the
//! contract allows continues on further slides with a suffixed title.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mission_ast::{Line, PlanMeta, Section};
use mission_core::render::render_sections;
use mission_core::{DisplayMode, Palette, PlanRenderer, StyleTable, DEFAULT_SECTION_TITLE};

use crate::contract::DeckContract;
use crate::slide::{ParagraphKind, Slide, SlideParagraph, TextRun};

/// Body text of the single slide produced for an empty plan
pub const NO_CONTENT: &str = "No content";

/// Slides ready to be written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Presentation title for the core properties
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Body paragraphs of all content slides, in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &SlideParagraph> {
        self.slides
            .iter()
            .filter(|slide| !slide.is_title_slide())
            .flat_map(|slide| slide.paragraphs.iter())
    }
}

/// Section being collected between `begin_section` and `end_section`
struct PendingSection {
    index: usize,
    title: String,
    accent: Option<String>,
    paragraphs: Vec<SlideParagraph>,
}

/// Turns plan sections into a [`Deck`]
pub struct DeckBuilder<'a> {
    contract: &'a DeckContract,
    styles: &'a StyleTable,
    palette: &'a Palette,
    meta: Option<PlanMeta>,
    slides: Vec<Slide>,
    current: Option<PendingSection>,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(contract: &'a DeckContract, styles: &'a StyleTable, palette: &'a Palette) -> Self {
        Self {
            contract,
            styles,
            palette,
            meta: None,
            slides: Vec::new(),
            current: None,
        }
    }

    /// Plan metadata for the title slide and deck title
    pub fn with_meta(mut self, meta: PlanMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(mut self, sections: &[Section]) -> Deck {
        if let Some(meta) = self.meta.as_ref().filter(|_| self.contract.title_slide.enabled) {
            let summary = meta.summary();
            let subtitle = (self.contract.title_slide.show_summary && !summary.is_empty())
                .then_some(summary);
            self.slides.push(Slide::title_slide(0, meta.title.clone(), subtitle));
        }

        if sections.is_empty() {
            let title = self
                .meta
                .as_ref()
                .map(|meta| meta.title.clone())
                .unwrap_or_else(|| DEFAULT_SECTION_TITLE.to_string());
            self.slides.push(Slide::content_slide(0, title).with_paragraph(
                SlideParagraph::new(ParagraphKind::Placeholder, vec![TextRun::italic(NO_CONTENT)]),
            ));
        } else {
            render_sections(sections, &mut self);
        }

        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.number = i as u32 + 1;
        }

        info!(
            sections = sections.len(),
            slides = self.slides.len(),
            "built slide deck"
        );
        Deck {
            title: self.meta.map(|meta| meta.title),
            slides: self.slides,
        }
    }

    fn push_paragraph(&mut self, paragraph: SlideParagraph) {
        if let Some(section) = self.current.as_mut() {
            section.paragraphs.push(paragraph);
        }
    }
}

/// Slide paragraph for a classified line; content is used verbatim
pub fn paragraph_for(line: &Line) -> SlideParagraph {
    match line {
        Line::Blank => SlideParagraph::spacer(),
        Line::Bullet { content } => SlideParagraph::plain(ParagraphKind::Bullet, content.as_str()),
        Line::Numbered { ordinal, content } => {
            SlideParagraph::plain(ParagraphKind::Numbered, format!("{}. {}", ordinal, content))
        }
        Line::Timeline {
            time_label,
            content,
        } => {
            let mut runs = vec![TextRun::bold(time_label.as_str())];
            if !content.is_empty() {
                runs.push(TextRun::plain(format!("  {}", content)));
            }
            SlideParagraph::new(ParagraphKind::Timeline, runs)
        }
        Line::Text { content } => SlideParagraph::plain(ParagraphKind::Text, content.as_str()),
    }
}

impl PlanRenderer for DeckBuilder<'_> {
    fn begin_section(&mut self, index: usize, section: &Section, mode: DisplayMode) {
        let accent = self.contract.content.accent_titles.then(|| {
            let style = self.styles.lookup(&section.title);
            self.palette.colors(&style.accent).text_hex().to_string()
        });
        debug!(index, title = %section.title, %mode, "collecting section");

        self.current = Some(PendingSection {
            index,
            title: section.title.clone(),
            accent,
            paragraphs: Vec::new(),
        });
    }

    fn line(&mut self, line: &Line) {
        self.push_paragraph(paragraph_for(line));
    }

    fn placeholder(&mut self) {
        let text = self.contract.content.placeholder.clone();
        self.push_paragraph(SlideParagraph::new(
            ParagraphKind::Placeholder,
            vec![TextRun::italic(text)],
        ));
    }

    fn end_section(&mut self) {
        let Some(section) = self.current.take() else {
            return;
        };

        let per_slide = self.contract.content.max_lines_per_slide.max(1);
        let chunks: Vec<&[SlideParagraph]> = section.paragraphs.chunks(per_slide).collect();
        debug!(
            index = section.index,
            paragraphs = section.paragraphs.len(),
            slides = chunks.len(),
            "section split into slides"
        );

        for (part, chunk) in chunks.into_iter().enumerate() {
            let title = if part == 0 {
                section.title.clone()
            } else {
                format!("{}{}", section.title, self.contract.content.continued_suffix)
            };
            let mut slide = Slide::content_slide(0, title);
            slide.accent = section.accent.clone();
            slide.section = Some(section.index);
            slide.paragraphs = chunk.to_vec();
            self.slides.push(slide);
        }
    }
}
