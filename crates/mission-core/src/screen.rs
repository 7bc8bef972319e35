//! On-screen card renderer
//!
//! Renders each section as a [`Card`] of [`CardItem`]s. This is the only
//! target that honours [`DisplayMode`]: outline sections lay timeline and
//! bullet lines out as marker rows, material sections turn list lines into
//! checklist items. No line is ever dropped; modes only change grouping.
//!
//! Cards serialize to JSON, and [`ScreenPage::to_html`] produces a small
//! standalone HTML view.

use std::collections::BTreeSet;

use mission_ast::{Inline, Line, LineKind, PlanMeta, Section};
use serde::{Deserialize, Serialize};

use crate::inline::expand_emphasis;
use crate::render::{render_sections, DisplayMode, Emitted, PlanRenderer};
use crate::style::{AccentColors, Palette, StyleTable};

/// Marker shown next to bullet rows in outline mode
pub const BULLET_MARKER: &str = "•";

/// Default text for sections without lines
pub const DEFAULT_PLACEHOLDER: &str = "—";

/// One rendered element of a card body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardItem {
    Spacer,
    Paragraph {
        inlines: Vec<Inline>,
    },
    ListItem {
        inlines: Vec<Inline>,
    },
    Numbered {
        ordinal: u64,
        inlines: Vec<Inline>,
    },
    /// Row with a left-hand marker column (time label or bullet)
    TimelineRow {
        marker: String,
        inlines: Vec<Inline>,
    },
    ChecklistItem {
        id: String,
        label: String,
        inlines: Vec<Inline>,
    },
    Placeholder {
        text: String,
    },
}

impl CardItem {
    /// The line kind (or placeholder) this item was rendered from
    pub fn emitted(&self, source: Option<LineKind>) -> Emitted {
        match (self, source) {
            (Self::Placeholder { .. }, _) | (_, None) => Emitted::Placeholder,
            (_, Some(kind)) => Emitted::Line(kind),
        }
    }
}

/// A rendered section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub icon: String,
    pub accent: String,
    pub colors: AccentColors,
    pub mode: DisplayMode,
    pub items: Vec<CardItem>,
    /// Source line kind of each item, parallel to `items`
    #[serde(skip)]
    pub sources: Vec<Option<LineKind>>,
}

impl Card {
    /// Kinds this card was built from, in order
    pub fn kinds(&self) -> Vec<Emitted> {
        self.items
            .iter()
            .zip(&self.sources)
            .map(|(item, source)| item.emitted(*source))
            .collect()
    }
}

/// Renders sections into cards
#[derive(Debug)]
pub struct ScreenRenderer<'a> {
    styles: &'a StyleTable,
    palette: &'a Palette,
    placeholder: String,
    cards: Vec<Card>,
}

impl<'a> ScreenRenderer<'a> {
    pub fn new(styles: &'a StyleTable, palette: &'a Palette) -> Self {
        Self {
            styles,
            palette,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            cards: Vec::new(),
        }
    }

    /// Override the placeholder text for empty sections
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Render `sections` and return the cards
    pub fn render(mut self, sections: &[Section]) -> Vec<Card> {
        render_sections(sections, &mut self);
        self.cards
    }

    fn push(&mut self, item: CardItem, source: Option<LineKind>) {
        if let Some(card) = self.cards.last_mut() {
            card.items.push(item);
            card.sources.push(source);
        }
    }

    fn next_item_id(&self) -> String {
        let section = self.cards.len().saturating_sub(1);
        let item = self.cards.last().map_or(0, |card| card.items.len());
        format!("s{}-i{}", section, item)
    }

    fn current_mode(&self) -> DisplayMode {
        self.cards.last().map(|card| card.mode).unwrap_or_default()
    }
}

fn numbered_inlines(ordinal: u64, content: &str) -> Vec<Inline> {
    let mut inlines = vec![Inline::Text(format!("{}. ", ordinal))];
    inlines.extend(expand_emphasis(content));
    inlines
}

fn labelled_inlines(label: &str, content: &str) -> Vec<Inline> {
    let mut inlines = vec![
        Inline::Format(mission_ast::FormatType::Bold, label.to_string()),
        Inline::Text(": ".to_string()),
    ];
    inlines.extend(expand_emphasis(content));
    inlines
}

impl PlanRenderer for ScreenRenderer<'_> {
    fn begin_section(&mut self, _index: usize, section: &Section, mode: DisplayMode) {
        let style = self.styles.lookup(&section.title);
        self.cards.push(Card {
            title: section.title.clone(),
            icon: style.icon.clone(),
            accent: style.accent.clone(),
            colors: self.palette.colors(&style.accent).clone(),
            mode,
            items: Vec::new(),
            sources: Vec::new(),
        });
    }

    fn line(&mut self, line: &Line) {
        let mode = self.current_mode();
        let item = match (mode, line) {
            (_, Line::Blank) => CardItem::Spacer,

            (DisplayMode::Outline, Line::Bullet { content }) => CardItem::TimelineRow {
                marker: BULLET_MARKER.to_string(),
                inlines: expand_emphasis(content),
            },
            (DisplayMode::Outline, Line::Numbered { ordinal, content }) => CardItem::Paragraph {
                inlines: numbered_inlines(*ordinal, content),
            },

            (DisplayMode::Checklist, Line::Bullet { content }) => CardItem::ChecklistItem {
                id: self.next_item_id(),
                label: content.clone(),
                inlines: expand_emphasis(content),
            },
            (DisplayMode::Checklist, Line::Numbered { ordinal, content }) => {
                CardItem::ChecklistItem {
                    id: self.next_item_id(),
                    label: format!("{}. {}", ordinal, content),
                    inlines: numbered_inlines(*ordinal, content),
                }
            }
            (
                DisplayMode::Checklist,
                Line::Timeline {
                    time_label,
                    content,
                },
            ) => CardItem::Paragraph {
                inlines: labelled_inlines(time_label, content),
            },

            (DisplayMode::Default, Line::Bullet { content }) => CardItem::ListItem {
                inlines: expand_emphasis(content),
            },
            (DisplayMode::Default, Line::Numbered { ordinal, content }) => CardItem::Numbered {
                ordinal: *ordinal,
                inlines: expand_emphasis(content),
            },

            (
                _,
                Line::Timeline {
                    time_label,
                    content,
                },
            ) => CardItem::TimelineRow {
                marker: time_label.clone(),
                inlines: expand_emphasis(content),
            },
            (_, Line::Text { content }) => CardItem::Paragraph {
                inlines: expand_emphasis(content),
            },
        };
        self.push(item, Some(line.kind()));
    }

    fn placeholder(&mut self) {
        let text = self.placeholder.clone();
        self.push(CardItem::Placeholder { text }, None);
    }

    fn end_section(&mut self) {}
}

/// Ephemeral checked/unchecked state for checklist items.
///
/// Lives alongside the cards and never modifies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistState {
    checked: BTreeSet<String>,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an item and return its new state
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.checked.remove(id) {
            false
        } else {
            self.checked.insert(id.to_string());
            true
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }
}

/// A full screen: optional plan header plus cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PlanMeta>,
    pub cards: Vec<Card>,
    #[serde(skip)]
    pub checklist: ChecklistState,
}

impl ScreenPage {
    pub fn new(meta: Option<PlanMeta>, cards: Vec<Card>) -> Self {
        Self {
            meta,
            cards,
            checklist: ChecklistState::new(),
        }
    }

    /// Render a standalone HTML document
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let title = self
            .meta
            .as_ref()
            .map_or("Lesson Plan", |meta| meta.title.as_str());

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        out.push_str(STYLE_SHEET);
        out.push_str("</head>\n<body>\n");

        if let Some(meta) = &self.meta {
            out.push_str("<header class=\"plan-meta\">\n");
            out.push_str(&format!("<h1>{}</h1>\n", escape_html(&meta.title)));
            out.push_str("<dl>\n");
            for (label, value) in meta.details() {
                out.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>\n",
                    escape_html(label),
                    escape_html(&value)
                ));
            }
            out.push_str("</dl>\n</header>\n");
        }

        if self.cards.is_empty() {
            out.push_str("<p class=\"empty\">No content</p>\n");
        }

        for card in &self.cards {
            self.write_card(&mut out, card);
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn write_card(&self, out: &mut String, card: &Card) {
        out.push_str(&format!(
            "<section class=\"card mode-{}\" style=\"border-color:{};background:{}\">\n",
            card.mode, card.colors.border, card.colors.background
        ));
        out.push_str(&format!(
            "<h2 style=\"color:{}\"><span class=\"icon\">{}</span> {}</h2>\n",
            card.colors.text,
            escape_html(&card.icon),
            escape_html(&card.title)
        ));

        let mut in_list: Option<&str> = None;
        for item in &card.items {
            let wanted = match item {
                CardItem::ListItem { .. } => Some("ul"),
                CardItem::Numbered { .. } => Some("ol"),
                _ => None,
            };
            if in_list != wanted {
                if let Some(tag) = in_list {
                    out.push_str(&format!("</{}>\n", tag));
                }
                if let Some(tag) = wanted {
                    out.push_str(&format!("<{}>\n", tag));
                }
                in_list = wanted;
            }

            match item {
                CardItem::Spacer => out.push_str("<div class=\"spacer\"></div>\n"),
                CardItem::Paragraph { inlines } => {
                    out.push_str(&format!("<p>{}</p>\n", inlines_html(inlines)));
                }
                CardItem::ListItem { inlines } => {
                    out.push_str(&format!("<li>{}</li>\n", inlines_html(inlines)));
                }
                CardItem::Numbered { ordinal, inlines } => {
                    out.push_str(&format!(
                        "<li value=\"{}\">{}</li>\n",
                        ordinal,
                        inlines_html(inlines)
                    ));
                }
                CardItem::TimelineRow { marker, inlines } => {
                    out.push_str(&format!(
                        "<div class=\"row\"><span class=\"marker\">{}</span><span>{}</span></div>\n",
                        escape_html(marker),
                        inlines_html(inlines)
                    ));
                }
                CardItem::ChecklistItem { id, inlines, .. } => {
                    let checked = if self.checklist.is_checked(id) {
                        " checked"
                    } else {
                        ""
                    };
                    out.push_str(&format!(
                        "<label class=\"check\"><input type=\"checkbox\" data-item=\"{}\"{}> {}</label>\n",
                        escape_html(id),
                        checked,
                        inlines_html(inlines)
                    ));
                }
                CardItem::Placeholder { text } => {
                    out.push_str(&format!(
                        "<p class=\"placeholder\">{}</p>\n",
                        escape_html(text)
                    ));
                }
            }
        }
        if let Some(tag) = in_list {
            out.push_str(&format!("</{}>\n", tag));
        }

        out.push_str("</section>\n");
    }
}

const STYLE_SHEET: &str = "<style>\n\
body{font-family:system-ui,sans-serif;max-width:56rem;margin:2rem auto;padding:0 1rem}\n\
.card{border:1px solid;border-radius:.75rem;padding:1rem;margin-bottom:1rem}\n\
.row{display:flex;gap:1rem}.marker{min-width:6rem;font-weight:600}\n\
.spacer{height:.5rem}.placeholder{color:#a1a1aa}\n\
code{font-family:ui-monospace,monospace}\n\
</style>\n";

fn inlines_html(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => escape_html(text),
            Inline::Format(mission_ast::FormatType::Bold, text) => {
                format!("<strong>{}</strong>", escape_html(text))
            }
            Inline::Format(mission_ast::FormatType::Monospace, text) => {
                format!("<code>{}</code>", escape_html(text))
            }
        })
        .collect()
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_ast::FormatType;

    fn render(sections: &[Section]) -> Vec<Card> {
        let styles = StyleTable::default();
        let palette = Palette::default();
        ScreenRenderer::new(&styles, &palette).render(sections)
    }

    #[test]
    fn test_default_mode_items() {
        let cards = render(&[Section::new(
            "Objectives",
            "- **Explain** photosynthesis\n3. Draw\n\nWrap up",
        )]);
        let items = &cards[0].items;
        assert_eq!(
            items[0],
            CardItem::ListItem {
                inlines: vec![
                    Inline::Format(FormatType::Bold, "Explain".to_string()),
                    Inline::Text(" photosynthesis".to_string()),
                ]
            }
        );
        assert!(matches!(items[1], CardItem::Numbered { ordinal: 3, .. }));
        assert_eq!(items[2], CardItem::Spacer);
        assert!(matches!(items[3], CardItem::Paragraph { .. }));
        assert_eq!(cards[0].accent, "blue");
    }

    #[test]
    fn test_outline_mode_rows() {
        let cards = render(&[Section::new(
            "Lesson Outline",
            "**5 min**: Hook\n- Pair share\n1. Recap",
        )]);
        let items = &cards[0].items;
        assert_eq!(cards[0].mode, DisplayMode::Outline);
        assert!(matches!(&items[0], CardItem::TimelineRow { marker, .. } if marker == "5 min"));
        assert!(matches!(&items[1], CardItem::TimelineRow { marker, .. } if marker == BULLET_MARKER));
        assert!(matches!(&items[2], CardItem::Paragraph { .. }));
    }

    #[test]
    fn test_checklist_mode_items() {
        let cards = render(&[Section::new(
            "Materials Needed",
            "- Scissors\n2. Glue\n**10 min**: setup\nNote",
        )]);
        let items = &cards[0].items;
        assert!(matches!(&items[0], CardItem::ChecklistItem { id, label, .. } if id == "s0-i0" && label == "Scissors"));
        assert!(matches!(&items[1], CardItem::ChecklistItem { label, .. } if label == "2. Glue"));
        match &items[2] {
            CardItem::Paragraph { inlines } => {
                assert_eq!(inlines[0], Inline::Format(FormatType::Bold, "10 min".to_string()));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_placeholder() {
        let styles = StyleTable::default();
        let palette = Palette::default();
        let cards = ScreenRenderer::new(&styles, &palette)
            .with_placeholder("Nothing here")
            .render(&[Section::new("Empty", "")]);
        assert_eq!(
            cards[0].items,
            vec![CardItem::Placeholder {
                text: "Nothing here".to_string()
            }]
        );
        assert_eq!(cards[0].kinds(), vec![Emitted::Placeholder]);
    }

    #[test]
    fn test_checklist_state_is_separate() {
        let cards = render(&[Section::new("Materials", "- a\n- b")]);
        let before = cards.clone();
        let mut state = ChecklistState::new();
        assert!(state.toggle("s0-i1"));
        assert!(state.is_checked("s0-i1"));
        assert!(!state.toggle("s0-i1"));
        assert_eq!(state.checked_count(), 0);
        assert_eq!(cards, before);
    }

    #[test]
    fn test_html_output() {
        let cards = render(&[
            Section::new("Materials", "- <glue>\n- tape"),
            Section::new("Steps", "1. Cut\n2. Paste"),
        ]);
        let mut page = ScreenPage::new(Some(PlanMeta::with_title("Crafts")), cards);
        page.checklist.toggle("s0-i0");
        let html = page.to_html();

        assert!(html.contains("<title>Crafts</title>"));
        assert!(html.contains("&lt;glue&gt;"));
        assert!(html.contains("data-item=\"s0-i0\" checked"));
        assert!(html.contains("<ol>\n<li value=\"1\">Cut</li>"));
        assert!(html.contains("<dt>Duration</dt><dd>Not specified</dd>"));
    }

    #[test]
    fn test_html_no_content() {
        let page = ScreenPage::new(None, Vec::new());
        assert!(page.to_html().contains("No content"));
    }

    #[test]
    fn test_card_json() {
        let cards = render(&[Section::new("Outline", "**5 min**: Hook")]);
        let json = serde_json::to_value(&cards).unwrap();
        assert_eq!(json[0]["mode"], "outline");
        assert_eq!(json[0]["items"][0]["type"], "timeline_row");
        assert_eq!(json[0]["items"][0]["marker"], "5 min");
    }
}
