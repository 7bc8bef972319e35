//! Package parts for a standalone plan document
//!
//! Paragraph style ids, the styles and numbering parts, content types,
//! package relationships and document properties.

use chrono::{DateTime, SecondsFormat, Utc};
use mission_ast::PlanMeta;

use crate::relationships::Relationships;
use crate::xml::escape_xml;

pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub const STYLE_TITLE: &str = "PlanTitle";
pub const STYLE_SUBTITLE: &str = "PlanSubtitle";
pub const STYLE_META: &str = "PlanMeta";
pub const STYLE_HEADING: &str = "PlanHeading";
pub const STYLE_BULLET: &str = "PlanBullet";
pub const STYLE_NUMBERED: &str = "PlanNumbered";
pub const STYLE_TIMELINE: &str = "PlanTimeline";
pub const STYLE_BODY: &str = "PlanBody";
pub const STYLE_SPACER: &str = "PlanSpacer";
pub const STYLE_PLACEHOLDER: &str = "PlanPlaceholder";

/// Every paragraph style this crate writes
pub const PLAN_STYLES: &[&str] = &[
    STYLE_TITLE,
    STYLE_SUBTITLE,
    STYLE_META,
    STYLE_HEADING,
    STYLE_BULLET,
    STYLE_NUMBERED,
    STYLE_TIMELINE,
    STYLE_BODY,
    STYLE_SPACER,
    STYLE_PLACEHOLDER,
];

/// Abstract numbering and instance id used for bullet paragraphs
pub const BULLET_NUM_ID: u32 = 90;

pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const CORE_PART: &str = "docProps/core.xml";
pub const APP_PART: &str = "docProps/app.xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";

pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
pub const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// `<w:style>` definitions for every plan style, without the wrapper
pub fn style_definitions() -> String {
    let paragraph = |id: &str, name: &str, ppr: &str, rpr: &str| {
        format!(
            "<w:style w:type=\"paragraph\" w:customStyle=\"1\" w:styleId=\"{id}\">\
<w:name w:val=\"{name}\"/><w:basedOn w:val=\"Normal\"/><w:qFormat/>\
<w:pPr>{ppr}</w:pPr><w:rPr>{rpr}</w:rPr></w:style>\n"
        )
    };

    let mut xml = String::new();
    xml.push_str(&paragraph(
        STYLE_TITLE,
        "Plan Title",
        "<w:spacing w:after=\"120\"/>",
        "<w:b/><w:sz w:val=\"40\"/>",
    ));
    xml.push_str(&paragraph(
        STYLE_SUBTITLE,
        "Plan Subtitle",
        "<w:spacing w:after=\"240\"/>",
        "<w:color w:val=\"71717A\"/><w:sz w:val=\"22\"/>",
    ));
    xml.push_str(&paragraph(
        STYLE_META,
        "Plan Detail",
        "<w:spacing w:after=\"60\"/>",
        "<w:sz w:val=\"20\"/>",
    ));
    xml.push_str(&paragraph(
        STYLE_HEADING,
        "Plan Section Heading",
        "<w:keepNext/><w:spacing w:before=\"360\" w:after=\"120\"/><w:outlineLvl w:val=\"1\"/>",
        "<w:b/><w:sz w:val=\"28\"/>",
    ));
    xml.push_str(&paragraph(
        STYLE_BULLET,
        "Plan Bullet",
        &format!(
            "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr><w:spacing w:after=\"60\"/>",
            BULLET_NUM_ID
        ),
        "",
    ));
    xml.push_str(&paragraph(
        STYLE_NUMBERED,
        "Plan Numbered",
        "<w:spacing w:after=\"60\"/><w:ind w:left=\"360\"/>",
        "",
    ));
    xml.push_str(&paragraph(
        STYLE_TIMELINE,
        "Plan Timeline",
        "<w:tabs><w:tab w:val=\"left\" w:pos=\"1800\"/></w:tabs><w:spacing w:after=\"80\"/><w:ind w:left=\"1800\" w:hanging=\"1800\"/>",
        "",
    ));
    xml.push_str(&paragraph(
        STYLE_BODY,
        "Plan Body",
        "<w:spacing w:after=\"120\"/>",
        "",
    ));
    xml.push_str(&paragraph(
        STYLE_SPACER,
        "Plan Spacer",
        "<w:spacing w:after=\"0\"/>",
        "<w:sz w:val=\"12\"/>",
    ));
    xml.push_str(&paragraph(
        STYLE_PLACEHOLDER,
        "Plan Placeholder",
        "<w:spacing w:after=\"120\"/>",
        "<w:i/><w:color w:val=\"A1A1AA\"/>",
    ));
    xml
}

/// Complete `word/styles.xml`
pub fn styles_xml(locale: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<w:styles xmlns:w=\"{ns}\">\n\
<w:docDefaults><w:rPrDefault><w:rPr>\
<w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\" w:eastAsia=\"Calibri\" w:cs=\"Calibri\"/>\
<w:sz w:val=\"22\"/><w:lang w:val=\"{lang}\"/></w:rPr></w:rPrDefault>\
<w:pPrDefault><w:pPr><w:spacing w:after=\"120\" w:line=\"264\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>\
</w:docDefaults>\n\
<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/><w:qFormat/></w:style>\n\
{styles}</w:styles>",
        ns = WORDML_NS,
        lang = escape_xml(locale),
        styles = style_definitions()
    )
}

/// Add any plan styles missing from an existing styles part
pub fn merge_styles(existing: &str) -> String {
    let missing: String = style_definitions()
        .lines()
        .zip(PLAN_STYLES)
        .filter(|(_, id)| !existing.contains(&format!("w:styleId=\"{}\"", id)))
        .map(|(def, _)| format!("{}\n", def))
        .collect();

    if missing.is_empty() {
        return existing.to_string();
    }
    existing.replacen("</w:styles>", &format!("{}</w:styles>", missing), 1)
}

fn bullet_abstract_num() -> String {
    format!(
        "<w:abstractNum w:abstractNumId=\"{id}\"><w:multiLevelType w:val=\"singleLevel\"/>\
<w:lvl w:ilvl=\"0\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/><w:lvlText w:val=\"•\"/>\
<w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr></w:lvl>\
</w:abstractNum>\n",
        id = BULLET_NUM_ID
    )
}

fn bullet_num() -> String {
    format!(
        "<w:num w:numId=\"{id}\"><w:abstractNumId w:val=\"{id}\"/></w:num>\n",
        id = BULLET_NUM_ID
    )
}

/// Complete `word/numbering.xml`
pub fn numbering_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<w:numbering xmlns:w=\"{}\">\n{}{}</w:numbering>",
        WORDML_NS,
        bullet_abstract_num(),
        bullet_num()
    )
}

/// Add the bullet numbering to an existing numbering part.
///
/// Abstract definitions must precede `w:num` instances, so the abstract
/// one goes before the first instance.
pub fn merge_numbering(existing: &str) -> String {
    if existing.contains(&format!("w:numId=\"{}\"", BULLET_NUM_ID)) {
        return existing.to_string();
    }
    let with_abstract = match existing.find("<w:num ") {
        Some(pos) => format!(
            "{}{}{}",
            &existing[..pos],
            bullet_abstract_num(),
            &existing[pos..]
        ),
        None => existing.replacen(
            "</w:numbering>",
            &format!("{}</w:numbering>", bullet_abstract_num()),
            1,
        ),
    };
    with_abstract.replacen(
        "</w:numbering>",
        &format!("{}</w:numbering>", bullet_num()),
        1,
    )
}

/// Complete `[Content_Types].xml` for a standalone document
pub fn content_types_xml() -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n\
  <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\n\
  <Default Extension=\"xml\" ContentType=\"application/xml\"/>\n",
    );
    for (part, content_type) in [
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/word/numbering.xml", CT_NUMBERING),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ] {
        xml.push_str(&format!(
            "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
            part, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// Add an override to existing content types unless the part is listed
pub fn ensure_override(content_types: &str, part_name: &str, content_type: &str) -> String {
    if content_types.contains(&format!("PartName=\"{}\"", part_name)) {
        return content_types.to_string();
    }
    content_types.replacen(
        "</Types>",
        &format!(
            "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n</Types>",
            part_name, content_type
        ),
        1,
    )
}

/// Package-level relationships for a standalone document
pub fn root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT);
    rels.add(CORE_PART, Relationships::TYPE_CORE_PROPERTIES);
    rels.add(APP_PART, Relationships::TYPE_EXTENDED_PROPERTIES);
    rels
}

/// `docProps/core.xml` for a plan
pub fn core_xml(meta: Option<&PlanMeta>, created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );

    if let Some(meta) = meta {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&meta.title)));
        if let Some(subject) = &meta.subject {
            xml.push_str(&format!("<dc:subject>{}</dc:subject>", escape_xml(subject)));
        }
        if !meta.assignment_types.is_empty() {
            xml.push_str(&format!(
                "<cp:keywords>{}</cp:keywords>",
                escape_xml(&meta.assignment_types.join(", "))
            ));
        }
    }
    xml.push_str("<dc:creator>Mission Control</dc:creator>");
    xml.push_str(&format!(
        "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>"
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

/// `docProps/app.xml`
pub fn app_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
<Application>Mission Control {}</Application></Properties>",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_one_definition_per_style() {
        let defs = style_definitions();
        assert_eq!(defs.lines().count(), PLAN_STYLES.len());
        for id in PLAN_STYLES {
            assert!(defs.contains(&format!("w:styleId=\"{}\"", id)));
        }
    }

    #[test]
    fn test_merge_styles_adds_missing_only() {
        let existing = format!(
            "<w:styles xmlns:w=\"{}\"><w:style w:type=\"paragraph\" w:styleId=\"PlanBody\"/></w:styles>",
            WORDML_NS
        );
        let merged = merge_styles(&existing);
        assert_eq!(merged.matches("w:styleId=\"PlanBody\"").count(), 1);
        assert!(merged.contains("w:styleId=\"PlanHeading\""));
        assert!(merged.ends_with("</w:styles>"));
        assert_eq!(merge_styles(&merged), merged);
    }

    #[test]
    fn test_merge_numbering_order() {
        let existing = "<w:numbering><w:abstractNum w:abstractNumId=\"0\"/><w:num w:numId=\"1\"><w:abstractNumId w:val=\"0\"/></w:num></w:numbering>";
        let merged = merge_numbering(existing);
        let abstract_pos = merged.find("w:abstractNumId=\"90\"").unwrap();
        let first_num = merged.find("<w:num ").unwrap();
        assert!(abstract_pos < first_num);
        assert!(merged.contains("<w:num w:numId=\"90\">"));
        assert_eq!(merge_numbering(&merged), merged);
    }

    #[test]
    fn test_ensure_override() {
        let types = content_types_xml();
        assert_eq!(ensure_override(&types, "/word/styles.xml", CT_STYLES), types);
        let minimal = "<Types></Types>";
        assert!(ensure_override(minimal, "/word/numbering.xml", CT_NUMBERING)
            .contains("PartName=\"/word/numbering.xml\""));
    }

    #[test]
    fn test_core_xml() {
        let created = Utc.with_ymd_and_hms(2025, 2, 10, 14, 30, 0).unwrap();
        let mut meta = PlanMeta::with_title("Fractions & Decimals");
        meta.subject = Some("Math".to_string());
        let xml = core_xml(Some(&meta), created);
        assert!(xml.contains("<dc:title>Fractions &amp; Decimals</dc:title>"));
        assert!(xml.contains("<dc:subject>Math</dc:subject>"));
        assert!(xml.contains("2025-02-10T14:30:00Z"));
    }
}
