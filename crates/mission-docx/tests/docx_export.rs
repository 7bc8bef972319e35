//! DOCX export tests: package shape, paragraph sequence, template injection

use chrono::{TimeZone, Utc};
use mission_ast::{LineKind, PlanMeta};
use mission_core::{parse_sections, render_sections, Emitted, KindRecorder, Palette, StyleTable};
use mission_docx::archive::{CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART};
use mission_docx::parts::{CORE_PART, NUMBERING_PART, STYLES_PART};
use mission_docx::test_utils::{
    create_minimal_template, create_template_with_styles, extract_file,
};
use mission_docx::{read_paragraphs, DocxError, DocxWriter, PackageArchive, Relationships};

const PLAN: &str = "# Science Plan\n\
## Learning Objectives\n\
- Explain **erosion**\n\
- Use `sand` trays\n\
\n\
Students will observe change.\n\
## Materials Needed\n\
- Sand\n\
2. Trays\n\
## Lesson Outline\n\
**5 min**: Warm-up\n\
10-15 minutes: Demo with `water`\n\
3. Reflect\n\
## Homework\n\
\n";

fn style_for(emitted: Emitted) -> &'static str {
    match emitted {
        Emitted::Placeholder => "PlanPlaceholder",
        Emitted::Line(LineKind::Blank) => "PlanSpacer",
        Emitted::Line(LineKind::Bullet) => "PlanBullet",
        Emitted::Line(LineKind::Numbered) => "PlanNumbered",
        Emitted::Line(LineKind::Timeline) => "PlanTimeline",
        Emitted::Line(LineKind::Text) => "PlanBody",
    }
}

fn generate(plan: &str) -> Vec<u8> {
    let styles = StyleTable::default();
    let palette = Palette::default();
    DocxWriter::new(&styles, &palette)
        .generate(&parse_sections(plan))
        .unwrap()
}

#[test]
fn test_standalone_package_parts() {
    let bytes = generate(PLAN);
    let archive = PackageArchive::from_bytes(&bytes).unwrap();

    for part in [
        CONTENT_TYPES_PART,
        "_rels/.rels",
        DOCUMENT_PART,
        DOCUMENT_RELS_PART,
        STYLES_PART,
        NUMBERING_PART,
        CORE_PART,
        "docProps/app.xml",
    ] {
        assert!(archive.contains(part), "missing {}", part);
    }

    let rels = Relationships::parse(archive.get(DOCUMENT_RELS_PART).unwrap()).unwrap();
    assert!(rels.find_by_type(Relationships::TYPE_STYLES).is_some());
    assert!(rels.find_by_type(Relationships::TYPE_NUMBERING).is_some());
}

#[test]
fn test_paragraph_styles_follow_lines() {
    let sections = parse_sections(PLAN);
    let mut recorder = KindRecorder::new();
    render_sections(&sections, &mut recorder);

    let mut expected = Vec::new();
    for (_, _, kinds) in &recorder.sections {
        expected.push("PlanHeading");
        expected.extend(kinds.iter().map(|kind| style_for(*kind)));
    }

    let paragraphs = read_paragraphs(&generate(PLAN)).unwrap();
    let actual: Vec<&str> = paragraphs
        .iter()
        .map(|p| p.style.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_paragraph_text() {
    let paragraphs = read_paragraphs(&generate(PLAN)).unwrap();
    let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();

    assert_eq!(texts[0], "Learning Objectives");
    assert_eq!(texts[1], "Explain erosion");
    assert_eq!(texts[3], "");
    assert!(texts.contains(&"2. Trays"));
    assert!(texts.contains(&"5 min\tWarm-up"));
    assert!(texts.contains(&"10-15 minutes\tDemo with water"));
    assert!(texts.contains(&"3. Reflect"));
    assert_eq!(texts.last(), Some(&"—"));
}

#[test]
fn test_meta_and_core_properties() {
    let styles = StyleTable::default();
    let palette = Palette::default();
    let mut meta = PlanMeta::with_title("Erosion Lab");
    meta.grade_level = Some("5th Grade".to_string());

    let bytes = DocxWriter::new(&styles, &palette)
        .with_meta(meta)
        .with_timestamp(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
        .generate(&parse_sections(PLAN))
        .unwrap();

    let paragraphs = read_paragraphs(&bytes).unwrap();
    assert_eq!(paragraphs[0].style.as_deref(), Some("PlanTitle"));
    assert_eq!(paragraphs[0].text, "Erosion Lab");
    assert_eq!(paragraphs[1].text, "5th Grade");

    let core = extract_file(&bytes, CORE_PART).unwrap();
    assert!(core.contains("<dc:title>Erosion Lab</dc:title>"));
    assert!(core.contains("2025-03-01T09:00:00Z"));
}

#[test]
fn test_empty_plan_is_not_an_error() {
    let paragraphs = read_paragraphs(&generate("")).unwrap();
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "No content");
}

#[test]
fn test_inject_into_minimal_template() {
    let styles = StyleTable::default();
    let palette = Palette::default();
    let bytes = DocxWriter::new(&styles, &palette)
        .generate_with_template(&parse_sections(PLAN), &create_minimal_template())
        .unwrap();

    let archive = PackageArchive::from_bytes(&bytes).unwrap();
    assert!(archive.contains(STYLES_PART));
    assert!(archive.contains(NUMBERING_PART));
    assert!(archive.contains(CORE_PART));

    let types = archive.get_string(CONTENT_TYPES_PART).unwrap();
    assert!(types.contains("PartName=\"/word/styles.xml\""));
    assert!(types.contains("PartName=\"/word/numbering.xml\""));
    assert!(types.contains("wordprocessingml.document.main+xml"));
    assert!(!types.contains("template.main+xml"));

    let package_rels = Relationships::parse(archive.get("_rels/.rels").unwrap()).unwrap();
    assert!(package_rels
        .find_by_type(Relationships::TYPE_CORE_PROPERTIES)
        .is_some());

    let document = archive.get_string(DOCUMENT_PART).unwrap();
    assert!(!document.contains(">Template<"));
    assert!(document.contains("Learning Objectives"));
}

#[test]
fn test_inject_keeps_template_styles() {
    let styles = StyleTable::default();
    let palette = Palette::default();
    let template = create_template_with_styles();
    let bytes = DocxWriter::new(&styles, &palette)
        .generate_with_template(&parse_sections(PLAN), &template)
        .unwrap();

    let styles_xml = extract_file(&bytes, STYLES_PART).unwrap();
    assert!(styles_xml.contains("Heading1"));
    assert!(styles_xml.contains("Corporate Body"));
    assert_eq!(styles_xml.matches("w:styleId=\"PlanBody\"").count(), 1);
    assert!(styles_xml.contains("w:styleId=\"PlanTimeline\""));

    let numbering = extract_file(&bytes, NUMBERING_PART).unwrap();
    assert!(numbering.contains("w:numId=\"1\""));
    assert!(numbering.contains("w:numId=\"90\""));

    let rels = Relationships::parse(
        PackageArchive::from_bytes(&bytes)
            .unwrap()
            .get(DOCUMENT_RELS_PART)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(rels.len(), 2);
}

#[test]
fn test_template_without_document() {
    let mut archive = PackageArchive::from_bytes(&create_minimal_template()).unwrap();
    archive.remove(DOCUMENT_PART);
    let template = archive.to_bytes().unwrap();

    let styles = StyleTable::default();
    let palette = Palette::default();
    let result = DocxWriter::new(&styles, &palette).generate_with_template(&[], &template);
    assert!(matches!(result, Err(DocxError::InvalidTemplate(_))));
}

#[test]
fn test_template_not_a_zip() {
    let styles = StyleTable::default();
    let palette = Palette::default();
    let result = DocxWriter::new(&styles, &palette).generate_with_template(&[], b"not a zip");
    assert!(matches!(result, Err(DocxError::Archive(_))));
}

#[test]
fn test_control_characters_never_reach_document() {
    let bytes = generate("## Notes\nPage one\u{c}page two\n- bell \u{7} here\n");
    let document = extract_file(&bytes, DOCUMENT_PART).unwrap();

    let illegal: Vec<char> = document
        .chars()
        .filter(|c| !mission_core::xml::is_xml_char(*c))
        .collect();
    assert!(illegal.is_empty(), "illegal characters: {:?}", illegal);

    let texts: Vec<String> = read_paragraphs(&bytes)
        .unwrap()
        .into_iter()
        .map(|p| p.text)
        .collect();
    assert_eq!(texts, vec!["Notes", "Page onepage two", "bell  here"]);
}
