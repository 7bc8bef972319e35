//! PPTX generation from a slide deck.
//!
//! Writes a self-contained presentation: one master, a title layout, a
//! title-and-content layout and one slide part per [`Slide`].

use crate::constants::*;
use crate::contract::DeckContract;
use crate::deck::Deck;
use crate::error::Result;
use crate::slide::{ParagraphKind, Slide, SlideParagraph, TextRun};
use chrono::{DateTime, SecondsFormat, Utc};
use mission_core::xml::escape_xml;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Layout part used for title slides
const TITLE_LAYOUT: u32 = 1;
/// Layout part used for content slides
const CONTENT_LAYOUT: u32 = 2;

/// Placeholder geometry for one slide size, in EMU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

impl Frame {
    fn to_xml(self) -> String {
        format!(
            "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
            self.x, self.y, self.cx, self.cy
        )
    }
}

/// Placeholder frames derived from the slide size
#[derive(Debug, Clone, Copy)]
struct Geometry {
    title: Frame,
    body: Frame,
    center_title: Frame,
    subtitle: Frame,
}

impl Geometry {
    fn for_size((width, height): (i64, i64)) -> Self {
        let margin = EMU_PER_INCH / 2;
        let inner = width - 2 * margin;
        Self {
            title: Frame {
                x: margin,
                y: height / 25,
                cx: inner,
                cy: height / 6,
            },
            body: Frame {
                x: margin,
                y: height * 7 / 30,
                cx: inner,
                cy: height * 2 / 3,
            },
            center_title: Frame {
                x: width / 13,
                y: height * 31 / 100,
                cx: width * 11 / 13,
                cy: height * 21 / 100,
            },
            subtitle: Frame {
                x: width * 3 / 20,
                y: height * 57 / 100,
                cx: width * 7 / 10,
                cy: height / 4,
            },
        }
    }
}

/// PPTX document writer
pub struct PptxWriter {
    /// Deck contract for locale, size and fonts
    contract: DeckContract,

    geometry: Geometry,

    /// Core-properties timestamp
    created: DateTime<Utc>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(DeckContract::default())
    }
}

impl PptxWriter {
    /// Create a new PPTX writer with a contract
    pub fn new(contract: DeckContract) -> Self {
        let geometry = Geometry::for_size(contract.slide_size());
        Self {
            contract,
            geometry,
            created: Utc::now(),
        }
    }

    /// Fix the core-properties timestamp
    pub fn with_timestamp(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Generate the PPTX as bytes
    pub fn generate(&self, deck: &Deck) -> Result<Vec<u8>> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        self.write_content_types(&mut zip, options, deck)?;
        self.write_root_rels(&mut zip, options)?;
        self.write_app_xml(&mut zip, options, deck)?;
        self.write_core_xml(&mut zip, options, deck)?;
        self.write_presentation_xml(&mut zip, options, deck)?;
        self.write_presentation_rels(&mut zip, options, deck)?;
        self.write_pres_props(&mut zip, options)?;
        self.write_theme(&mut zip, options)?;
        self.write_slide_master(&mut zip, options)?;
        self.write_slide_layouts(&mut zip, options)?;

        for slide in &deck.slides {
            self.write_slide(&mut zip, options, slide)?;
        }

        let cursor = zip.finish()?;
        let bytes = cursor.into_inner();
        info!(slides = deck.len(), bytes = bytes.len(), "generated pptx");
        Ok(bytes)
    }

    /// Write [Content_Types].xml
    fn write_content_types<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        deck: &Deck,
    ) -> Result<()> {
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for slide in &deck.slides {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                slide.number
            ));
        }

        content.push_str("</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write _rels/.rels
    fn write_root_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/app.xml
    fn write_app_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        deck: &Deck,
    ) -> Result<()> {
        zip.start_file("docProps/app.xml", options)?;

        let paragraphs = deck.paragraphs().count();
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Application>Mission Control</Application>
  <PresentationFormat>{}</PresentationFormat>
  <Paragraphs>{}</Paragraphs>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>{}</AppVersion>
</Properties>"#,
            presentation_format(self.contract.slide_size()),
            paragraphs,
            deck.len(),
            env!("CARGO_PKG_VERSION")
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/core.xml
    fn write_core_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        deck: &Deck,
    ) -> Result<()> {
        zip.start_file("docProps/core.xml", options)?;

        let title = deck.title.as_deref().unwrap_or("Lesson Plan");
        let author = &self.contract.meta.author;
        let now = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dc:language>{}</dc:language>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(title),
            escape_xml(author),
            escape_xml(author),
            escape_xml(&self.contract.meta.locale),
            now,
            now
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presentation.xml
    fn write_presentation_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        deck: &Deck,
    ) -> Result<()> {
        zip.start_file("ppt/presentation.xml", options)?;

        let (width, height) = self.contract.slide_size();

        let mut slide_refs = String::new();
        for slide in &deck.slides {
            slide_refs.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + slide.number,
                slide.number + 3 // rId1=slideMaster, rId2=presProps, rId3=theme, rId4+=slides
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_refs,
            width,
            height,
            height, // Notes are rotated
            width
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/_rels/presentation.xml.rels
    fn write_presentation_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        deck: &Deck,
    ) -> Result<()> {
        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;

        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="{}" Target="theme/theme1.xml"/>
"#,
            REL_TYPE_SLIDE_MASTER, REL_TYPE_THEME
        );

        for slide in &deck.slides {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                slide.number + 3,
                REL_TYPE_SLIDE,
                slide.number
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presProps.xml
    fn write_pres_props<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presProps.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:extLst/>
</p:presentationPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/theme/theme1.xml
    fn write_theme<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/theme/theme1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="Mission Control">
  <a:themeElements>
    <a:clrScheme name="Mission Control">
      <a:dk1><a:srgbClr val="18181B"/></a:dk1>
      <a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="3F3F46"/></a:dk2>
      <a:lt2><a:srgbClr val="F4F4F5"/></a:lt2>
      <a:accent1><a:srgbClr val="2563EB"/></a:accent1>
      <a:accent2><a:srgbClr val="D97706"/></a:accent2>
      <a:accent3><a:srgbClr val="7C3AED"/></a:accent3>
      <a:accent4><a:srgbClr val="059669"/></a:accent4>
      <a:accent5><a:srgbClr val="DB2777"/></a:accent5>
      <a:accent6><a:srgbClr val="0284C7"/></a:accent6>
      <a:hlink><a:srgbClr val="2563EB"/></a:hlink>
      <a:folHlink><a:srgbClr val="7C3AED"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Mission Control">
      <a:majorFont>
        <a:latin typeface="Calibri Light"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="Calibri"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/slideMasters/slideMaster1.xml
    fn write_slide_master<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001">
        <a:schemeClr val="bg1"/>
      </p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;

        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Id="rId3" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_THEME
        );

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write the two slide layouts and their relationships
    fn write_slide_layouts<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        let locale = escape_xml(&self.contract.meta.locale);
        let layout_shape = |id: u32, name: &str, ph: &str, frame: Frame| {
            format!(
                r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{id}" name="{name}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr>{ph}</p:nvPr>
        </p:nvSpPr>
        <p:spPr>{xfrm}</p:spPr>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
          <a:p><a:endParaRPr lang="{locale}"/></a:p>
        </p:txBody>
      </p:sp>
"#,
                xfrm = frame.to_xml()
            )
        };

        let layouts = [
            (
                TITLE_LAYOUT,
                "title",
                "Title Slide",
                layout_shape(2, "Title 1", r#"<p:ph type="ctrTitle"/>"#, self.geometry.center_title)
                    + &layout_shape(
                        3,
                        "Subtitle 2",
                        r#"<p:ph type="subTitle" idx="1"/>"#,
                        self.geometry.subtitle,
                    ),
            ),
            (
                CONTENT_LAYOUT,
                "obj",
                "Title and Content",
                layout_shape(2, "Title 1", r#"<p:ph type="title"/>"#, self.geometry.title)
                    + &layout_shape(
                        3,
                        "Content Placeholder 2",
                        r#"<p:ph idx="1"/>"#,
                        self.geometry.body,
                    ),
            ),
        ];

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );

        for (index, layout_type, name, shapes) in layouts {
            zip.start_file(format!("ppt/slideLayouts/slideLayout{}.xml", index), options)?;
            let content = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">
  <p:cSld name="{}">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
                NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, layout_type, name, shapes
            );
            zip.write_all(content.as_bytes())?;

            zip.start_file(
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
                options,
            )?;
            zip.write_all(rels.as_bytes())?;
        }

        Ok(())
    }

    /// Write a single slide and its relationships
    fn write_slide<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        slide: &Slide,
    ) -> Result<()> {
        zip.start_file(format!("ppt/slides/slide{}.xml", slide.number), options)?;

        let layout_idx = if slide.is_title_slide() {
            TITLE_LAYOUT
        } else {
            CONTENT_LAYOUT
        };

        let content = self.generate_slide_xml(slide);
        debug!(
            number = slide.number,
            paragraphs = slide.paragraphs.len(),
            "writing slide"
        );
        zip.write_all(content.as_bytes())?;

        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide.number),
            options,
        )?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, layout_idx
        );

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Generate slide XML content
    pub fn generate_slide_xml(&self, slide: &Slide) -> String {
        let mut shapes = self.generate_title_shape(slide);

        if slide.is_title_slide() {
            if let Some(subtitle) = &slide.subtitle {
                shapes.push_str(&self.generate_subtitle_shape(subtitle));
            }
        } else if !slide.paragraphs.is_empty() {
            shapes.push_str(&self.generate_body_shape(&slide.paragraphs));
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, shapes
        )
    }

    /// Generate title shape XML
    fn generate_title_shape(&self, slide: &Slide) -> String {
        let ph_type = if slide.is_title_slide() {
            "ctrTitle"
        } else {
            "title"
        };

        let fill = slide
            .accent
            .as_deref()
            .map(|hex| format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", escape_xml(hex)))
            .unwrap_or_default();

        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="Title 1"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="{}"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
          <a:p>
            <a:r>
              <a:rPr lang="{}" b="1">{}</a:rPr>
              <a:t>{}</a:t>
            </a:r>
          </a:p>
        </p:txBody>
      </p:sp>
"#,
            ph_type,
            escape_xml(&self.contract.meta.locale),
            fill,
            escape_xml(&slide.title)
        )
    }

    /// Generate subtitle shape XML
    fn generate_subtitle_shape(&self, subtitle: &str) -> String {
        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Subtitle 2"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
          <a:p>
            <a:r>
              <a:rPr lang="{}"/>
              <a:t>{}</a:t>
            </a:r>
          </a:p>
        </p:txBody>
      </p:sp>
"#,
            escape_xml(&self.contract.meta.locale),
            escape_xml(subtitle)
        )
    }

    /// Generate the body placeholder with one `<a:p>` per paragraph
    fn generate_body_shape(&self, paragraphs: &[SlideParagraph]) -> String {
        let mut body = String::new();
        for paragraph in paragraphs {
            body.push_str(&self.generate_paragraph(paragraph));
        }

        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Content 3"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr><a:normAutofit/></a:bodyPr>
          <a:lstStyle/>
{}        </p:txBody>
      </p:sp>
"#,
            body
        )
    }

    /// Generate one paragraph; only bullets carry a bullet character
    fn generate_paragraph(&self, paragraph: &SlideParagraph) -> String {
        let ppr = match paragraph.kind {
            ParagraphKind::Bullet => {
                r#"<a:pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="•"/></a:pPr>"#
            }
            _ => r#"<a:pPr marL="0" indent="0"><a:buNone/></a:pPr>"#,
        };

        let runs = self.generate_text_runs(&paragraph.runs);
        if runs.is_empty() {
            return format!(
                "          <a:p>{}<a:endParaRPr lang=\"{}\" sz=\"{}\"/></a:p>\n",
                ppr,
                escape_xml(&self.contract.meta.locale),
                self.font_size()
            );
        }

        format!("          <a:p>\n            {}\n{}          </a:p>\n", ppr, runs)
    }

    /// Font size in hundredths of a point
    fn font_size(&self) -> u32 {
        self.contract.content.font_size * 100
    }

    /// Generate text runs
    fn generate_text_runs(&self, runs: &[TextRun]) -> String {
        let mut result = String::new();

        for run in runs.iter().filter(|run| !run.text.is_empty()) {
            let mut rpr = format!(
                "lang=\"{}\" sz=\"{}\"",
                escape_xml(&self.contract.meta.locale),
                self.font_size()
            );

            if run.bold {
                rpr.push_str(" b=\"1\"");
            }
            if run.italic {
                rpr.push_str(" i=\"1\"");
            }

            result.push_str(&format!(
                "            <a:r>\n              <a:rPr {}/>\n              <a:t>{}</a:t>\n            </a:r>\n",
                rpr,
                escape_xml(&run.text)
            ));
        }

        result
    }
}

/// Presentation format label for app.xml
fn presentation_format((width, height): (i64, i64)) -> &'static str {
    let ratio = width as f64 / height as f64;
    if (ratio - 16.0 / 9.0).abs() < 0.01 {
        "On-screen Show (16:9)"
    } else if (ratio - 4.0 / 3.0).abs() < 0.01 {
        "On-screen Show (4:3)"
    } else {
        "Custom"
    }
}
