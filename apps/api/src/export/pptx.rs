//! PresentationML export: a title slide, then one bulleted slide per section.
//!
//! The package carries the minimum PowerPoint requires to open a deck: one
//! slide master, a title layout, a title-and-content layout and a theme.

use crate::export::package::{
    content_lines, core_properties, relationship, relationships, xml_text, Package,
    REL_CORE_PROPERTIES, REL_OFFICE_DOCUMENT, XML_DECLARATION,
};
use crate::export::ExportError;
use crate::models::project::{ProjectRow, SectionRow};

pub const MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// 4:3 slide, EMU.
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 6_858_000;
const FIRST_SLIDE_ID: usize = 256;

const GROUP_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;

/// Position and size of a placeholder, in EMU.
#[derive(Clone, Copy)]
struct Frame {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

const TITLE_SLIDE_TITLE: Frame = Frame { x: 685_800, y: 2_130_425, cx: 7_772_400, cy: 1_470_025 };
const TITLE_SLIDE_SUBTITLE: Frame = Frame { x: 1_371_600, y: 3_886_200, cx: 6_400_800, cy: 1_752_600 };
const CONTENT_TITLE: Frame = Frame { x: 457_200, y: 274_638, cx: 8_229_600, cy: 1_143_000 };
const CONTENT_BODY: Frame = Frame { x: 457_200, y: 1_600_200, cx: 8_229_600, cy: 4_525_963 };

#[derive(Clone, Copy)]
enum Layout {
    Title = 1,
    TitleAndContent = 2,
}

/// Builds the .pptx bytes. `sections` must already be in presentation order.
pub fn build_pptx(project: &ProjectRow, sections: &[SectionRow]) -> Result<Vec<u8>, ExportError> {
    let mut slides = Vec::with_capacity(sections.len() + 1);
    slides.push((Layout::Title, title_slide(&project.title, &project.topic)));
    for section in sections {
        slides.push((
            Layout::TitleAndContent,
            content_slide(&section.title, &content_lines(&section.content)),
        ));
    }

    let mut package = Package::new();
    package.add("[Content_Types].xml", &content_types(slides.len()))?;
    package.add(
        "_rels/.rels",
        &relationships(&[
            relationship("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
            relationship("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ]),
    )?;
    package.add("docProps/core.xml", &core_properties(&project.title))?;
    package.add("ppt/presentation.xml", &presentation_xml(slides.len()))?;
    package.add("ppt/_rels/presentation.xml.rels", &presentation_rels(slides.len()))?;
    package.add("ppt/theme/theme1.xml", THEME)?;
    package.add("ppt/slideMasters/slideMaster1.xml", &slide_master())?;
    package.add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &relationships(&[
            relationship("rId1", &format!("{REL_BASE}/slideLayout"), "../slideLayouts/slideLayout1.xml"),
            relationship("rId2", &format!("{REL_BASE}/slideLayout"), "../slideLayouts/slideLayout2.xml"),
            relationship("rId3", &format!("{REL_BASE}/theme"), "../theme/theme1.xml"),
        ]),
    )?;
    for (index, (layout_type, name)) in [("title", "Title Slide"), ("obj", "Title and Content")]
        .iter()
        .enumerate()
    {
        let n = index + 1;
        package.add(
            &format!("ppt/slideLayouts/slideLayout{n}.xml"),
            &slide_layout(layout_type, name),
        )?;
        package.add(
            &format!("ppt/slideLayouts/_rels/slideLayout{n}.xml.rels"),
            &relationships(&[relationship(
                "rId1",
                &format!("{REL_BASE}/slideMaster"),
                "../slideMasters/slideMaster1.xml",
            )]),
        )?;
    }

    for (index, (layout, xml)) in slides.iter().enumerate() {
        let n = index + 1;
        package.add(&format!("ppt/slides/slide{n}.xml"), xml)?;
        package.add(
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            &relationships(&[relationship(
                "rId1",
                &format!("{REL_BASE}/slideLayout"),
                &format!("../slideLayouts/slideLayout{}.xml", *layout as u8),
            )]),
        )?;
    }

    package.finish()
}

fn content_types(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            )
        })
        .collect();
    format!(
        r#"{XML_DECLARATION}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>{slides}</Types>"#
    )
}

// Relationship ids: rId1 master, rId2 theme, rId3.. slides.
fn presentation_xml(slide_count: usize) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|i| {
            format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + i,
                i + 3
            )
        })
        .collect();
    format!(
        r#"{XML_DECLARATION}<p:presentation {NAMESPACES}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}" type="screen4x3"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut entries = vec![
        relationship(
            "rId1",
            &format!("{REL_BASE}/slideMaster"),
            "slideMasters/slideMaster1.xml",
        ),
        relationship("rId2", &format!("{REL_BASE}/theme"), "theme/theme1.xml"),
    ];
    entries.extend((1..=slide_count).map(|n| {
        relationship(
            &format!("rId{}", n + 2),
            &format!("{REL_BASE}/slide"),
            &format!("slides/slide{n}.xml"),
        )
    }));
    relationships(&entries)
}

fn slide_master() -> String {
    let shapes = [
        placeholder_shape(2, "Title Placeholder 1", r#"<p:ph type="title"/>"#, CONTENT_TITLE, &empty_paragraph()),
        placeholder_shape(3, "Text Placeholder 2", r#"<p:ph type="body" idx="1"/>"#, CONTENT_BODY, &empty_paragraph()),
    ]
    .concat();
    format!(
        r#"{XML_DECLARATION}<p:sldMaster {NAMESPACES}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{GROUP_HEADER}{shapes}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn slide_layout(layout_type: &str, name: &str) -> String {
    format!(
        r#"{XML_DECLARATION}<p:sldLayout {NAMESPACES} type="{layout_type}" preserve="1"><p:cSld name="{name}"><p:spTree>{GROUP_HEADER}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

fn title_slide(title: &str, subtitle: &str) -> String {
    slide(&[
        placeholder_shape(2, "Title 1", r#"<p:ph type="ctrTitle"/>"#, TITLE_SLIDE_TITLE, &text_paragraph(title)),
        placeholder_shape(3, "Subtitle 2", r#"<p:ph type="subTitle" idx="1"/>"#, TITLE_SLIDE_SUBTITLE, &text_paragraph(subtitle)),
    ])
}

fn content_slide(title: &str, lines: &[&str]) -> String {
    let body = if lines.is_empty() {
        empty_paragraph()
    } else {
        lines.iter().map(|line| bullet_paragraph(line)).collect()
    };
    slide(&[
        placeholder_shape(2, "Title 1", r#"<p:ph type="title"/>"#, CONTENT_TITLE, &text_paragraph(title)),
        placeholder_shape(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#, CONTENT_BODY, &body),
    ])
}

fn slide(shapes: &[String]) -> String {
    format!(
        r#"{XML_DECLARATION}<p:sld {NAMESPACES}><p:cSld><p:spTree>{GROUP_HEADER}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        shapes.concat()
    )
}

fn placeholder_shape(id: u32, name: &str, placeholder: &str, frame: Frame, paragraphs: &str) -> String {
    let Frame { x, y, cx, cy } = frame;
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{placeholder}</p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#
    )
}

fn text_paragraph(text: &str) -> String {
    format!(
        r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        xml_text(text)
    )
}

fn bullet_paragraph(text: &str) -> String {
    format!(
        r#"<a:p><a:pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr><a:r><a:rPr lang="en-US" sz="1800" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        xml_text(text)
    )
}

fn empty_paragraph() -> String {
    r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::{project, read_part, section};

    #[test]
    fn test_pptx_has_title_slide_plus_one_per_section() {
        let bytes = build_pptx(
            &project("Launch Plan", "EV charging"),
            &[
                section(1, "Overview", "Line one\n\nLine two\n"),
                section(2, "Risks", ""),
            ],
        )
        .unwrap();

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);

        let title = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(title.contains("<a:t>Launch Plan</a:t>"));
        assert!(title.contains("<a:t>EV charging</a:t>"));

        let overview = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(overview.contains("<a:t>Overview</a:t>"));
        assert_eq!(overview.matches("<a:buChar").count(), 2);
        assert!(overview.contains("<a:t>Line two</a:t>"));

        let risks = read_part(&bytes, "ppt/slides/slide3.xml");
        assert!(risks.contains("<a:t>Risks</a:t>"));
        assert!(!risks.contains("<a:buChar"));
    }

    #[test]
    fn test_pptx_slides_point_at_matching_layouts() {
        let bytes = build_pptx(&project("T", "t"), &[section(1, "S", "x")]).unwrap();
        assert!(read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels")
            .contains("slideLayout1.xml"));
        assert!(read_part(&bytes, "ppt/slides/_rels/slide2.xml.rels")
            .contains("slideLayout2.xml"));
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("/ppt/slides/slide2.xml"));
        assert!(!types.contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_pptx_escapes_text() {
        let bytes = build_pptx(&project("A & B", "<topic>"), &[section(1, "S", "x")]).unwrap();
        let title = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(title.contains("<a:t>A &amp; B</a:t>"));
        assert!(title.contains("<a:t>&lt;topic&gt;</a:t>"));
    }
}
