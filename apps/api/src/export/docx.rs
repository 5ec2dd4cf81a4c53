//! WordprocessingML export: title page, then one page per section.

use crate::export::package::{
    content_lines, core_properties, relationship, relationships, xml_text, Package,
    REL_CORE_PROPERTIES, REL_OFFICE_DOCUMENT, XML_DECLARATION,
};
use crate::export::ExportError;
use crate::models::project::{ProjectRow, SectionRow};

pub const MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const EMPTY_SECTION_TEXT: &str = "Content pending.";
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light"/><w:sz w:val="56"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="32"/></w:rPr></w:style></w:styles>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

/// Builds the .docx bytes. `sections` must already be in document order.
pub fn build_docx(project: &ProjectRow, sections: &[SectionRow]) -> Result<Vec<u8>, ExportError> {
    let mut package = Package::new();
    package.add("[Content_Types].xml", CONTENT_TYPES)?;
    package.add(
        "_rels/.rels",
        &relationships(&[
            relationship("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
            relationship("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ]),
    )?;
    package.add("docProps/core.xml", &core_properties(&project.title))?;
    package.add(
        "word/_rels/document.xml.rels",
        &relationships(&[relationship(
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
            "styles.xml",
        )]),
    )?;
    package.add("word/styles.xml", STYLES)?;
    package.add("word/document.xml", &document_xml(project, sections))?;
    package.finish()
}

fn document_xml(project: &ProjectRow, sections: &[SectionRow]) -> String {
    let mut body = String::new();
    body.push_str(&paragraph(Some("Title"), &project.title));
    body.push_str(&paragraph(None, &project.topic));
    body.push_str(PAGE_BREAK);

    for section in sections {
        body.push_str(&paragraph(Some("Heading1"), &section.title));
        let lines = content_lines(&section.content);
        if lines.is_empty() {
            body.push_str(&paragraph(None, EMPTY_SECTION_TEXT));
        }
        for line in lines {
            body.push_str(&paragraph(None, line));
        }
        body.push_str(PAGE_BREAK);
    }

    format!(
        r#"{XML_DECLARATION}<w:document xmlns:w="{W_NS}"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"#
    )
}

fn paragraph(style: Option<&str>, text: &str) -> String {
    let properties = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{s}"/></w:pPr>"#))
        .unwrap_or_default();
    format!(
        r#"<w:p>{properties}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        xml_text(text)
    )
}
