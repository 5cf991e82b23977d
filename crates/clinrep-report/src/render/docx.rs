//! Office Open XML (`.docx`) output.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use clinrep_model::{Report, ReportItem};

use super::Renderer;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const CORE_PROPERTIES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Title run size in half-points.
const TITLE_SIZE: &str = "32";
/// Paragraph style for report lines, defined in `word/styles.xml`.
const LIST_STYLE: &str = "ListBullet";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>
"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>
"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>
"#;

/// `ListBullet` is bound to bullet list 1.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr>
      <w:numPr>
        <w:numId w:val="1"/>
      </w:numPr>
    </w:pPr>
  </w:style>
</w:styles>
"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:lvlText w:val="•"/>
      <w:lvlJc w:val="left"/>
      <w:pPr>
        <w:ind w:left="720" w:hanging="360"/>
      </w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1">
    <w:abstractNumId w:val="0"/>
  </w:num>
</w:numbering>
"#;

/// Word document: 16pt title, bold headings, bulleted lines, bold `FLAG` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let document = document_xml(report).context("write word/document.xml")?;
        let core = core_xml(report).context("write docProps/core.xml")?;

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            for (name, bytes) in [
                ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
                ("_rels/.rels", PACKAGE_RELS.as_bytes()),
                ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
                ("word/styles.xml", STYLES.as_bytes()),
                ("word/numbering.xml", NUMBERING.as_bytes()),
                ("word/document.xml", document.as_slice()),
                ("docProps/core.xml", core.as_slice()),
            ] {
                zip.start_file(name, options)
                    .with_context(|| format!("start {name}"))?;
                zip.write_all(bytes).with_context(|| format!("write {name}"))?;
            }
            zip.finish().context("finish docx archive")?;
        }
        debug!(bytes = buffer.len(), "docx package written");
        Ok(buffer)
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}

/// Run styling.
#[derive(Clone, Copy)]
struct RunStyle {
    bold: bool,
    size: Option<&'static str>,
}

const PLAIN: RunStyle = RunStyle {
    bold: false,
    size: None,
};
const BOLD: RunStyle = RunStyle {
    bold: true,
    size: None,
};

fn document_xml(report: &Report) -> Result<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDML_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("w:body")))?;

    let title = RunStyle {
        bold: false,
        size: Some(TITLE_SIZE),
    };
    write_paragraph(&mut xml, None, &[(report.title(), title)])?;

    for item in report.items() {
        match item {
            ReportItem::Heading(heading) => {
                write_paragraph(&mut xml, None, &[(heading.text.as_str(), BOLD)])?;
            }
            _ => {
                let line = item.text();
                if item.is_flagged() {
                    write_paragraph(
                        &mut xml,
                        Some(LIST_STYLE),
                        &[(line.as_str(), PLAIN), (" | ", PLAIN), ("FLAG", BOLD)],
                    )?;
                } else {
                    write_paragraph(&mut xml, Some(LIST_STYLE), &[(line.as_str(), PLAIN)])?;
                }
            }
        }
    }

    xml.write_event(Event::End(BytesEnd::new("w:body")))?;
    xml.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(xml.into_inner())
}

fn write_paragraph<W: Write>(
    xml: &mut Writer<W>,
    style: Option<&str>,
    runs: &[(&str, RunStyle)],
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:p")))?;
    if let Some(style) = style {
        xml.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        let mut p_style = BytesStart::new("w:pStyle");
        p_style.push_attribute(("w:val", style));
        xml.write_event(Event::Empty(p_style))?;
        xml.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }
    for (text, style) in runs {
        write_run(xml, text, *style)?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run<W: Write>(xml: &mut Writer<W>, text: &str, style: RunStyle) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:r")))?;
    if style.bold || style.size.is_some() {
        xml.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if style.bold {
            xml.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if let Some(size) = style.size {
            let mut sz = BytesStart::new("w:sz");
            sz.push_attribute(("w:val", size));
            xml.write_event(Event::Empty(sz))?;
        }
        xml.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    xml.write_event(Event::Start(t))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("w:t")))?;
    xml.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn core_xml(report: &Report) -> Result<Vec<u8>> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute(("xmlns:cp", CORE_PROPERTIES_NS));
    root.push_attribute(("xmlns:dc", DC_NS));
    root.push_attribute(("xmlns:dcterms", DCTERMS_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    xml.write_event(Event::Start(root))?;

    write_text_element(&mut xml, "dc:title", report.title())?;
    for name in ["dcterms:created", "dcterms:modified"] {
        let mut element = BytesStart::new(name);
        element.push_attribute(("xsi:type", "dcterms:W3CDTF"));
        xml.write_event(Event::Start(element))?;
        xml.write_event(Event::Text(BytesText::new(&timestamp)))?;
        xml.write_event(Event::End(BytesEnd::new(name)))?;
    }

    xml.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(xml.into_inner())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
