//! Slide Rendering
//!
//! `Slide`をPresentationML（`ppt/slides/slideN.xml`）に変換するモジュール。

use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use super::parts::{SlideLayout, GROUP_SHAPE_PROPERTIES, NS_A, NS_P, NS_R, XML_DECLARATION};
use super::units::{font_sz, TableLayout};
use crate::api::RgbColor;
use crate::slides::{ContentSlide, Footnote, Slide, TableSlide, TitleSlide};

/// 表の罫線の色
const BORDER_COLOR: RgbColor = RgbColor::new(0xBF, 0xBF, 0xBF);

/// 罫線の太さ（EMU、1ポイント）
const BORDER_WIDTH: i64 = 12_700;

/// テキストランの書式
#[derive(Debug, Clone, Copy)]
struct RunStyle {
    font_size: f64,
    color: Option<RgbColor>,
    bold: bool,
    italic: bool,
}

impl RunStyle {
    fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            color: None,
            bold: false,
            italic: false,
        }
    }

    fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn write_attributes(&self, xml: &mut String) -> std::fmt::Result {
        write!(xml, r#" lang="en-US" sz="{}""#, font_sz(self.font_size))?;
        if self.bold {
            xml.push_str(r#" b="1""#);
        }
        if self.italic {
            xml.push_str(r#" i="1""#);
        }
        Ok(())
    }

    fn write_fill(&self, xml: &mut String) -> std::fmt::Result {
        if let Some(color) = self.color {
            write_solid_fill(xml, color)?;
        }
        Ok(())
    }
}

/// スライドが使用するレイアウト
pub(crate) fn layout_for(slide: &Slide) -> SlideLayout {
    match slide {
        Slide::Title(_) => SlideLayout::TitleOnly,
        Slide::Content(_) | Slide::Table(_) => SlideLayout::TitleAndContent,
    }
}

/// スライドをXMLに変換する
pub(crate) fn render_slide(slide: &Slide) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    match slide {
        Slide::Title(title) => write_title_slide(&mut xml, title)?,
        Slide::Content(content) => write_content_slide(&mut xml, content)?,
        Slide::Table(table) => write_table_slide(&mut xml, table)?,
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

fn write_title_slide(xml: &mut String, slide: &TitleSlide) -> std::fmt::Result {
    let style = RunStyle::sized(slide.font_size).with_color(slide.color);
    write_title_placeholder(xml, &slide.text, Some(style))
}

fn write_content_slide(xml: &mut String, slide: &ContentSlide) -> std::fmt::Result {
    write_title_placeholder(xml, &slide.title, None)?;

    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>"#,
        "<p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>",
    ));
    write_paragraphs(xml, &slide.body, RunStyle::sized(slide.font_size))?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_table_slide(xml: &mut String, slide: &TableSlide) -> std::fmt::Result {
    write_title_placeholder(xml, &slide.title, None)?;

    let table = &slide.table;
    // 列のない行だけの表はgridColのないa:tblになるので描かない
    let row_count = if table.column_count() == 0 { 0 } else { table.row_count() };
    let layout = TableLayout::compute(&table.column_display_widths(), row_count);

    if row_count > 0 {
        write_table(xml, slide, &layout)?;
    }
    if let Some(footnote) = &slide.footnote {
        write_footnote(xml, footnote, &layout)?;
    }
    Ok(())
}

fn write_title_placeholder(
    xml: &mut String,
    text: &str,
    style: Option<RunStyle>,
) -> std::fmt::Result {
    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#,
        "<p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>",
    ));
    match style {
        Some(style) => write_paragraphs(xml, text, style)?,
        None => {
            // 書式はマスターのtitleStyleに従う
            for line in split_lines(text) {
                write!(
                    xml,
                    r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#,
                    escape(line)
                )?;
            }
        }
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_table(xml: &mut String, slide: &TableSlide, layout: &TableLayout) -> std::fmt::Result {
    let frame = layout.frame;
    let column_count = layout.column_widths.len();

    write!(
        xml,
        concat!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="4" name="Table 3"/>"#,
            r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>"#,
            r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#,
            r#"<a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#,
        ),
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    for width in &layout.column_widths {
        write!(xml, r#"<a:gridCol w="{}"/>"#, width)?;
    }
    xml.push_str("</a:tblGrid>");

    let header_style = RunStyle::sized(slide.font_size)
        .with_color(RgbColor::WHITE)
        .bold();
    let body_style = RunStyle::sized(slide.font_size);

    for (row_index, (row, height)) in slide
        .table
        .rows()
        .iter()
        .zip(&layout.row_heights)
        .enumerate()
    {
        let is_header = row_index == 0;
        write!(xml, r#"<a:tr h="{}">"#, height)?;
        // 短い行は空セルで補う
        for col in 0..column_count {
            let text = row.get(col).map(String::as_str).unwrap_or("");
            xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
            if is_header {
                write_paragraphs(xml, text, header_style)?;
            } else {
                write_paragraphs(xml, text, body_style)?;
            }
            xml.push_str("</a:txBody><a:tcPr>");
            write_cell_borders(xml)?;
            if is_header {
                write_solid_fill(xml, slide.header_fill)?;
            }
            xml.push_str("</a:tcPr></a:tc>");
        }
        xml.push_str("</a:tr>");
    }

    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    Ok(())
}

fn write_footnote(xml: &mut String, footnote: &Footnote, layout: &TableLayout) -> std::fmt::Result {
    let frame = layout.footnote_frame();
    write!(
        xml,
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="5" name="Footnote 4"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"/><a:lstStyle/>"#,
        ),
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    write_paragraphs(xml, &footnote.text, RunStyle::sized(footnote.font_size).italic())?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

/// 改行ごとに段落を分けてテキストを書き出す
fn write_paragraphs(xml: &mut String, text: &str, style: RunStyle) -> std::fmt::Result {
    for line in split_lines(text) {
        xml.push_str("<a:p>");
        if line.is_empty() {
            xml.push_str("<a:endParaRPr");
            style.write_attributes(xml)?;
            xml.push_str("/>");
        } else {
            xml.push_str("<a:r><a:rPr");
            style.write_attributes(xml)?;
            xml.push_str(r#" dirty="0">"#);
            style.write_fill(xml)?;
            write!(xml, "</a:rPr><a:t>{}</a:t></a:r>", escape(line))?;
        }
        xml.push_str("</a:p>");
    }
    Ok(())
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn write_solid_fill(xml: &mut String, color: RgbColor) -> std::fmt::Result {
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        color.to_hex()
    )
}

fn write_cell_borders(xml: &mut String) -> std::fmt::Result {
    for side in ["lnL", "lnR", "lnT", "lnB"] {
        write!(xml, r#"<a:{} w="{}" cmpd="sng">"#, side, BORDER_WIDTH)?;
        write_solid_fill(xml, BORDER_COLOR)?;
        write!(xml, "</a:{}>", side)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DataTable;

    fn table_slide(rows: Vec<Vec<&str>>, footnote: Option<&str>) -> Slide {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        Slide::Table(TableSlide {
            title: "Final Results".to_string(),
            table: DataTable::from_rows(rows),
            font_size: 18.0,
            header_fill: RgbColor::new(0x1F, 0x4E, 0x79),
            footnote: footnote.map(|text| Footnote {
                text: text.to_string(),
                font_size: 16.0,
            }),
        })
    }

    #[test]
    fn test_title_slide() {
        let slide = Slide::Title(TitleSlide {
            text: "Presentation".to_string(),
            font_size: 32.0,
            color: RgbColor::new(0x1F, 0x4E, 0x79),
        });
        let xml = render_slide(&slide).unwrap();

        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"sz="3200""#));
        assert!(xml.contains(r#"<a:srgbClr val="1F4E79"/>"#));
        assert!(xml.contains("<a:t>Presentation</a:t>"));
        assert_eq!(layout_for(&slide), SlideLayout::TitleOnly);
    }

    #[test]
    fn test_content_slide() {
        let slide = Slide::Content(ContentSlide {
            index: 2,
            title: "Slide 2".to_string(),
            body: "Content goes here…".to_string(),
            font_size: 18.0,
        });
        let xml = render_slide(&slide).unwrap();

        assert!(xml.contains("<a:t>Slide 2</a:t>"));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains(r#"sz="1800""#));
        assert!(xml.contains("<a:t>Content goes here…</a:t>"));
        assert_eq!(layout_for(&slide), SlideLayout::TitleAndContent);
    }

    #[test]
    fn test_table_rows_and_header() {
        let slide = table_slide(
            vec![vec!["Name", "Score"], vec!["Alice", "90"], vec!["Bob", "85"]],
            Some("* The values are estimated."),
        );
        let xml = render_slide(&slide).unwrap();

        assert_eq!(xml.matches("<a:tr ").count(), 3);
        assert_eq!(xml.matches("<a:tc>").count(), 6);
        assert_eq!(xml.matches("<a:gridCol ").count(), 2);
        assert!(xml.contains(r#"b="1""#));
        assert!(xml.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
        assert!(xml.contains(r#"<a:solidFill><a:srgbClr val="1F4E79"/></a:solidFill></a:tcPr>"#));
        assert!(xml.contains("<a:t>Alice</a:t>"));
        assert!(xml.contains("<a:t>* The values are estimated.</a:t>"));
        assert!(xml.contains(r#"sz="1600" i="1""#));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let slide = table_slide(vec![vec!["A", "B", "C"], vec!["1"]], None);
        let xml = render_slide(&slide).unwrap();

        assert_eq!(xml.matches("<a:tc>").count(), 6);
        assert_eq!(xml.matches("<a:endParaRPr").count(), 2);
    }

    #[test]
    fn test_empty_table_has_no_frame() {
        let slide = table_slide(vec![], Some("* The values are estimated."));
        let xml = render_slide(&slide).unwrap();

        assert!(!xml.contains("<p:graphicFrame>"));
        assert_eq!(xml.matches("<a:tr ").count(), 0);
        assert!(xml.contains("* The values are estimated."));
    }

    #[test]
    fn test_table_without_columns_has_no_frame() {
        let slide = table_slide(vec![vec![], vec![]], Some("* The values are estimated."));
        let xml = render_slide(&slide).unwrap();

        assert!(!xml.contains("<p:graphicFrame>"));
        assert!(!xml.contains("<a:tbl>"));
        assert_eq!(xml.matches("<a:tr ").count(), 0);
        assert!(xml.contains("* The values are estimated."));
        assert_eq!(xml, render_slide(&table_slide(vec![], Some("* The values are estimated."))).unwrap());
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let slide = table_slide(vec![vec!["R&D <2024>"], vec!["\"quoted\""]], None);
        let xml = render_slide(&slide).unwrap();

        assert!(xml.contains("R&amp;D &lt;2024&gt;"));
        assert!(!xml.contains("R&D"));
        assert!(xml.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_multiline_cell_becomes_paragraphs() {
        let slide = table_slide(vec![vec!["Header"], vec!["line one\r\nline two"]], None);
        let xml = render_slide(&slide).unwrap();

        assert!(xml.contains("<a:t>line one</a:t>"));
        assert!(xml.contains("<a:t>line two</a:t>"));
        assert!(!xml.contains('\r'));
    }
}
