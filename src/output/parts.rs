//! Package Parts
//!
//! PPTXパッケージを構成するスライド以外のXMLパーツを生成するモジュール。
//! マスター1枚・レイアウト2枚（タイトルのみ / タイトルとコンテンツ）・テーマ1つの
//! 最小構成です。

use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use super::units::{SLIDE_HEIGHT, SLIDE_WIDTH};

pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// 最初のスライドのID（PresentationMLの仕様で256以上）
const FIRST_SLIDE_ID: usize = 256;

/// スライドマスターのID（2^31以上）
const SLIDE_MASTER_ID: u64 = 2_147_483_648;

/// スライドが使用するレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlideLayout {
    /// タイトルのみ（slideLayout1.xml）
    TitleOnly,
    /// タイトルとコンテンツ（slideLayout2.xml）
    TitleAndContent,
}

impl SlideLayout {
    pub const ALL: [SlideLayout; 2] = [SlideLayout::TitleOnly, SlideLayout::TitleAndContent];

    /// 1始まりのレイアウト番号
    pub fn number(&self) -> usize {
        match self {
            SlideLayout::TitleOnly => 1,
            SlideLayout::TitleAndContent => 2,
        }
    }

    pub fn part_name(&self) -> String {
        format!("ppt/slideLayouts/slideLayout{}.xml", self.number())
    }

    pub fn rels_part_name(&self) -> String {
        format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", self.number())
    }

    fn name(&self) -> &'static str {
        match self {
            SlideLayout::TitleOnly => "Title Only",
            SlideLayout::TitleAndContent => "Title and Content",
        }
    }

    fn layout_type(&self) -> &'static str {
        match self {
            SlideLayout::TitleOnly => "titleOnly",
            SlideLayout::TitleAndContent => "obj",
        }
    }
}

/// スライドのパーツ名（1始まり）
pub(crate) fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// スライドのリレーションシップパーツ名（1始まり）
pub(crate) fn slide_rels_part_name(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

/// `[Content_Types].xml`
pub(crate) fn content_types_xml(slide_count: usize) -> Result<String, std::fmt::Error> {
    const CT_BASE: &str = "application/vnd.openxmlformats-officedocument";

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut push_override = |part: &str, content_type: &str| -> std::fmt::Result {
        write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part, content_type
        )
    };

    push_override(
        "ppt/presentation.xml",
        &format!("{}.presentationml.presentation.main+xml", CT_BASE),
    )?;
    push_override(
        "ppt/slideMasters/slideMaster1.xml",
        &format!("{}.presentationml.slideMaster+xml", CT_BASE),
    )?;
    for layout in SlideLayout::ALL {
        push_override(
            &layout.part_name(),
            &format!("{}.presentationml.slideLayout+xml", CT_BASE),
        )?;
    }
    for number in 1..=slide_count {
        push_override(
            &slide_part_name(number),
            &format!("{}.presentationml.slide+xml", CT_BASE),
        )?;
    }
    push_override("ppt/theme/theme1.xml", &format!("{}.theme+xml", CT_BASE))?;
    push_override(
        "docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    )?;
    push_override(
        "docProps/app.xml",
        &format!("{}.extended-properties+xml", CT_BASE),
    )?;

    xml.push_str("</Types>");
    Ok(xml)
}

/// リレーションシップパーツを生成する（`(Id, 種別, ターゲット)`のリスト）
fn relationships_xml(
    relationships: &[(String, String, String)],
) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(256 + relationships.len() * 160);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_PACKAGE_RELS)?;
    for (id, rel_type, target) in relationships {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn rel(id: usize, kind: &str, target: impl Into<String>) -> (String, String, String) {
    (
        format!("rId{}", id),
        format!("{}/{}", REL_BASE, kind),
        target.into(),
    )
}

/// `_rels/.rels`
pub(crate) fn root_rels_xml() -> Result<String, std::fmt::Error> {
    relationships_xml(&[
        rel(1, "officeDocument", "ppt/presentation.xml"),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                .to_string(),
            "docProps/core.xml".to_string(),
        ),
        rel(3, "extended-properties", "docProps/app.xml"),
    ])
}

/// `ppt/_rels/presentation.xml.rels`
///
/// rId1がマスター、rId2がテーマ、rId3以降がスライドです。
pub(crate) fn presentation_rels_xml(slide_count: usize) -> Result<String, std::fmt::Error> {
    let mut relationships = vec![
        rel(1, "slideMaster", "slideMasters/slideMaster1.xml"),
        rel(2, "theme", "theme/theme1.xml"),
    ];
    relationships.extend(
        (1..=slide_count).map(|number| rel(number + 2, "slide", format!("slides/slide{}.xml", number))),
    );
    relationships_xml(&relationships)
}

/// `ppt/presentation.xml`
pub(crate) fn presentation_xml(slide_count: usize) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )?;
    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="rId1"/></p:sldMasterIdLst>"#,
        SLIDE_MASTER_ID
    )?;

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + index,
                index + 3
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        SLIDE_WIDTH, SLIDE_HEIGHT
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// グループ図形のプロパティ（spTreeの先頭に必須）
pub(crate) const GROUP_SHAPE_PROPERTIES: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

/// プレースホルダー図形（位置はマスターで定義）
fn placeholder_shape(
    xml: &mut String,
    id: u32,
    name: &str,
    ph: &str,
    geometry: Option<(i64, i64, i64, i64)>,
) -> std::fmt::Result {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr>"#,
        id, name, ph
    )?;
    match geometry {
        Some((x, y, cx, cy)) => write!(
            xml,
            r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
            x, y, cx, cy
        )?,
        None => xml.push_str("<p:spPr/>"),
    }
    xml.push_str(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    Ok(())
}

/// `ppt/slideMasters/slideMaster1.xml`
pub(crate) fn slide_master_xml() -> Result<String, std::fmt::Error> {
    use super::units::{BODY_FRAME, TITLE_FRAME};

    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )?;
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    xml.push_str(GROUP_SHAPE_PROPERTIES);
    placeholder_shape(
        &mut xml,
        2,
        "Title Placeholder 1",
        r#"<p:ph type="title"/>"#,
        Some(TITLE_FRAME.as_tuple()),
    )?;
    placeholder_shape(
        &mut xml,
        3,
        "Text Placeholder 2",
        r#"<p:ph type="body" idx="1"/>"#,
        Some(BODY_FRAME.as_tuple()),
    )?;
    xml.push_str("</p:spTree></p:cSld>");

    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#,
    ));

    xml.push_str("<p:sldLayoutIdLst>");
    for layout in SlideLayout::ALL {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            SLIDE_MASTER_ID + layout.number() as u64,
            layout.number()
        )?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str(concat!(
        "<p:txStyles>",
        r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="4400">"#,
        r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
        r#"<a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/>"#,
        "</a:defRPr></a:lvl1pPr></p:titleStyle>",
        r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900">"#,
        r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200">"#,
        r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
        r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/>"#,
        "</a:defRPr></a:lvl1pPr></p:bodyStyle>",
        r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#,
        "</p:txStyles>",
    ));
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

/// `ppt/slideMasters/_rels/slideMaster1.xml.rels`
pub(crate) fn slide_master_rels_xml() -> Result<String, std::fmt::Error> {
    let mut relationships: Vec<_> = SlideLayout::ALL
        .iter()
        .map(|layout| {
            rel(
                layout.number(),
                "slideLayout",
                format!("../slideLayouts/slideLayout{}.xml", layout.number()),
            )
        })
        .collect();
    relationships.push(rel(
        SlideLayout::ALL.len() + 1,
        "theme",
        "../theme/theme1.xml",
    ));
    relationships_xml(&relationships)
}

/// `ppt/slideLayouts/slideLayoutN.xml`
pub(crate) fn slide_layout_xml(layout: SlideLayout) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1536);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">"#,
        NS_A,
        NS_R,
        NS_P,
        layout.layout_type()
    )?;
    write!(xml, r#"<p:cSld name="{}"><p:spTree>"#, layout.name())?;
    xml.push_str(GROUP_SHAPE_PROPERTIES);
    placeholder_shape(&mut xml, 2, "Title 1", r#"<p:ph type="title"/>"#, None)?;
    if layout == SlideLayout::TitleAndContent {
        placeholder_shape(
            &mut xml,
            3,
            "Content Placeholder 2",
            r#"<p:ph idx="1"/>"#,
            None,
        )?;
    }
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// `ppt/slideLayouts/_rels/slideLayoutN.xml.rels`
pub(crate) fn slide_layout_rels_xml() -> Result<String, std::fmt::Error> {
    relationships_xml(&[rel(1, "slideMaster", "../slideMasters/slideMaster1.xml")])
}

/// `ppt/slides/_rels/slideN.xml.rels`
pub(crate) fn slide_rels_xml(layout: SlideLayout) -> Result<String, std::fmt::Error> {
    relationships_xml(&[rel(
        1,
        "slideLayout",
        format!("../slideLayouts/slideLayout{}.xml", layout.number()),
    )])
}

/// `ppt/theme/theme1.xml`
pub(crate) fn theme_xml() -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(3072);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<a:theme xmlns:a="{}" name="Office Theme">"#, NS_A)?;
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (slot, rgb) in [
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ] {
        write!(xml, r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, slot, rgb)?;
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    for font in ["majorFont", "minorFont"] {
        write!(
            xml,
            r#"<a:{0}><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:{0}>"#,
            font
        )?;
    }
    xml.push_str("</a:fontScheme>");

    let solid_ph = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    for _ in 0..3 {
        xml.push_str(solid_ph);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        write!(xml, r#"<a:ln w="{}">{}</a:ln>"#, width, solid_ph)?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid_ph);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

/// `docProps/core.xml`
///
/// `timestamp`はW3CDTF形式（例: `2025-01-02T03:04:05Z`）。
pub(crate) fn core_properties_xml(title: &str, timestamp: &str) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape(title))?;
    xml.push_str("<dc:creator>xlsxdeck</dc:creator>");
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
        timestamp
    )?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `docProps/app.xml`
pub(crate) fn app_properties_xml(slide_count: usize) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    ));
    write!(
        xml,
        "<Application>xlsxdeck</Application><Slides>{}</Slides>",
        slide_count
    )?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types_xml(3).unwrap();
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide3.xml""#));
        assert!(!xml.contains("slide4.xml"));
        assert!(xml.contains(r#"PartName="/ppt/slideLayouts/slideLayout2.xml""#));
        assert!(xml.contains("presentationml.presentation.main+xml"));
    }

    #[test]
    fn test_presentation_xml_slide_ids() {
        let xml = presentation_xml(2).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));
    }

    #[test]
    fn test_presentation_rels_match_slide_ids() {
        let xml = presentation_rels_xml(2).unwrap();
        assert!(xml.contains(r#"Id="rId1""#) && xml.contains("slideMasters/slideMaster1.xml"));
        assert!(xml.contains(r#"Id="rId2""#) && xml.contains("theme/theme1.xml"));
        assert!(xml.contains(r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>"#));
        assert!(xml.contains(r#"Target="slides/slide2.xml""#));
    }

    #[test]
    fn test_master_lists_layouts() {
        let xml = slide_master_xml().unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483650" r:id="rId2"/>"#));

        let rels = slide_master_rels_xml().unwrap();
        assert!(rels.contains(r#"Id="rId3""#));
        assert!(rels.contains("../theme/theme1.xml"));
    }

    #[test]
    fn test_layouts() {
        let title_only = slide_layout_xml(SlideLayout::TitleOnly).unwrap();
        assert!(title_only.contains(r#"type="titleOnly""#));
        assert!(!title_only.contains(r#"<p:ph idx="1"/>"#));

        let content = slide_layout_xml(SlideLayout::TitleAndContent).unwrap();
        assert!(content.contains(r#"type="obj""#));
        assert!(content.contains(r#"<p:ph idx="1"/>"#));
    }

    #[test]
    fn test_core_properties_escape_title() {
        let xml = core_properties_xml("Q&A <draft>", "2025-01-02T03:04:05Z").unwrap();
        assert!(xml.contains("<dc:title>Q&amp;A &lt;draft&gt;</dc:title>"));
        assert!(xml.contains("2025-01-02T03:04:05Z"));
    }

    #[test]
    fn test_theme_has_required_schemes() {
        let xml = theme_xml().unwrap();
        assert!(xml.contains("<a:clrScheme"));
        assert!(xml.contains("<a:fontScheme"));
        assert!(xml.contains("<a:fmtScheme"));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }
}
