//! XML part builders for the presentation package.

use std::collections::BTreeSet;

use super::text::{encode_run_text, xml_escape};
use crate::deck::{Deck, ImageFormat, Picture, Slide};

pub(super) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(super) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(super) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const RT_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const RT_EXT_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const RT_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const RT_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const RT_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// 10in x 7.5in, the classic 4:3 slide.
pub(super) const SLIDE_WIDTH: i64 = 9_144_000;
pub(super) const SLIDE_HEIGHT: i64 = 6_858_000;

/// Body text size in hundredths of a point.
const BODY_FONT_SIZE: u32 = 1800;

/// First slide id; PresentationML requires ids of at least 256.
const FIRST_SLIDE_ID: usize = 256;

/// Relationship id of slide `idx` in `presentation.xml.rels`. rId1 and rId2
/// are the master and the theme.
pub(super) fn slide_rel_id(idx: usize) -> String {
    format!("rId{}", idx + 3)
}

pub(super) fn slide_part_name(idx: usize) -> String {
    format!("ppt/slides/slide{}.xml", idx + 1)
}

pub(super) fn slide_rels_part_name(idx: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", idx + 1)
}

pub(super) fn media_part_name(idx: usize, format: ImageFormat) -> String {
    format!("ppt/media/image{}.{}", idx + 1, format.extension())
}

fn relationship(id: &str, rel_type: &str, target: &str) -> String {
    format!(
        r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
        id,
        rel_type,
        xml_escape(target)
    )
}

fn relationships(entries: &[String]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_PKG_RELS));
    for entry in entries {
        xml.push_str(entry);
    }
    xml.push_str("</Relationships>");
    xml
}

pub(super) fn content_types(deck: &Deck) -> String {
    let formats: BTreeSet<ImageFormat> = deck
        .slides
        .iter()
        .filter_map(|slide| slide.picture.as_ref().map(|picture| picture.format))
        .collect();

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for format in formats {
        xml.push_str(&format!(
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.content_type()
        ));
    }

    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for idx in 0..deck.slides.len() {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            slide_part_name(idx)
        ));
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

pub(super) fn package_rels() -> String {
    relationships(&[
        relationship("rId1", RT_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        relationship("rId2", RT_CORE_PROPS, "docProps/core.xml"),
        relationship("rId3", RT_EXT_PROPS, "docProps/app.xml"),
    ])
}

pub(super) fn presentation(deck: &Deck) -> String {
    let mut xml = String::with_capacity(1024 + deck.slides.len() * 48);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if !deck.slides.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for idx in 0..deck.slides.len() {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + idx,
                slide_rel_id(idx)
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        SLIDE_WIDTH, SLIDE_HEIGHT
    ));
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

pub(super) fn presentation_rels(deck: &Deck) -> String {
    let mut entries = vec![
        relationship("rId1", RT_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        relationship("rId2", RT_THEME, "theme/theme1.xml"),
    ];
    for idx in 0..deck.slides.len() {
        entries.push(relationship(
            &slide_rel_id(idx),
            RT_SLIDE,
            &format!("slides/slide{}.xml", idx + 1),
        ));
    }
    relationships(&entries)
}

pub(super) fn slide_master_rels() -> String {
    relationships(&[
        relationship("rId1", RT_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        relationship("rId2", RT_THEME, "../theme/theme1.xml"),
    ])
}

pub(super) fn slide_layout_rels() -> String {
    relationships(&[relationship(
        "rId1",
        RT_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml",
    )])
}

/// Relationships of one slide. The layout is rId1; the picture, if any, rId2.
pub(super) fn slide_rels(idx: usize, picture: Option<&Picture>) -> String {
    let mut entries = vec![relationship(
        "rId1",
        RT_SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml",
    )];
    if let Some(picture) = picture {
        entries.push(relationship(
            "rId2",
            RT_IMAGE,
            &format!("../media/image{}.{}", idx + 1, picture.format.extension()),
        ));
    }
    relationships(&entries)
}

const GROUP_SHAPE_PROPS: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

pub(super) fn slide(slide: &Slide) -> String {
    let mut xml = String::with_capacity(2048 + slide.title.len() + slide.body.len());
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);

    // Title placeholder
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>"#);
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p>");
    push_runs(&mut xml, &slide.title, None);
    xml.push_str("</a:p></p:txBody></p:sp>");

    // Body placeholder: one paragraph, soft breaks, no automatic bullets
    // since the text carries its own markers.
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/><a:p><a:pPr marL="0" indent="0"><a:buNone/></a:pPr>"#);
    push_runs(&mut xml, &slide.body, Some(BODY_FONT_SIZE));
    xml.push_str(&format!(r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/>"#, BODY_FONT_SIZE));
    xml.push_str("</a:p></p:txBody></p:sp>");

    if let Some(picture) = &slide.picture {
        let name = picture
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        xml.push_str("<p:pic><p:nvPicPr>");
        xml.push_str(&format!(
            r#"<p:cNvPr id="4" name="Picture 3" descr="{}"/>"#,
            xml_escape(&name)
        ));
        xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
        xml.push_str(r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#);
        xml.push_str("<p:spPr><a:xfrm>");
        xml.push_str(&format!(
            r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
            picture.placement.left,
            picture.placement.top,
            picture.placement.width,
            picture.placement.height
        ));
        xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
        xml.push_str("</p:pic>");
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

/// Line feeds and vertical tabs both end a line within the paragraph.
fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\u{0B}'
}

/// Append runs for `text`, turning each line break into a soft break.
fn push_runs(xml: &mut String, text: &str, size: Option<u32>) {
    let run_props = match size {
        Some(sz) => format!(r#"<a:rPr lang="en-US" sz="{}" dirty="0"/>"#, sz),
        None => r#"<a:rPr lang="en-US" dirty="0"/>"#.to_string(),
    };

    for (idx, line) in text.split(is_line_break).enumerate() {
        if idx > 0 {
            xml.push_str("<a:br>");
            xml.push_str(&run_props);
            xml.push_str("</a:br>");
        }
        if line.is_empty() {
            continue;
        }
        xml.push_str("<a:r>");
        xml.push_str(&run_props);
        xml.push_str("<a:t>");
        xml.push_str(&encode_run_text(line));
        xml.push_str("</a:t></a:r>");
    }
}

pub(super) fn slide_master() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#);
    xml.push_str(r#"<p:spPr><a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Text Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>"#);
    xml.push_str(r#"<p:spPr><a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    xml.push_str("<p:txStyles>");
    xml.push_str(r#"<p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#);
    xml.push_str(r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#);
    xml.push_str(r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#);
    xml.push_str("</p:txStyles>");
    xml.push_str("</p:sldMaster>");
    xml
}

pub(super) fn slide_layout() -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="obj" preserve="1">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:cSld name="Title and Content"><p:spTree>"#);
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

pub(super) fn theme() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(r#"<a:theme xmlns:a="{}" name="Office Theme">"#, NS_A));
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
        xml.push_str(&format!(r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, slot, rgb));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    for slot in ["majorFont", "minorFont"] {
        xml.push_str(&format!(
            r#"<a:{0}><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:{0}>"#,
            slot
        ));
    }
    xml.push_str("</a:fontScheme>");

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        xml.push_str(&format!(r#"<a:ln w="{}">{}</a:ln>"#, width, solid));
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("<a:objectDefaults/><a:extraClrSchemeLst/>");
    xml.push_str("</a:theme>");
    xml
}

pub(super) fn core_properties(deck: &Deck) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    if let Some(title) = deck.title() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", xml_escape(title)));
    }
    xml.push_str(&format!(
        "<cp:lastModifiedBy>{} {}</cp:lastModifiedBy>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

pub(super) fn app_properties(deck: &Deck) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    xml.push_str(&format!(
        "<Application>{}</Application>",
        env!("CARGO_PKG_NAME")
    ));
    xml.push_str(&format!("<Slides>{}</Slides>", deck.slides.len()));
    xml.push_str("</Properties>");
    xml
}
