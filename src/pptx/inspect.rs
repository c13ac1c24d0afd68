use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{Read, Seek};
use std::path::Path;

use roxmltree::{Document, Node};
use serde::Serialize;
use zip::ZipArchive;

use super::parts::{NS_A, NS_P, NS_R};
use super::text::decode_run_text;
use crate::error::PitchdeckError;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Text and picture summary of a presentation file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PresentationSummary {
    pub slides: Vec<SlideSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    pub title: String,
    pub body: String,
    pub pictures: usize,
}

impl PresentationSummary {
    pub fn picture_count(&self) -> usize {
        self.slides.iter().map(|slide| slide.pictures).sum()
    }
}

impl fmt::Display for PresentationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} slides, {} pictures",
            self.slides.len(),
            self.picture_count()
        )?;
        for (idx, slide) in self.slides.iter().enumerate() {
            let marker = if slide.pictures > 0 { " [picture]" } else { "" };
            writeln!(f, "  {:>3}. {}{}", idx + 1, slide.title, marker)?;
        }
        Ok(())
    }
}

/// Read a `.pptx` file and summarize its slides in presentation order.
pub fn read_pptx(path: &Path) -> Result<PresentationSummary, PitchdeckError> {
    let file = fs::File::open(path).map_err(|source| read_error(path, source))?;
    let mut archive = ZipArchive::new(file).map_err(|source| read_error(path, source))?;

    let presentation = read_part(&mut archive, PRESENTATION_PART, path)?;
    let rels = read_part(&mut archive, PRESENTATION_RELS_PART, path)?;

    let targets = parse_relationship_targets(&rels).map_err(|source| read_error(path, source))?;
    let slide_rel_ids =
        parse_slide_rel_ids(&presentation).map_err(|source| read_error(path, source))?;

    let mut slides = Vec::with_capacity(slide_rel_ids.len());
    for rel_id in slide_rel_ids {
        let target = targets.get(&rel_id).ok_or_else(|| PitchdeckError::PptxRead {
            path: path.to_path_buf(),
            message: format!("slide relationship {} has no target", rel_id),
        })?;
        let part_name = part_name_from_target(target);
        let slide_xml = read_part(&mut archive, &part_name, path)?;
        slides.push(parse_slide(&slide_xml).map_err(|source| read_error(path, source))?);
    }

    Ok(PresentationSummary { slides })
}

fn read_error(path: &Path, source: impl fmt::Display) -> PitchdeckError {
    PitchdeckError::PptxRead {
        path: path.to_path_buf(),
        message: source.to_string(),
    }
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    path: &Path,
) -> Result<String, PitchdeckError> {
    let mut entry = archive.by_name(name).map_err(|source| PitchdeckError::PptxRead {
        path: path.to_path_buf(),
        message: format!("{}: {}", name, source),
    })?;
    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|source| PitchdeckError::PptxRead {
            path: path.to_path_buf(),
            message: format!("{}: {}", name, source),
        })?;
    Ok(text)
}

/// Relationship targets in `ppt/_rels/presentation.xml.rels` are relative to
/// `ppt/`, or package-absolute when they start with `/`.
fn part_name_from_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

fn parse_relationship_targets(xml: &str) -> Result<HashMap<String, String>, roxmltree::Error> {
    let doc = Document::parse(xml)?;
    Ok(doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "Relationship")
        .filter_map(|node| {
            let id = node.attribute("Id")?;
            let target = node.attribute("Target")?;
            Some((id.to_string(), target.to_string()))
        })
        .collect())
}

fn parse_slide_rel_ids(xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = Document::parse(xml)?;
    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name((NS_P, "sldId")))
        .filter_map(|node| node.attribute((NS_R, "id")).map(str::to_string))
        .collect())
}

fn parse_slide(xml: &str) -> Result<SlideSummary, roxmltree::Error> {
    let doc = Document::parse(xml)?;
    let mut summary = SlideSummary::default();

    for shape in doc.descendants().filter(|node| node.has_tag_name((NS_P, "sp"))) {
        let Some(placeholder) = shape
            .descendants()
            .find(|node| node.has_tag_name((NS_P, "ph")))
        else {
            continue;
        };

        match (placeholder.attribute("type"), placeholder.attribute("idx")) {
            (Some("title") | Some("ctrTitle"), _) => summary.title = shape_text(shape),
            (Some("body") | None, Some("1")) => summary.body = shape_text(shape),
            _ => {}
        }
    }

    summary.pictures = doc
        .descendants()
        .filter(|node| node.has_tag_name((NS_P, "pic")))
        .count();

    Ok(summary)
}

/// Text of a shape: paragraphs joined by `\n`, soft breaks as `\n`.
fn shape_text(shape: Node<'_, '_>) -> String {
    let paragraphs: Vec<String> = shape
        .descendants()
        .filter(|node| node.has_tag_name((NS_A, "p")))
        .map(|paragraph| {
            let mut text = String::new();
            for child in paragraph.children() {
                if child.has_tag_name((NS_A, "r")) {
                    for run_text in child
                        .children()
                        .filter(|node| node.has_tag_name((NS_A, "t")))
                        .filter_map(|node| node.text())
                    {
                        text.push_str(&decode_run_text(run_text));
                    }
                } else if child.has_tag_name((NS_A, "br")) {
                    text.push('\n');
                }
            }
            text
        })
        .collect();
    paragraphs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_resolve_relative_to_ppt() {
        assert_eq!(part_name_from_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(
            part_name_from_target("/ppt/slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
    }

    #[test]
    fn parse_slide_reads_placeholders_and_breaks() {
        let xml = format!(
            r#"<p:sld xmlns:a="{a}" xmlns:p="{p}" xmlns:r="{r}"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
<p:txBody><a:p><a:r><a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
<p:txBody><a:p><a:r><a:t>one</a:t></a:r><a:br/><a:br/><a:r><a:t>two_x0007_</a:t></a:r></a:p></p:txBody></p:sp>
<p:pic/>
</p:spTree></p:cSld></p:sld>"#,
            a = NS_A,
            p = NS_P,
            r = NS_R
        );

        let summary = parse_slide(&xml).expect("parse slide");
        assert_eq!(summary.title, "Hello");
        assert_eq!(summary.body, "one\n\ntwo\u{7}");
        assert_eq!(summary.pictures, 1);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let missing = temp.path().join("absent.pptx");

        match read_pptx(&missing) {
            Err(PitchdeckError::PptxRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected PptxRead, got {other:?}"),
        }
    }
}
