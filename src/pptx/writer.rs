use std::fs;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::parts;
use crate::deck::Deck;
use crate::error::PitchdeckError;

/// Write `deck` to `path` as a `.pptx` file, replacing any existing file.
pub fn write_pptx(path: &Path, deck: &Deck) -> Result<(), PitchdeckError> {
    let file = fs::File::create(path).map_err(|source| PitchdeckError::PptxWrite {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let writer = write_package(BufWriter::new(file), deck).map_err(|source| {
        PitchdeckError::PptxWrite {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    })?;

    writer
        .into_inner()
        .map_err(|source| PitchdeckError::PptxWrite {
            path: path.to_path_buf(),
            message: source.error().to_string(),
        })?
        .sync_all()
        .map_err(|source| PitchdeckError::PptxWrite {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
}

/// Write the presentation package for `deck` into `writer`.
pub fn write_package<W: Write + Seek>(writer: W, deck: &Deck) -> zip::result::ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let xml_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    // Images are already compressed.
    let media_options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let package_parts = [
        ("[Content_Types].xml", parts::content_types(deck)),
        ("_rels/.rels", parts::package_rels()),
        ("docProps/core.xml", parts::core_properties(deck)),
        ("docProps/app.xml", parts::app_properties(deck)),
        ("ppt/presentation.xml", parts::presentation(deck)),
        ("ppt/_rels/presentation.xml.rels", parts::presentation_rels(deck)),
        ("ppt/slideMasters/slideMaster1.xml", parts::slide_master()),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            parts::slide_master_rels(),
        ),
        ("ppt/slideLayouts/slideLayout1.xml", parts::slide_layout()),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            parts::slide_layout_rels(),
        ),
        ("ppt/theme/theme1.xml", parts::theme()),
    ];
    for (name, body) in &package_parts {
        put_part(&mut zip, name, body, xml_options)?;
    }

    for (idx, slide) in deck.slides.iter().enumerate() {
        put_part(
            &mut zip,
            &parts::slide_part_name(idx),
            &parts::slide(slide),
            xml_options,
        )?;
        put_part(
            &mut zip,
            &parts::slide_rels_part_name(idx),
            &parts::slide_rels(idx, slide.picture.as_ref()),
            xml_options,
        )?;

        if let Some(picture) = &slide.picture {
            zip.start_file(parts::media_part_name(idx, picture.format), media_options)?;
            zip.write_all(&picture.data)?;
        }
    }

    zip.finish()
}

fn put_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    body: &str,
    options: SimpleFileOptions,
) -> zip::result::ZipResult<()> {
    zip.start_file(name, options)?;
    zip.write_all(body.as_bytes())?;
    Ok(())
}
