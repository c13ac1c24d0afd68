use std::fs;
use std::path::Path;

use super::model::{Deck, ImageFormat, ImageIndex, Picture, PictureFrame, Slide, SlideRecord};
use super::report::{AssemblyIssue, AssemblyReport, IssueCode};
use crate::error::PitchdeckError;
use crate::pptx;
use crate::resolve::{ImageResolver, ResolvedImage};

/// Options for deck assembly.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssembleOptions {
    pub resolver: ImageResolver,
    pub frame: PictureFrame,
}

/// Build a deck with one slide per record, in record order.
///
/// Image problems are recorded in the returned report and never abort the
/// build: the affected slide is produced without a picture.
pub fn build_deck(
    records: &[SlideRecord],
    images: &ImageIndex,
    options: &AssembleOptions,
) -> (Deck, AssemblyReport) {
    let mut report = AssemblyReport::new();
    let mut slides = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let mut slide = Slide::from_record(record);

        if let Some(requested) = images.get(&idx) {
            let resolved = match options.resolver.resolve_detailed(requested) {
                ResolvedImage::Exact(path) => Some(path),
                ResolvedImage::Fallback(path) => {
                    report.add(AssemblyIssue::info(
                        IssueCode::ImageFallbackUsed,
                        idx,
                        format!(
                            "{} not found, using {}",
                            requested.display(),
                            path.display()
                        ),
                    ));
                    Some(path)
                }
                ResolvedImage::NotFound => {
                    tracing::warn!(
                        "Image for slide {} not found: {}",
                        idx,
                        requested.display()
                    );
                    report.add(AssemblyIssue::warning(
                        IssueCode::ImageMissing,
                        idx,
                        format!("image not found: {}", requested.display()),
                    ));
                    None
                }
            };

            if let Some(path) = resolved {
                match load_picture(&path, &options.frame) {
                    Ok(picture) => slide.picture = Some(picture),
                    Err(reason) => {
                        tracing::warn!("Error adding image {}: {}", path.display(), reason);
                        report.add(AssemblyIssue::warning(
                            IssueCode::ImageAttachFailed,
                            idx,
                            format!("could not attach {}: {}", path.display(), reason),
                        ));
                    }
                }
            }
        }

        slides.push(slide);
    }

    for (&idx, path) in images.range(records.len()..) {
        report.add(AssemblyIssue::info(
            IssueCode::ImageIndexOutOfRange,
            idx,
            format!(
                "image {} ignored: deck has only {} slides",
                path.display(),
                records.len()
            ),
        ));
    }

    let deck = Deck { slides };
    report.slide_count = deck.slides.len();
    report.picture_count = deck.picture_count();
    (deck, report)
}

/// Load an image file and place it in `frame`.
///
/// The error is a human-readable reason, reported per slide.
pub fn load_picture(path: &Path, frame: &PictureFrame) -> Result<Picture, String> {
    let data = fs::read(path).map_err(|source| source.to_string())?;

    let image_type = imagesize::image_type(&data).map_err(|source| source.to_string())?;
    let format = ImageFormat::from_image_type(image_type)
        .ok_or_else(|| format!("unsupported image format {:?}", image_type))?;

    let size = imagesize::blob_size(&data).map_err(|source| source.to_string())?;
    let pixel_width = u32::try_from(size.width).map_err(|_| "image too wide".to_string())?;
    let pixel_height = u32::try_from(size.height).map_err(|_| "image too tall".to_string())?;

    let placement = frame
        .fit(pixel_width, pixel_height)
        .ok_or_else(|| format!("invalid dimensions {}x{}", pixel_width, pixel_height))?;

    Ok(Picture {
        source: path.to_path_buf(),
        data,
        format,
        pixel_width,
        pixel_height,
        placement,
    })
}

/// Build a deck and write it to `output_path`, replacing any existing file.
pub fn build_and_save(
    records: &[SlideRecord],
    images: &ImageIndex,
    output_path: &Path,
    options: &AssembleOptions,
) -> Result<AssemblyReport, PitchdeckError> {
    let (deck, report) = build_deck(records, images, options);
    pptx::write_pptx(output_path, &deck)?;
    tracing::info!(
        path = %output_path.display(),
        slides = report.slide_count,
        pictures = report.picture_count,
        "presentation written"
    );
    Ok(report)
}
