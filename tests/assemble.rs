use pitchdeck::deck::{
    build_deck, AssembleOptions, ImageFormat, ImageIndex, IssueCode, SlideKind, SlideRecord,
};

mod common;

fn records(n: usize) -> Vec<SlideRecord> {
    (0..n)
        .map(|i| SlideRecord::new(format!("Slide {i}"), "• one\n• two", SlideKind::Bullet))
        .collect()
}

#[test]
fn existing_image_is_attached_with_aspect_height() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image_path = temp.path().join("cover.bmp");
    common::write_bmp(&image_path, 200, 100);

    let mut images = ImageIndex::new();
    images.insert(0, image_path.clone());

    let (deck, report) = build_deck(&records(2), &images, &AssembleOptions::default());
    let picture = deck.slides[0].picture.as_ref().expect("picture attached");
    assert_eq!(picture.source, image_path);
    assert_eq!(picture.format, ImageFormat::Bmp);
    assert_eq!((picture.pixel_width, picture.pixel_height), (200, 100));
    assert_eq!(picture.placement.height, picture.placement.width / 2);
    assert!(deck.slides[1].picture.is_none());
    assert_eq!(report.picture_count, 1);
    assert!(report.issues.is_empty());
}

#[test]
fn fallback_resolution_is_noted() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let actual = temp.path().join("slide_5_teacher_1769.bmp");
    common::write_bmp(&actual, 4, 3);

    let mut images = ImageIndex::new();
    images.insert(0, temp.path().join("slide_5_teacher_v2.bmp"));

    let (deck, report) = build_deck(&records(1), &images, &AssembleOptions::default());
    let picture = deck.slides[0].picture.as_ref().expect("picture attached");
    assert_eq!(picture.source, actual);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(report.issues[0].code, IssueCode::ImageFallbackUsed);
}
