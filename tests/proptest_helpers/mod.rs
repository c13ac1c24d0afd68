#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pitchdeck::deck::{ImageIndex, SlideKind, SlideRecord};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// One line of slide text: printable characters, XML metacharacters, bullet
/// glyphs, control characters other than `\n`, and `_xHHHH_` look-alikes.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9 .,:;!?'\"&<>()•çãéí_\\t\\r\\x00-\\x08\\x0B\\x0C\\x0E-\\x1F\\x7F\\x{FFFE}-]{0,24}",
        1 => "[a-z ]{0,6}_x[0-9A-F]{4}_[a-z ]{0,6}",
    ]
}

/// Text as it reads back from a written deck: vertical tabs come back as
/// line feeds.
pub fn read_back_text(written: &str) -> String {
    written.replace('\u{0B}', "\n")
}

fn arb_text(max_lines: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 1..=max_lines).prop_map(|lines| lines.join("\n"))
}

pub fn arb_record() -> impl Strategy<Value = SlideRecord> {
    (
        arb_line(),
        arb_text(6),
        prop_oneof![Just(SlideKind::Title), Just(SlideKind::Bullet)],
    )
        .prop_map(|(title, content, kind)| SlideRecord::new(title, content, kind))
}

pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<SlideRecord>> {
    prop::collection::vec(arb_record(), 1..=max)
}

/// What to place on disk for an image index entry.
#[derive(Clone, Copy, Debug)]
pub enum ImagePlan {
    /// Exact file present.
    Exact { width: u32, height: u32 },
    /// Only a timestamped variant present.
    Variant { width: u32, height: u32 },
    /// Nothing on disk.
    Missing,
    /// A file that is not an image.
    Garbage,
}

pub fn arb_image_plan() -> impl Strategy<Value = ImagePlan> {
    prop_oneof![
        (1u32..64, 1u32..64).prop_map(|(width, height)| ImagePlan::Exact { width, height }),
        (1u32..64, 1u32..64).prop_map(|(width, height)| ImagePlan::Variant { width, height }),
        Just(ImagePlan::Missing),
        Just(ImagePlan::Garbage),
    ]
}

/// Optional image plan per slide position, up to `max` positions.
pub fn arb_plans(max: usize) -> impl Strategy<Value = Vec<Option<ImagePlan>>> {
    prop::collection::vec(prop::option::of(arb_image_plan()), 0..=max)
}

/// Materialize `plans` under `dir` and return the matching image index.
pub fn materialize(dir: &Path, plans: &[Option<ImagePlan>]) -> ImageIndex {
    let mut index = ImageIndex::new();
    for (idx, plan) in plans.iter().enumerate() {
        let Some(plan) = plan else { continue };
        let requested: PathBuf = match plan {
            ImagePlan::Exact { width, height } => {
                let path = dir.join(format!("slide_{idx}_exact.png"));
                crate::common::write_png(&path, *width, *height);
                path
            }
            ImagePlan::Variant { width, height } => {
                crate::common::write_png(
                    &dir.join(format!("slide_{idx}_variant_1769953000000.png")),
                    *width,
                    *height,
                );
                dir.join(format!("slide_{idx}_variant_v2.png"))
            }
            ImagePlan::Missing => dir.join(format!("slide_{idx}_missing.png")),
            ImagePlan::Garbage => {
                let path = dir.join(format!("slide_{idx}_garbage.png"));
                crate::common::write_bytes(&path, b"garbage");
                path
            }
        };
        index.insert(idx, requested);
    }
    index
}

pub fn expects_picture(plan: Option<&Option<ImagePlan>>) -> bool {
    matches!(
        plan,
        Some(Some(ImagePlan::Exact { .. })) | Some(Some(ImagePlan::Variant { .. }))
    )
}
