//! Slide deck model and assembly.
//!
//! A deck is built from two inputs:
//!
//! - an ordered list of [`SlideRecord`]s, one per output slide, and
//! - an [`ImageIndex`] mapping slide positions to image files.
//!
//! Image attachment is best-effort: a missing or unreadable image is recorded
//! in the [`AssemblyReport`] and the slide is produced without a picture.
//!
//! # Example
//!
//! ```
//! use pitchdeck::deck::{build_deck, AssembleOptions, ImageIndex, SlideKind, SlideRecord};
//!
//! let records = vec![SlideRecord::new("Welcome", "Hello", SlideKind::Title)];
//! let (deck, report) = build_deck(&records, &ImageIndex::new(), &AssembleOptions::default());
//! assert_eq!(deck.slides.len(), 1);
//! assert!(report.issues.is_empty());
//! ```

mod assemble;
pub mod manifest;
mod model;
mod report;

pub use assemble::{build_and_save, build_deck, load_picture, AssembleOptions};
pub use manifest::Manifest;
pub use model::{
    Deck, ImageFormat, ImageIndex, Picture, PictureFrame, Placement, Slide, SlideKind,
    SlideRecord, EMU_PER_INCH,
};
pub use report::{AssemblyIssue, AssemblyReport, IssueCode, Severity};
