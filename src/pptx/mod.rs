//! PowerPoint (`.pptx`) package writer and reader.
//!
//! The writer emits a self-contained PresentationML package: one slide
//! master, one "Title and Content" layout, one theme, and one slide part per
//! deck slide. Pictures are stored under `ppt/media/`.
//!
//! The reader only understands what a presentation needs to be summarized:
//! slide order, title and body text, and whether a slide has a picture.

mod inspect;
mod parts;
mod text;
mod writer;

pub use inspect::{read_pptx, PresentationSummary, SlideSummary};
pub use writer::{write_package, write_pptx};
