use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// English Metric Units per inch, the unit of all DrawingML coordinates.
pub const EMU_PER_INCH: i64 = 914_400;

/// Mapping from slide position (0-based) to the expected image path.
pub type ImageIndex = BTreeMap<usize, PathBuf>;

/// The role a slide plays in the deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Opening slide.
    Title,
    /// Regular content slide.
    #[default]
    Bullet,
}

impl SlideKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Bullet => "bullet",
        }
    }
}

/// Text content for one slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideRecord {
    pub title: String,
    /// Body text, taken verbatim. Line breaks and bullet glyphs are literal.
    pub content: String,
    #[serde(default)]
    pub kind: SlideKind,
}

impl SlideRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: SlideKind) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
        }
    }
}

/// An assembled presentation.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Title of the first slide, used as the document title.
    pub fn title(&self) -> Option<&str> {
        self.slides.first().map(|slide| slide.title.as_str())
    }

    pub fn picture_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|slide| slide.picture.is_some())
            .count()
    }
}

/// One slide of an assembled deck.
#[derive(Clone, Debug)]
pub struct Slide {
    pub title: String,
    pub body: String,
    pub kind: SlideKind,
    pub picture: Option<Picture>,
}

impl Slide {
    pub fn from_record(record: &SlideRecord) -> Self {
        Self {
            title: record.title.clone(),
            body: record.content.clone(),
            kind: record.kind,
            picture: None,
        }
    }
}

/// An image embedded in a slide.
#[derive(Clone, Debug)]
pub struct Picture {
    /// File the image was loaded from.
    pub source: PathBuf,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub placement: Placement,
}

/// Raster formats that can be embedded in a presentation package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn from_image_type(image_type: imagesize::ImageType) -> Option<Self> {
        match image_type {
            imagesize::ImageType::Png => Some(ImageFormat::Png),
            imagesize::ImageType::Jpeg => Some(ImageFormat::Jpeg),
            imagesize::ImageType::Gif => Some(ImageFormat::Gif),
            imagesize::ImageType::Bmp => Some(ImageFormat::Bmp),
            imagesize::ImageType::Tiff => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Extension used for the media part name.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

/// Absolute position and size of a shape, in EMU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Fixed picture frame: offset and width are given, height follows the
/// image's aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PictureFrame {
    pub left: i64,
    pub top: i64,
    pub width: i64,
}

impl Default for PictureFrame {
    /// Right-hand side of a 10in x 7.5in slide: 5.5in from the left, 2in from
    /// the top, 4in wide.
    fn default() -> Self {
        Self {
            left: EMU_PER_INCH * 11 / 2,
            top: EMU_PER_INCH * 2,
            width: EMU_PER_INCH * 4,
        }
    }
}

impl PictureFrame {
    /// Place an image of the given pixel size. Returns `None` for a zero
    /// width, where no aspect ratio exists.
    pub fn fit(&self, pixel_width: u32, pixel_height: u32) -> Option<Placement> {
        if pixel_width == 0 {
            return None;
        }
        let height = self.width as i128 * pixel_height as i128 / pixel_width as i128;
        Some(Placement {
            left: self.left,
            top: self.top,
            width: self.width,
            height: i64::try_from(height).ok()?,
        })
    }
}
