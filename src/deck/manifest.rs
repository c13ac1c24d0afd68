//! Deck manifests: slide records, image index and output path as data.
//!
//! Manifests are YAML or JSON, chosen by file extension:
//!
//! ```yaml
//! output: presentation.pptx
//! assets_dir: assets
//! slides:
//!   - title: "Welcome"
//!     content: "Hello"
//!     kind: title
//! images:
//!   0: cover.png
//! ```
//!
//! Relative image paths are joined onto `assets_dir`, which is itself
//! relative to the directory containing the manifest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::model::{ImageIndex, SlideRecord};
use crate::error::PitchdeckError;

/// Output file used when neither the manifest nor the CLI names one.
pub const DEFAULT_OUTPUT: &str = "presentation_baseteen.pptx";

const BUILTIN_MANIFEST: &str = include_str!("../../decks/baseteen.yaml");
const BUILTIN_NAME: &str = "<builtin:baseteen.yaml>";

/// A deck definition loaded from configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    pub slides: Vec<SlideRecord>,
    #[serde(default)]
    pub images: ImageIndex,
    /// Directory relative asset paths are anchored to.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Manifest {
    /// Load a manifest file.
    pub fn from_path(path: &Path) -> Result<Self, PitchdeckError> {
        let raw = fs::read_to_string(path).map_err(|source| PitchdeckError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let mut manifest = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw, path)?,
            Some("json") => Self::from_json_str(&raw, path)?,
            _ => {
                return Err(PitchdeckError::UnsupportedManifestFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(manifest)
    }

    /// The embedded product pitch deck.
    pub fn builtin() -> Result<Self, PitchdeckError> {
        Self::from_yaml_str(BUILTIN_MANIFEST, Path::new(BUILTIN_NAME))
    }

    /// Parse YAML manifest text. `origin` is only used in error messages.
    pub fn from_yaml_str(raw: &str, origin: &Path) -> Result<Self, PitchdeckError> {
        let manifest: Manifest =
            serde_yaml::from_str(raw).map_err(|source| PitchdeckError::ManifestParse {
                path: origin.to_path_buf(),
                message: source.to_string(),
            })?;
        manifest.checked(origin)
    }

    /// Parse JSON manifest text. `origin` is only used in error messages.
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, PitchdeckError> {
        let manifest: Manifest =
            serde_json::from_str(raw).map_err(|source| PitchdeckError::ManifestParse {
                path: origin.to_path_buf(),
                message: source.to_string(),
            })?;
        manifest.checked(origin)
    }

    fn checked(self, origin: &Path) -> Result<Self, PitchdeckError> {
        if self.slides.is_empty() {
            return Err(PitchdeckError::EmptyDeck {
                path: origin.to_path_buf(),
            });
        }
        Ok(self)
    }

    /// Replace the asset directory. The new directory is taken relative to
    /// the working directory, not the manifest.
    pub fn override_assets_dir(&mut self, dir: PathBuf) {
        self.assets_dir = Some(dir);
        self.base_dir = PathBuf::new();
    }

    /// Directory relative image paths are joined onto.
    pub fn assets_root(&self) -> PathBuf {
        match &self.assets_dir {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }

    /// Image index with every relative path anchored at [`Self::assets_root`].
    pub fn image_paths(&self) -> ImageIndex {
        let root = self.assets_root();
        self.images
            .iter()
            .map(|(&idx, path)| {
                let full = if path.is_absolute() {
                    path.clone()
                } else {
                    root.join(path)
                };
                (idx, full)
            })
            .collect()
    }

    /// Output path from the manifest, or [`DEFAULT_OUTPUT`].
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
