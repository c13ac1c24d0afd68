//! Image path resolution.
//!
//! Image assets are produced by an external generation step that appends
//! timestamps (and occasionally a `_v2` variant tag) to file names, so the
//! path recorded in a manifest does not always exist verbatim. The resolver
//! tries the exact path first and then scans the containing directory for a
//! file that shares the name prefix and extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Marker for a regenerated asset variant. Everything from the marker onward
/// is dropped from the fallback prefix.
pub const VARIANT_MARKER: &str = "_v2";

/// Order in which directory entries are visited during the fallback scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Whatever order the filesystem lists entries in. Not stable across
    /// filesystems or runs.
    #[default]
    Listing,
    /// Sorted by file name, for reproducible output.
    Sorted,
}

/// Outcome of resolving one image path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedImage {
    /// The requested path exists.
    Exact(PathBuf),
    /// The requested path is missing; a similarly named file was found.
    Fallback(PathBuf),
    /// Neither the path nor a fallback candidate exists.
    NotFound,
}

impl ResolvedImage {
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            ResolvedImage::Exact(path) | ResolvedImage::Fallback(path) => Some(path),
            ResolvedImage::NotFound => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedImage::Fallback(_))
    }
}

/// Resolves manifest image paths to files on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageResolver {
    order: ScanOrder,
}

impl ImageResolver {
    pub fn new(order: ScanOrder) -> Self {
        Self { order }
    }

    /// Resolve `path`, returning the file to use or `None` if nothing fits.
    pub fn resolve(&self, path: &Path) -> Option<PathBuf> {
        self.resolve_detailed(path).into_path()
    }

    /// Resolve `path` and report which branch produced the result.
    pub fn resolve_detailed(&self, path: &Path) -> ResolvedImage {
        if path.exists() {
            tracing::debug!(path = %path.display(), "image found at exact path");
            return ResolvedImage::Exact(path.to_path_buf());
        }

        let Some(prefix) = fallback_prefix(path) else {
            return ResolvedImage::NotFound;
        };

        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let scan_dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };

        if !scan_dir.is_dir() {
            tracing::debug!(dir = %scan_dir.display(), "image directory does not exist");
            return ResolvedImage::NotFound;
        }

        let mut walker = WalkDir::new(scan_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        if self.order == ScanOrder::Sorted {
            walker = walker.sort_by_file_name();
        }

        for entry in walker.into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if is_candidate(name, prefix, path) {
                let found = parent.join(name);
                tracing::debug!(
                    requested = %path.display(),
                    found = %found.display(),
                    "image resolved by prefix scan"
                );
                return ResolvedImage::Fallback(found);
            }
        }

        ResolvedImage::NotFound
    }
}

/// Resolve `path` with the default (listing order) resolver.
pub fn resolve(path: &Path) -> Option<PathBuf> {
    ImageResolver::default().resolve(path)
}

/// Name prefix a fallback candidate must start with.
///
/// The base name is cut at its first `.`, then at the first occurrence of
/// [`VARIANT_MARKER`].
pub fn fallback_prefix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let base = name.split('.').next()?;
    Some(match base.find(VARIANT_MARKER) {
        Some(idx) => &base[..idx],
        None => base,
    })
}

fn is_candidate(name: &str, prefix: &str, requested: &Path) -> bool {
    name.starts_with(prefix) && Path::new(name).extension() == requested.extension()
}
