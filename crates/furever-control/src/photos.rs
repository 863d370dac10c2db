// crates/furever-control/src/photos.rs
// ============================================================================
// Module: Photo Storage
// Description: Directory-backed photo storage and display resolution.
// Purpose: Keep photo bytes on disk while the store holds references.
// Dependencies: furever-core
// ============================================================================

//! ## Overview
//! Photos live as files under one images directory; the store only keeps
//! reference strings. Storing copies the source file in and returns its file
//! name. Resolution walks the stored reference, then the legacy image field,
//! then a filename guess derived from the pet's name, so databases written
//! before references were recorded still render their photos.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use furever_core::PhotoError;
use furever_core::PhotoStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Extensions tried when guessing a photo file from a pet name.
const GUESS_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

// ============================================================================
// SECTION: Directory Photo Store
// ============================================================================

/// Photo store over one images directory.
#[derive(Debug, Clone)]
pub struct DirPhotoStore {
    /// Directory holding managed photo files.
    images_dir: PathBuf,
}

impl DirPhotoStore {
    /// Creates a photo store over the given images directory.
    #[must_use]
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// Maps a reference to its on-disk location.
    ///
    /// Absolute references are used as-is; relative ones live under the
    /// images directory.
    fn reference_path(&self, reference: &str) -> PathBuf {
        let candidate = Path::new(reference);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.images_dir.join(reference)
        }
    }
}

impl PhotoStore for DirPhotoStore {
    fn store(&self, source: &Path) -> Result<String, PhotoError> {
        if !source.is_file() {
            return Err(PhotoError::Invalid(format!(
                "photo source is not a readable file: {}",
                source.display()
            )));
        }
        let Some(file_name) = source.file_name().and_then(|name| name.to_str()) else {
            return Err(PhotoError::Invalid(format!(
                "photo source has no usable file name: {}",
                source.display()
            )));
        };
        fs::create_dir_all(&self.images_dir).map_err(|err| PhotoError::Io(err.to_string()))?;
        let destination = self.images_dir.join(file_name);
        // A failed copy degrades to keeping the original path as the
        // reference so the record still points at a real file.
        match fs::copy(source, &destination) {
            Ok(_) => Ok(file_name.to_string()),
            Err(_) => Ok(source.to_string_lossy().into_owned()),
        }
    }

    fn remove(&self, reference: &str) {
        if reference.trim().is_empty() {
            return;
        }
        let _ = fs::remove_file(self.reference_path(reference));
    }

    fn resolve(&self, stored: Option<&str>, legacy: Option<&str>, name: &str) -> Option<PathBuf> {
        for reference in [stored, legacy].into_iter().flatten() {
            if reference.trim().is_empty() {
                continue;
            }
            let path = self.reference_path(reference);
            if path.is_file() {
                return Some(path);
            }
        }
        let base = name.trim().to_lowercase().replace(' ', "_");
        if base.is_empty() {
            return None;
        }
        GUESS_EXTENSIONS
            .iter()
            .map(|ext| self.images_dir.join(format!("{base}.{ext}")))
            .find(|path| path.is_file())
    }
}
