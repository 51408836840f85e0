//! Per-file transforms applied by the [`mirror`](crate::mirror).
//!
//! The mirror only knows how to walk directories. What happens to each file
//! is decided by a [`LeafTransform`]:
//!
//! - [`TranscodeLeaf`]: used by `prepare`. Resizes images through an
//!   [`ImageBackend`], copies anything the backend rejects, and records the
//!   outcome in the returned [`FileEntry`].
//! - [`PassthroughLeaf`]: used when rebuilding a manifest from an existing
//!   output tree. Records the name and touches nothing.
//!
//! A transform never fails: problems are data in the manifest
//! ([`Outcome::Warn`] / [`Outcome::Fail`]), not errors that stop the walk.

use crate::imaging::{ImageBackend, TranscodeConfig, Written, transcode_or_copy};
use crate::naming::{sanitize, split_name};
use crate::types::{FileEntry, Outcome};
use std::path::Path;

/// Capability handed to the mirror: turn one source file into a manifest
/// entry, writing whatever output it needs into `dest_dir`.
///
/// `source` is the file as listed; `file` is its name as a label, which may
/// be a lossy rendering of a non-UTF-8 name.
///
/// `Sync` because siblings are transformed on rayon workers.
pub trait LeafTransform: Sync {
    fn transform_leaf(&self, source: &Path, file: &str, dest_dir: &Path) -> FileEntry;
}

/// Transcode to the configured width, falling back to a raw copy.
pub struct TranscodeLeaf<'a, B: ImageBackend + ?Sized> {
    backend: &'a B,
    config: TranscodeConfig,
}

impl<'a, B: ImageBackend + ?Sized> TranscodeLeaf<'a, B> {
    pub fn new(backend: &'a B, config: TranscodeConfig) -> Self {
        Self { backend, config }
    }
}

impl<B: ImageBackend + ?Sized> LeafTransform for TranscodeLeaf<'_, B> {
    fn transform_leaf(&self, source: &Path, file: &str, dest_dir: &Path) -> FileEntry {
        let sanitized = sanitize(file);
        let (name, ext) = split_name(file);
        let dest = dest_dir.join(&sanitized);

        let (file, outcome) = match transcode_or_copy(self.backend, source, &dest, &self.config) {
            Ok(Written::Transcoded) => (sanitized, Outcome::Ok),
            Ok(Written::Copied(err)) => (sanitized, Outcome::Warn(err.to_string())),
            Err(err) => (String::new(), Outcome::Fail(err.to_string())),
        };

        FileEntry {
            file,
            name: Some(name),
            ext,
            outcome: Some(outcome),
        }
    }
}

/// Record the file name as found. Used on trees that are already sanitized.
pub struct PassthroughLeaf;

impl LeafTransform for PassthroughLeaf {
    fn transform_leaf(&self, _source: &Path, file: &str, _dest_dir: &Path) -> FileEntry {
        FileEntry {
            file: file.to_string(),
            name: None,
            ext: None,
            outcome: None,
        }
    }
}
