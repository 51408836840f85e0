//! Gallery thumbnails.
//!
//! Every image shown on the gallery page gets a small copy under
//! `<dest>/<thumbs_dir>/`, mirroring its path in the output tree:
//!
//! ```text
//! photos.web/2020_Trip/beach.jpg  →  photos.web/thumbs/2020_Trip/beach.jpg
//! ```
//!
//! Thumbnails are made from the already transcoded output, so this step
//! works just as well on a rebuilt manifest. A thumbnail the backend cannot
//! produce falls back to a copy of the full image; a thumbnail that cannot be
//! written at all is reported but does not stop the gallery.

use crate::config::SiteConfig;
use crate::gallery::is_image;
use crate::imaging::{ImageBackend, TranscodeConfig, Written, transcode_or_copy};
use crate::types::{Manifest, Outcome};
use rayon::prelude::*;
use std::path::Path;

/// What happened to one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbResult {
    /// Image path relative to the output root.
    pub path: String,
    pub outcome: Outcome,
}

/// Create thumbnails for every image entry of `manifest`.
///
/// Results are returned in manifest order.
pub fn create_thumbnails<B: ImageBackend + ?Sized>(
    manifest: &Manifest,
    dest_root: &Path,
    config: &SiteConfig,
    backend: &B,
) -> Vec<ThumbResult> {
    let thumbs_root = dest_root.join(&config.gallery.thumbs_dir);
    let params = TranscodeConfig::new(config.thumb_width, config.thumb_quality);

    let images: Vec<(String, _)> = manifest
        .files()
        .into_iter()
        .filter(|(_, file)| is_image(file, config))
        .collect();

    images
        .par_iter()
        .map(|(path, _)| {
            let source = dest_root.join(path);
            let output = thumbs_root.join(path);
            let outcome = match create_one(backend, &source, &output, &params) {
                Ok(Written::Transcoded) => Outcome::Ok,
                Ok(Written::Copied(err)) => Outcome::Warn(err.to_string()),
                Err(err) => Outcome::Fail(err.to_string()),
            };
            ThumbResult {
                path: path.clone(),
                outcome,
            }
        })
        .collect()
}

fn create_one<B: ImageBackend + ?Sized>(
    backend: &B,
    source: &Path,
    output: &Path,
    params: &TranscodeConfig,
) -> std::io::Result<Written> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    transcode_or_copy(backend, source, output, params)
}
