//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Target size and encoding quality for a transcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscodeConfig {
    pub width: u32,
    pub quality: Quality,
}

impl TranscodeConfig {
    pub fn new(width: u32, quality: u32) -> Self {
        Self {
            width,
            quality: Quality::new(quality),
        }
    }
}

/// Plan a transcode without executing it.
pub fn plan_transcode(source: &Path, output: &Path, config: &TranscodeConfig) -> ResizeParams {
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: config.width,
        quality: config.quality,
    }
}

/// Resize `source` to the configured width and write it to `output`.
pub fn transcode<B: ImageBackend + ?Sized>(
    backend: &B,
    source: &Path,
    output: &Path,
    config: &TranscodeConfig,
) -> Result<()> {
    backend.resize(&plan_transcode(source, output, config))
}

/// How a file reached its destination in [`transcode_or_copy`].
#[derive(Debug)]
pub enum Written {
    /// The backend produced the output.
    Transcoded,
    /// The backend failed and the source bytes were copied instead.
    Copied(BackendError),
}

/// Transcode, falling back to a byte copy when the backend fails.
///
/// Returns the copy error only when both attempts failed. In that case any
/// partially written output is removed, so an `Err` always means no file
/// exists at `output`.
pub fn transcode_or_copy<B: ImageBackend + ?Sized>(
    backend: &B,
    source: &Path,
    output: &Path,
    config: &TranscodeConfig,
) -> std::io::Result<Written> {
    let transcode_err = match transcode(backend, source, output, config) {
        Ok(()) => return Ok(Written::Transcoded),
        Err(e) => e,
    };

    match std::fs::copy(source, output) {
        Ok(_) => Ok(Written::Copied(transcode_err)),
        Err(copy_err) => {
            let _ = std::fs::remove_file(output);
            Err(copy_err)
        }
    }
}
