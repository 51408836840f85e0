//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the one operation the tool needs from
//! an image library: resize and re-encode. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): pure Rust, statically
//! linked, no system libraries.

use super::params::ResizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported input format: {0}")]
    Unsupported(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` because the mirror calls the backend from rayon workers.
pub trait ImageBackend: Sync {
    /// Resize to the requested width and re-encode in the output's format.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::sync::Mutex;

    /// Mock backend that records operations instead of decoding pixels.
    ///
    /// Resizes whose source file name contains `fail_marker` fail; all other
    /// resizes copy the source bytes to the output so callers see a file on
    /// disk. Uses Mutex (not RefCell) so it is Sync and works with rayon.
    #[derive(Default)]
    pub struct MockBackend {
        pub fail_marker: Option<String>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Resize {
            source: String,
            output: String,
            width: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every resize whose source file name contains `marker`.
        pub fn failing_on(marker: &str) -> Self {
            Self {
                fail_marker: Some(marker.to_string()),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                quality: params.quality.value(),
            });

            let file_name = params
                .source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if let Some(marker) = &self.fail_marker
                && file_name.contains(marker.as_str())
            {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock failure for {}",
                    file_name
                )));
            }
            std::fs::copy(&params.source, &params.output)?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_resize() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("a.jpg");
        std::fs::write(&source, "bytes").unwrap();

        let backend = MockBackend::new();
        backend
            .resize(&ResizeParams {
                source,
                output: tmp.path().join("b.jpg"),
                width: 700,
                quality: Quality::new(80),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 700,
                quality: 80,
                ..
            }
        ));
        assert!(tmp.path().join("b.jpg").exists());
    }

    #[test]
    fn mock_fails_on_marker() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, "bytes").unwrap();

        let backend = MockBackend::failing_on("broken");
        let result = backend.resize(&ResizeParams {
            source,
            output: tmp.path().join("out.jpg"),
            width: 100,
            quality: Quality::default(),
        });
        assert!(result.is_err());
        assert!(!tmp.path().join("out.jpg").exists());
    }
}
