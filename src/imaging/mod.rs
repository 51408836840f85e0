//! Image processing: resize and re-encode on the `image` crate, no system tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Transcode** | Lanczos3 resize + re-encode in the output's format |
//! | **Fallback** | `std::fs::copy` when the backend rejects a file |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::calculate_resize_dimensions;
pub use operations::{TranscodeConfig, Written, transcode, transcode_or_copy};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
