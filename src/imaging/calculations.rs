//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output size for a width-bound resize.
///
/// The target width is capped at the source width (images are never
/// upscaled) and the height keeps the source aspect ratio, rounded and at
/// least one pixel.
///
/// # Examples
/// ```
/// # use gallerytool::imaging::calculate_resize_dimensions;
/// // 4000x3000 at width 700 → 700x525
/// assert_eq!(calculate_resize_dimensions((4000, 3000), 700), (700, 525));
///
/// // Smaller than the target: original size
/// assert_eq!(calculate_resize_dimensions((320, 240), 700), (320, 240));
/// ```
pub fn calculate_resize_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }

    let width = target_width.min(src_w).max(1);
    let height = (width as f64 * src_h as f64 / src_w as f64).round() as u32;
    (width, height.max(1))
}
