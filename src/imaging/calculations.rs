//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions of an image scaled to fit inside a square
/// bounding box of `bound` pixels.
///
/// The longer edge becomes exactly `bound` and the shorter edge is scaled by
/// the same ratio (rounded, never below 1px). Images that already fit are
/// returned unchanged — this never upscales.
///
/// # Arguments
/// * `original` - Source dimensions (width, height)
/// * `bound` - Maximum allowed length of the longer edge
///
/// # Returns
/// * `(width, height)` - Dimensions with `max(width, height) <= bound`
///
/// # Examples
/// ```
/// # use webpify::imaging::fit_within;
/// // 1200x1200 square into a 600px box → 600x600
/// assert_eq!(fit_within((1200, 1200), 600), (600, 600));
///
/// // Already small enough → untouched
/// assert_eq!(fit_within((400, 300), 600), (400, 300));
/// ```
pub fn fit_within(original: (u32, u32), bound: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let longer_edge = orig_w.max(orig_h);

    if longer_edge <= bound {
        return original;
    }

    let ratio = bound as f64 / longer_edge as f64;
    let scale = |edge: u32| ((edge as f64 * ratio).round() as u32).clamp(1, bound);

    if orig_w >= orig_h {
        // Landscape or square
        (bound, scale(orig_h))
    } else {
        // Portrait
        (scale(orig_w), bound)
    }
}

/// Percentage by which `new_bytes` is smaller than `orig_bytes`.
///
/// `(1 - new/orig) * 100`. Negative when the output grew. A zero-byte
/// original reports 0.
pub fn reduction_percent(orig_bytes: u64, new_bytes: u64) -> f64 {
    if orig_bytes == 0 {
        return 0.0;
    }
    (1.0 - new_bytes as f64 / orig_bytes as f64) * 100.0
}
