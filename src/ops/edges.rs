// ============================================================================
// EDGE DETECTION — Canny dual-threshold edge maps
// ============================================================================

use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;

/// Lowest accepted hysteresis threshold.
pub const THRESHOLD_MIN: i64 = 0;
/// Highest accepted hysteresis threshold.
pub const THRESHOLD_MAX: i64 = 255;

pub fn is_valid_threshold(value: i64) -> bool {
    (THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value)
}

/// The detector requires lo <= hi; thresholds handed over in either order
/// are normalized rather than rejected.
pub fn ordered_thresholds(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Compute a binary edge map (pixels are 0 or 255) from any buffer layout.
/// Multi-channel input is reduced to luminance before detection; the result
/// is always single-channel.
pub fn edge_map(img: &DynamicImage, lower: f32, upper: f32) -> GrayImage {
    let gray = img.to_luma8();
    let (lo, hi) = ordered_thresholds(lower, upper);
    canny(&gray, lo, hi)
}
