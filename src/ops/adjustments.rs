// ============================================================================
// COLOR ADJUSTMENTS — grayscale conversion
// ============================================================================

use image::DynamicImage;

/// Replace the pixel representation with its single-channel luminance
/// conversion. The result is always `ImageLuma8`, whatever the input layout.
pub fn to_grayscale(img: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(img.to_luma8())
}

/// True when the buffer already holds a single channel per pixel.
/// Re-running the luminance conversion on such a buffer is the identity, so
/// callers treat it as a tolerated no-op rather than an error.
pub fn is_single_channel(img: &DynamicImage) -> bool {
    img.color().channel_count() == 1
}
