// ============================================================================
// IMAGE FILTERS — Gaussian blur
// ============================================================================

use image::DynamicImage;
use imageproc::filter::gaussian_blur_f32;

/// Smallest accepted blur kernel size.
pub const KERNEL_MIN: i64 = 1;
/// Largest accepted blur kernel size.
pub const KERNEL_MAX: i64 = 21;

/// A kernel size is usable when it is odd and within [KERNEL_MIN, KERNEL_MAX].
/// Values are never rounded or clamped into validity: an even kernel fails
/// the whole operation.
pub fn is_valid_kernel(kernel: i64) -> bool {
    (KERNEL_MIN..=KERNEL_MAX).contains(&kernel) && kernel % 2 == 1
}

/// Standard deviation for a square kernel of the given (odd) size, using the
/// same derivation OpenCV applies when the caller leaves sigma unspecified:
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian-smooth the buffer with a square kernel of the given size,
/// preserving the channel layout (a grayscale buffer stays grayscale).
/// The caller is responsible for validating the kernel first.
pub fn gaussian_blur(img: &DynamicImage, kernel: u32) -> DynamicImage {
    if kernel <= 1 {
        // A 1x1 kernel is the identity.
        return img.clone();
    }
    let sigma = sigma_for_kernel(kernel);
    match img {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(gaussian_blur_f32(gray, sigma))
        }
        DynamicImage::ImageRgb8(rgb) => DynamicImage::ImageRgb8(gaussian_blur_f32(rgb, sigma)),
        DynamicImage::ImageRgba8(rgba) => {
            DynamicImage::ImageRgba8(gaussian_blur_f32(rgba, sigma))
        }
        other => DynamicImage::ImageRgba8(gaussian_blur_f32(&other.to_rgba8(), sigma)),
    }
}
