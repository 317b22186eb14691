// ============================================================================
// PREVIEW SCALING — fit an image to the available screen area
// ============================================================================

use image::{DynamicImage, GenericImageView, imageops::FilterType};

/// Dimensions that fit the image into the available area while preserving
/// aspect ratio: `scale = min(availW/imgW, availH/imgH)`, rounded to the
/// nearest pixel. Small images scale up to fill the area; degenerate results
/// are clamped to 1px.
pub fn fit_dimensions(
    image_width: u32,
    image_height: u32,
    avail_width: f32,
    avail_height: f32,
) -> (u32, u32) {
    if image_width == 0 || image_height == 0 {
        return (1, 1);
    }
    let scale = (avail_width / image_width as f32).min(avail_height / image_height as f32);
    let width = (image_width as f32 * scale).round().max(1.0) as u32;
    let height = (image_height as f32 * scale).round().max(1.0) as u32;
    (width, height)
}

/// Resample the image to its fitted dimensions. Triangle filtering averages
/// over the source footprint, which is what a downscaled preview wants.
pub fn fit_to_area(img: &DynamicImage, avail_width: f32, avail_height: f32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (fit_width, fit_height) = fit_dimensions(width, height, avail_width, avail_height);
    if (fit_width, fit_height) == (width, height) {
        return img.clone();
    }
    img.resize_exact(fit_width, fit_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn wide_image_is_limited_by_width() {
        // 2000x500 into 1000x1000: scale = 0.5
        assert_eq!(fit_dimensions(2000, 500, 1000.0, 1000.0), (1000, 250));
    }

    #[test]
    fn tall_image_is_limited_by_height() {
        assert_eq!(fit_dimensions(500, 2000, 1000.0, 1000.0), (125, 500));
    }

    #[test]
    fn small_image_scales_up_to_fit() {
        assert_eq!(fit_dimensions(100, 50, 1000.0, 1000.0), (1000, 500));
    }

    #[test]
    fn rounding_is_to_nearest() {
        // 3:1 image into 100x100: scale = 100/300, height 33.33.. -> 33
        assert_eq!(fit_dimensions(300, 100, 100.0, 100.0), (100, 33));
    }

    #[test]
    fn aspect_ratio_is_preserved_within_rounding() {
        let (w, h) = fit_dimensions(1920, 1080, 777.0, 555.0);
        let src_ratio = 1920.0 / 1080.0;
        let fit_ratio = w as f32 / h as f32;
        assert!((src_ratio - fit_ratio).abs() < 0.02);
    }

    #[test]
    fn fit_to_area_resizes_pixels() {
        let src = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            200,
            100,
            Rgb([10, 200, 30]),
        ));
        let fitted = fit_to_area(&src, 100.0, 100.0);
        assert_eq!(fitted.dimensions(), (100, 50));
    }

    #[test]
    fn exact_fit_is_returned_unchanged() {
        let src = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(64, 64, Rgb([1, 2, 3])));
        let fitted = fit_to_area(&src, 64.0, 64.0);
        assert_eq!(fitted.as_bytes(), src.as_bytes());
    }
}
