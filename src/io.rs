// ============================================================================
// IMAGE I/O — decode, extension-driven encode, native file dialogs
// ============================================================================

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat};
use rfd::FileDialog;

/// Extensions offered by the open-file dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

// ============================================================================
// SAVE FORMAT
// ============================================================================

/// Output encodings selectable through a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
}

impl SaveFormat {
    /// Map a (case-insensitive) file extension to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "gif" => Some(SaveFormat::Gif),
            "tif" | "tiff" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }

    pub fn for_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Bmp => ImageFormat::Bmp,
            SaveFormat::Gif => ImageFormat::Gif,
            SaveFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Pick the output path and format for a user-supplied path.
///
/// A recognized extension selects its encoder. An unrecognized extension is
/// accepted as-is and encoded as PNG. A missing extension gets `.png`
/// appended.
pub fn resolve_save_target(path: &Path) -> (PathBuf, SaveFormat) {
    if let Some(format) = SaveFormat::for_path(path) {
        return (path.to_path_buf(), format);
    }
    if path.extension().is_some() {
        return (path.to_path_buf(), SaveFormat::Png);
    }
    let mut with_ext = path.as_os_str().to_owned();
    with_ext.push(".png");
    (PathBuf::from(with_ext), SaveFormat::Png)
}

// ============================================================================
// DECODE / ENCODE
// ============================================================================

/// Decode any raster format the `image` crate supports.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Encode and write an image, selecting the format from the path's extension
/// (PNG when missing or unknown). Returns the path actually written.
///
/// Encoders do not all accept every channel layout, so the buffer is adapted
/// per format: JPEG has no alpha channel, BMP/GIF writers want RGB(A).
pub fn encode_and_write(img: &DynamicImage, path: &Path) -> Result<PathBuf, ImageError> {
    let (target, format) = resolve_save_target(path);
    match format {
        SaveFormat::Png | SaveFormat::Tiff => {
            img.save_with_format(&target, format.image_format())?;
        }
        SaveFormat::Jpeg => {
            DynamicImage::ImageRgb8(img.to_rgb8())
                .save_with_format(&target, format.image_format())?;
        }
        SaveFormat::Bmp | SaveFormat::Gif => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .save_with_format(&target, format.image_format())?;
        }
    }
    Ok(target)
}

// ============================================================================
// FILE HANDLER — native open/save dialogs
// ============================================================================

/// Wraps the native file dialogs and remembers the directories the user
/// navigated to, so the next prompt opens where the last one left off.
#[derive(Default)]
pub struct FileHandler {
    pub last_open_dir: Option<PathBuf>,
    pub last_save_dir: Option<PathBuf>,
}

impl FileHandler {
    pub fn new(last_open_dir: Option<PathBuf>, last_save_dir: Option<PathBuf>) -> Self {
        Self {
            last_open_dir,
            last_save_dir,
        }
    }

    /// Show the native open dialog, filtered to common raster formats.
    /// Returns `None` when the user dismisses the dialog.
    pub fn pick_open_path(&mut self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Select an image")
            .add_filter("Image files", OPEN_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = &self.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.pick_file()?;
        self.last_open_dir = path.parent().map(Path::to_path_buf);
        Some(path)
    }

    /// Show the native save dialog, defaulting to PNG.
    /// Returns `None` when the user dismisses the dialog.
    pub fn pick_save_path(&mut self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save image as")
            .set_file_name("output.png")
            .add_filter("PNG files", &["png"])
            .add_filter("JPEG files", &["jpg", "jpeg"])
            .add_filter("All files", &["*"]);
        if let Some(dir) = &self.last_save_dir {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.save_file()?;
        self.last_save_dir = path.parent().map(Path::to_path_buf);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("filterfe_{label}_{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn sample_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 42])
        }))
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(SaveFormat::from_extension("png"), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_extension("JPG"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("jpeg"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("tif"), Some(SaveFormat::Tiff));
        assert_eq!(SaveFormat::from_extension("webp"), None);
    }

    #[test]
    fn missing_extension_appends_png() {
        let (target, format) = resolve_save_target(Path::new("/tmp/out"));
        assert_eq!(target, PathBuf::from("/tmp/out.png"));
        assert_eq!(format, SaveFormat::Png);
    }

    #[test]
    fn unknown_extension_is_kept_and_encoded_as_png() {
        let (target, format) = resolve_save_target(Path::new("/tmp/out.xyz"));
        assert_eq!(target, PathBuf::from("/tmp/out.xyz"));
        assert_eq!(format, SaveFormat::Png);
    }

    #[test]
    fn known_extension_is_respected() {
        let (target, format) = resolve_save_target(Path::new("/tmp/out.jpg"));
        assert_eq!(target, PathBuf::from("/tmp/out.jpg"));
        assert_eq!(format, SaveFormat::Jpeg);
    }

    #[test]
    fn png_write_read_roundtrip() {
        let dir = unique_temp_dir("roundtrip");
        let src = sample_rgb(20, 10);
        let written = encode_and_write(&src, &dir.join("out.png")).expect("write png");
        let back = load_image(&written).expect("read png");
        assert_eq!(back.dimensions(), (20, 10));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn grayscale_png_survives_roundtrip_single_channel() {
        let dir = unique_temp_dir("gray");
        let gray = DynamicImage::ImageLuma8(sample_rgb(100, 50).to_luma8());
        let written = encode_and_write(&gray, &dir.join("gray.png")).expect("write png");
        let back = load_image(&written).expect("read png");
        assert_eq!(back.dimensions(), (100, 50));
        assert_eq!(back.color().channel_count(), 1);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn jpeg_write_accepts_alpha_input() {
        let dir = unique_temp_dir("jpeg");
        let rgba = DynamicImage::ImageRgba8(sample_rgb(12, 12).to_rgba8());
        let written = encode_and_write(&rgba, &dir.join("out.jpg")).expect("write jpeg");
        assert!(written.exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
