// ============================================================================
// EDIT SESSION — the original/working image buffer pair and its operations
// ============================================================================

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::io;
use crate::ops::{adjustments, edges, filters};

/// Error type for session operations.
#[derive(Debug)]
pub enum SessionError {
    /// An operation was attempted before a successful load.
    NoImage,
    /// Blur kernel outside [1, 21] or even.
    InvalidKernel(i64),
    /// Edge threshold outside [0, 255].
    InvalidThreshold(i64),
    /// The decoder could not read the given path.
    Decode(String),
    /// The encoder could not write the given path.
    Encode(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoImage => write!(f, "no image loaded"),
            SessionError::InvalidKernel(k) => {
                write!(f, "blur kernel must be an odd number in [1, 21], got {}", k)
            }
            SessionError::InvalidThreshold(t) => {
                write!(f, "edge threshold must be in [0, 255], got {}", t)
            }
            SessionError::Decode(e) => write!(f, "decode error: {}", e),
            SessionError::Encode(e) => write!(f, "encode error: {}", e),
        }
    }
}

/// The two in-memory buffers behind the menu: the untouched decoded original
/// and the working copy every operation edits in place.
///
/// Invariant: `working` is `Some` exactly when `original` is. Both are set by
/// a successful load and replaced together by the next one; `reset()` copies
/// the original back over the working image.
#[derive(Default)]
pub struct EditSession {
    original: Option<DynamicImage>,
    working: Option<DynamicImage>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.working.is_some()
    }

    pub fn original(&self) -> Option<&DynamicImage> {
        self.original.as_ref()
    }

    pub fn working(&self) -> Option<&DynamicImage> {
        self.working.as_ref()
    }

    /// Decode a file into the original buffer and initialize the working
    /// buffer as a copy. On failure neither buffer changes.
    pub fn load_from_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let img = io::load_image(path).map_err(|e| SessionError::Decode(e.to_string()))?;
        self.working = Some(img.clone());
        self.original = Some(img);
        Ok(())
    }

    /// Discard all edits, restoring the working buffer to the original.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let original = self.original.as_ref().ok_or(SessionError::NoImage)?;
        self.working = Some(original.clone());
        Ok(())
    }

    /// Replace the working buffer with its luminance conversion. Applying it
    /// to an already single-channel buffer is a tolerated no-op.
    pub fn grayscale(&mut self) -> Result<(), SessionError> {
        let working = self.working.as_ref().ok_or(SessionError::NoImage)?;
        if !adjustments::is_single_channel(working) {
            self.working = Some(adjustments::to_grayscale(working));
        }
        Ok(())
    }

    /// Gaussian-smooth the working buffer with a square kernel. The kernel
    /// must be odd and within [1, 21]; invalid values leave the buffer
    /// untouched (no clamping or rounding).
    pub fn blur(&mut self, kernel: i64) -> Result<(), SessionError> {
        let working = self.working.as_ref().ok_or(SessionError::NoImage)?;
        if !filters::is_valid_kernel(kernel) {
            return Err(SessionError::InvalidKernel(kernel));
        }
        self.working = Some(filters::gaussian_blur(working, kernel as u32));
        Ok(())
    }

    /// Replace the working buffer with its Canny edge map (binary, single
    /// channel). Multi-channel buffers are reduced to luminance first.
    pub fn edge_detect(&mut self, lower: i64, upper: i64) -> Result<(), SessionError> {
        let working = self.working.as_ref().ok_or(SessionError::NoImage)?;
        for threshold in [lower, upper] {
            if !edges::is_valid_threshold(threshold) {
                return Err(SessionError::InvalidThreshold(threshold));
            }
        }
        let map = edges::edge_map(working, lower as f32, upper as f32);
        self.working = Some(DynamicImage::ImageLuma8(map));
        Ok(())
    }

    /// Encode the working buffer to the given path; the extension selects the
    /// format (PNG when missing or unknown). Returns the path actually
    /// written.
    pub fn save_to_path(&self, path: &Path) -> Result<PathBuf, SessionError> {
        let working = self.working.as_ref().ok_or(SessionError::NoImage)?;
        io::encode_and_write(working, path).map_err(|e| SessionError::Encode(e.to_string()))
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
        let dir = std::env::temp_dir().join(format!("filterfe_session_{label}_{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn write_sample_png(dir: &Path, width: u32, height: u32) -> PathBuf {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 5 % 256) as u8,
                (y * 11 % 256) as u8,
                ((x + y) % 256) as u8,
            ])
        });
        let path = dir.join("sample.png");
        img.save(&path).expect("write sample image");
        path
    }

    fn loaded_session(dir: &Path) -> EditSession {
        let path = write_sample_png(dir, 100, 50);
        let mut session = EditSession::new();
        session.load_from_path(&path).expect("load sample");
        session
    }

    #[test]
    fn load_sets_both_buffers_to_equal_contents() {
        let dir = unique_temp_dir("load");
        let session = loaded_session(&dir);
        let original = session.original().expect("original set");
        let working = session.working().expect("working set");
        assert_eq!(original.as_bytes(), working.as_bytes());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn failed_load_leaves_buffers_unchanged() {
        let dir = unique_temp_dir("badload");
        let mut session = loaded_session(&dir);
        let err = session.load_from_path(&dir.join("does_not_exist.png"));
        assert!(matches!(err, Err(SessionError::Decode(_))));
        // The previous image survives a failed load.
        assert_eq!(session.working().expect("working kept").dimensions(), (100, 50));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn operations_before_load_fail_with_no_image() {
        let mut session = EditSession::new();
        assert!(matches!(session.grayscale(), Err(SessionError::NoImage)));
        assert!(matches!(session.blur(3), Err(SessionError::NoImage)));
        assert!(matches!(session.edge_detect(50, 150), Err(SessionError::NoImage)));
        assert!(matches!(session.reset(), Err(SessionError::NoImage)));
        assert!(matches!(
            session.save_to_path(Path::new("/tmp/never.png")),
            Err(SessionError::NoImage)
        ));
        assert!(session.original().is_none() && session.working().is_none());
    }

    #[test]
    fn grayscale_converts_to_single_channel_same_size() {
        let dir = unique_temp_dir("gray");
        let mut session = loaded_session(&dir);
        session.grayscale().expect("grayscale");
        let working = session.working().expect("working");
        assert_eq!(working.color().channel_count(), 1);
        assert_eq!(working.dimensions(), (100, 50));
        // The original is untouched.
        assert_eq!(session.original().expect("original").color().channel_count(), 3);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn repeated_grayscale_is_a_tolerated_no_op() {
        let dir = unique_temp_dir("gray2");
        let mut session = loaded_session(&dir);
        session.grayscale().expect("first");
        let once = session.working().expect("working").as_bytes().to_vec();
        session.grayscale().expect("second");
        assert_eq!(session.working().expect("working").as_bytes(), &once[..]);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn even_kernel_fails_and_leaves_working_untouched() {
        let dir = unique_temp_dir("evenblur");
        let mut session = loaded_session(&dir);
        let before = session.working().expect("working").as_bytes().to_vec();
        assert!(matches!(session.blur(4), Err(SessionError::InvalidKernel(4))));
        assert_eq!(session.working().expect("working").as_bytes(), &before[..]);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn valid_blur_preserves_dimensions() {
        let dir = unique_temp_dir("blur");
        let mut session = loaded_session(&dir);
        session.blur(5).expect("blur");
        assert_eq!(session.working().expect("working").dimensions(), (100, 50));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn edge_detect_produces_binary_single_channel() {
        let dir = unique_temp_dir("edges");
        let mut session = loaded_session(&dir);
        session.edge_detect(50, 150).expect("edges");
        let working = session.working().expect("working");
        assert_eq!(working.color().channel_count(), 1);
        assert!(working.to_luma8().pixels().all(|p| p[0] == 0 || p[0] == 255));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn edge_detect_rejects_out_of_range_thresholds() {
        let dir = unique_temp_dir("edgerange");
        let mut session = loaded_session(&dir);
        assert!(matches!(
            session.edge_detect(-1, 150),
            Err(SessionError::InvalidThreshold(-1))
        ));
        assert!(matches!(
            session.edge_detect(50, 256),
            Err(SessionError::InvalidThreshold(256))
        ));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn reset_restores_original_after_any_sequence() {
        let dir = unique_temp_dir("reset");
        let mut session = loaded_session(&dir);
        session.grayscale().expect("grayscale");
        session.blur(7).expect("blur");
        session.edge_detect(30, 90).expect("edges");
        session.reset().expect("reset");
        let original = session.original().expect("original");
        let working = session.working().expect("working");
        assert_eq!(original.as_bytes(), working.as_bytes());
        assert_eq!(original.color(), working.color());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn grayscale_save_reload_scenario() {
        // load 100x50 -> grayscale -> save out.png -> reload is 1-channel 100x50
        let dir = unique_temp_dir("scenario");
        let mut session = loaded_session(&dir);
        session.grayscale().expect("grayscale");
        let written = session.save_to_path(&dir.join("out.png")).expect("save");
        let mut second = EditSession::new();
        second.load_from_path(&written).expect("reload");
        let reloaded = second.working().expect("working");
        assert_eq!(reloaded.dimensions(), (100, 50));
        assert_eq!(reloaded.color().channel_count(), 1);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn save_without_extension_defaults_to_png() {
        let dir = unique_temp_dir("noext");
        let session = loaded_session(&dir);
        let written = session.save_to_path(&dir.join("plain")).expect("save");
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(written.exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn save_to_unwritable_path_fails_cleanly() {
        let dir = unique_temp_dir("badsave");
        let session = loaded_session(&dir);
        let missing_parent = dir.join("nope").join("out.png");
        assert!(matches!(
            session.save_to_path(&missing_parent),
            Err(SessionError::Encode(_))
        ));
        let _ = std::fs::remove_dir_all(dir);
    }
}
