// ============================================================================
// FILTERFE CLI — headless processing via command-line arguments
// ============================================================================
//
// Usage examples:
//   filterfe --input photo.png --grayscale --output gray.png
//   filterfe -i photo.jpg --blur 5 -o soft.png
//   filterfe -i scan.png --edge-low 50 --edge-high 150 -o edges.png
//
// No window is opened in CLI mode. The flags act as the parameter source for
// the same dispatch core the GUI menu uses; operations run in the fixed
// order grayscale -> blur -> edge detection.

use std::collections::VecDeque;
use std::path::PathBuf;

use clap::Parser;

use crate::dispatch::{self, Effect, IntPrompt, MenuChoice, ParamSource};
use crate::session::EditSession;

/// FilterFE headless image processor.
///
/// Apply grayscale / blur / edge detection to an image without opening the
/// GUI. The output format is inferred from the output extension (PNG when
/// missing or unknown).
#[derive(Parser, Debug)]
#[command(
    name = "filterfe",
    about = "FilterFE headless image processor",
    long_about = "Apply the menu operations (grayscale, Gaussian blur, Canny edge\n\
                  detection) to an image file without opening the GUI.\n\n\
                  Example:\n  \
                  filterfe --input photo.png --blur 5 --output soft.png\n  \
                  filterfe -i scan.png --edge-low 50 --edge-high 150 -o edges.png"
)]
pub struct CliArgs {
    /// Input image file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Convert to grayscale.
    #[arg(long)]
    pub grayscale: bool,

    /// Gaussian blur with the given kernel size (odd, 1-21).
    #[arg(long, value_name = "KERNEL")]
    pub blur: Option<i64>,

    /// Lower Canny threshold (0-255). Requires --edge-high.
    #[arg(long, value_name = "0-255", requires = "edge_high")]
    pub edge_low: Option<i64>,

    /// Upper Canny threshold (0-255). Requires --edge-low.
    #[arg(long, value_name = "0-255", requires = "edge_low")]
    pub edge_high: Option<i64>,

    /// Output file path. When omitted, the image is processed but not saved
    /// (useful to validate inputs).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print each processing step.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when CLI-mode flags are present in the real process
    /// arguments. Used by `main()` to route before creating a window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

/// Parameter source fed from the parsed flags: the input path answers the
/// open prompt, the output path the save prompt, and the numeric flags the
/// integer prompts in plan order.
struct ArgParams {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    integers: VecDeque<i64>,
}

impl ParamSource for ArgParams {
    fn open_path(&mut self) -> Option<PathBuf> {
        self.input.take()
    }

    fn save_path(&mut self) -> Option<PathBuf> {
        self.output.take()
    }

    fn integer(&mut self, _prompt: &IntPrompt) -> Option<i64> {
        self.integers.pop_front()
    }
}

/// Run all CLI processing and return an OS exit code.
/// `0` = every step succeeded, `1` = a step failed (invalid parameter,
/// decode/encode error).
pub fn run(args: CliArgs) -> i32 {
    let mut plan: Vec<MenuChoice> = vec![MenuChoice::LoadImage];
    let mut integers = VecDeque::new();

    if args.grayscale {
        plan.push(MenuChoice::Grayscale);
    }
    if let Some(kernel) = args.blur {
        plan.push(MenuChoice::Blur);
        integers.push_back(kernel);
    }
    if let (Some(lower), Some(upper)) = (args.edge_low, args.edge_high) {
        plan.push(MenuChoice::DetectEdges);
        integers.push_back(lower);
        integers.push_back(upper);
    }
    if args.output.is_some() {
        plan.push(MenuChoice::SaveImage);
    }

    let mut session = EditSession::new();
    let mut params = ArgParams {
        input: Some(args.input.clone()),
        output: args.output.clone(),
        integers,
    };

    for choice in plan {
        if args.verbose {
            println!("{}", choice.label());
        }
        let step = dispatch::dispatch(choice, &mut session, &mut params);
        if step.failed {
            // The interactive menu swallows failures; the CLI must not.
            eprintln!("error: {} failed for {}", choice.label(), args.input.display());
            return 1;
        }
        for effect in &step.effects {
            match effect {
                Effect::Notify(msg) => println!("{}", msg),
                Effect::NotifyError(msg) => eprintln!("error: {}", msg),
                // Never planned in CLI mode.
                Effect::ShowPreview | Effect::Exit => {}
            }
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("filterfe_cli_{label}_{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn write_sample_png(dir: &Path) -> PathBuf {
        let img = image::RgbImage::from_fn(32, 32, |x, _| Rgb([(x * 8 % 256) as u8, 0, 0]));
        let path = dir.join("in.png");
        img.save(&path).expect("write sample image");
        path
    }

    fn base_args(input: PathBuf) -> CliArgs {
        CliArgs {
            input,
            grayscale: false,
            blur: None,
            edge_low: None,
            edge_high: None,
            output: None,
            verbose: false,
        }
    }

    #[test]
    fn grayscale_pipeline_writes_output() {
        let dir = unique_temp_dir("gray");
        let out = dir.join("out.png");
        let mut args = base_args(write_sample_png(&dir));
        args.grayscale = true;
        args.output = Some(out.clone());
        assert_eq!(run(args), 0);
        let back = image::open(&out).expect("reload output");
        assert_eq!(back.color().channel_count(), 1);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn even_blur_kernel_exits_nonzero() {
        let dir = unique_temp_dir("evenblur");
        let mut args = base_args(write_sample_png(&dir));
        args.blur = Some(4);
        args.output = Some(dir.join("out.png"));
        assert_eq!(run(args), 1);
        assert!(!dir.join("out.png").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_input_exits_nonzero() {
        let dir = unique_temp_dir("missing");
        let args = base_args(dir.join("absent.png"));
        assert_eq!(run(args), 1);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn edge_pipeline_produces_binary_output() {
        let dir = unique_temp_dir("edges");
        let out = dir.join("edges.png");
        let mut args = base_args(write_sample_png(&dir));
        args.edge_low = Some(50);
        args.edge_high = Some(150);
        args.output = Some(out.clone());
        assert_eq!(run(args), 0);
        let back = image::open(&out).expect("reload output").to_luma8();
        assert!(back.pixels().all(|p| p[0] == 0 || p[0] == 255));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn cli_arg_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
