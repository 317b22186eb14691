// ============================================================================
// MENU DISPATCH — the pure state machine behind the interactive menu
// ============================================================================
//
// The menu loop is split the classic way: `dispatch()` is a pure function of
// (choice, session, parameter source) returning effect descriptions, and the
// frontends are thin adapters that collect parameters and perform effects.
// Three parameter sources exist: native dialogs (src/app.rs), command-line
// flags (src/cli.rs), and scripted values in the tests below.

use std::path::PathBuf;

use crate::session::EditSession;

// ============================================================================
// MENU CHOICES
// ============================================================================

/// The eight actions of the numbered menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    LoadImage,
    ShowImage,
    Grayscale,
    Blur,
    DetectEdges,
    SaveImage,
    Reset,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::LoadImage,
        MenuChoice::ShowImage,
        MenuChoice::Grayscale,
        MenuChoice::Blur,
        MenuChoice::DetectEdges,
        MenuChoice::SaveImage,
        MenuChoice::Reset,
        MenuChoice::Exit,
    ];

    /// 1-based menu number as shown to the user.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) + 1
    }

    /// Inverse of [`MenuChoice::number`]; out-of-range input selects nothing.
    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::LoadImage => "Load Image",
            MenuChoice::ShowImage => "Show Image",
            MenuChoice::Grayscale => "Convert to Grayscale",
            MenuChoice::Blur => "Blur Image",
            MenuChoice::DetectEdges => "Detect Edges",
            MenuChoice::SaveImage => "Save Image",
            MenuChoice::Reset => "Reset Image",
            MenuChoice::Exit => "Exit",
        }
    }
}

// ============================================================================
// PARAMETER SOURCE
// ============================================================================

/// Description of one integer prompt: title, message and inclusive bounds.
pub struct IntPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: Option<i64>,
}

pub const BLUR_KERNEL_PROMPT: IntPrompt = IntPrompt {
    title: "Blur",
    message: "Kernel size (must be an odd number):",
    min: crate::ops::filters::KERNEL_MIN,
    max: crate::ops::filters::KERNEL_MAX,
    default: None,
};

pub const EDGE_LOWER_PROMPT: IntPrompt = IntPrompt {
    title: "Edge Detection",
    message: "Lower threshold:",
    min: crate::ops::edges::THRESHOLD_MIN,
    max: crate::ops::edges::THRESHOLD_MAX,
    default: Some(50),
};

pub const EDGE_UPPER_PROMPT: IntPrompt = IntPrompt {
    title: "Edge Detection",
    message: "Upper threshold:",
    min: crate::ops::edges::THRESHOLD_MIN,
    max: crate::ops::edges::THRESHOLD_MAX,
    default: Some(150),
};

/// Capability that supplies user input to `dispatch()`. Returning `None`
/// means the user dismissed the prompt: the action is aborted and prior
/// state kept.
pub trait ParamSource {
    fn open_path(&mut self) -> Option<PathBuf>;
    fn save_path(&mut self) -> Option<PathBuf>;
    fn integer(&mut self, prompt: &IntPrompt) -> Option<i64>;
}

// ============================================================================
// EFFECTS
// ============================================================================

/// Side effects a frontend performs after a dispatch step. The dispatch core
/// never touches a window or stdout itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Success confirmation to show the user.
    Notify(String),
    /// Error notice to show the user (only the Show Image action produces one).
    NotifyError(String),
    /// Present the working image, blocking the menu until dismissed.
    ShowPreview,
    /// Leave the menu loop.
    Exit,
}

/// Outcome of one pass through the menu.
#[derive(Debug, Default)]
pub struct Step {
    pub effects: Vec<Effect>,
    /// True when the action did not complete (cancelled prompt, invalid
    /// parameter, codec failure, no image). The interactive menu ignores
    /// this — failures there are silent by design — but the CLI maps it to
    /// its exit code.
    pub failed: bool,
}

impl Step {
    fn ok(effects: Vec<Effect>) -> Self {
        Step {
            effects,
            failed: false,
        }
    }

    fn failure() -> Self {
        Step {
            effects: Vec::new(),
            failed: true,
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Run one menu action against the session. Every failure mode — no image,
/// cancelled prompt, invalid parameter, codec error — leaves the working
/// image unchanged; none is surfaced to the user beyond what `Effect`s say.
pub fn dispatch(
    choice: MenuChoice,
    session: &mut EditSession,
    params: &mut dyn ParamSource,
) -> Step {
    match choice {
        MenuChoice::LoadImage => {
            let Some(path) = params.open_path() else {
                log_info!("load cancelled by user");
                return Step::failure();
            };
            match session.load_from_path(&path) {
                Ok(()) => {
                    log_info!("loaded image from {}", path.display());
                    Step::ok(Vec::new())
                }
                Err(e) => {
                    log_err!("load failed for {}: {}", path.display(), e);
                    Step::failure()
                }
            }
        }

        MenuChoice::ShowImage => {
            if session.has_image() {
                Step::ok(vec![Effect::ShowPreview])
            } else {
                Step {
                    effects: vec![Effect::NotifyError("No image to display".to_string())],
                    failed: true,
                }
            }
        }

        MenuChoice::Grayscale => match session.grayscale() {
            Ok(()) => Step::ok(vec![Effect::Notify(
                "Image converted to grayscale".to_string(),
            )]),
            Err(e) => {
                log_warn!("grayscale skipped: {}", e);
                Step::failure()
            }
        },

        MenuChoice::Blur => {
            // Prompt only once an image exists, matching the menu contract.
            if !session.has_image() {
                log_warn!("blur skipped: no image loaded");
                return Step::failure();
            }
            let Some(kernel) = params.integer(&BLUR_KERNEL_PROMPT) else {
                log_info!("blur cancelled by user");
                return Step::failure();
            };
            match session.blur(kernel) {
                Ok(()) => Step::ok(vec![Effect::Notify("Blur applied".to_string())]),
                Err(e) => {
                    log_warn!("blur skipped: {}", e);
                    Step::failure()
                }
            }
        }

        MenuChoice::DetectEdges => {
            if !session.has_image() {
                log_warn!("edge detection skipped: no image loaded");
                return Step::failure();
            }
            let Some(lower) = params.integer(&EDGE_LOWER_PROMPT) else {
                log_info!("edge detection cancelled by user");
                return Step::failure();
            };
            let Some(upper) = params.integer(&EDGE_UPPER_PROMPT) else {
                log_info!("edge detection cancelled by user");
                return Step::failure();
            };
            match session.edge_detect(lower, upper) {
                Ok(()) => Step::ok(vec![Effect::Notify(
                    "Edge detection complete".to_string(),
                )]),
                Err(e) => {
                    log_warn!("edge detection skipped: {}", e);
                    Step::failure()
                }
            }
        }

        MenuChoice::SaveImage => {
            if !session.has_image() {
                log_warn!("save skipped: no image loaded");
                return Step::failure();
            }
            let Some(path) = params.save_path() else {
                log_info!("save cancelled by user");
                return Step::failure();
            };
            match session.save_to_path(&path) {
                Ok(written) => Step::ok(vec![Effect::Notify(format!(
                    "Image saved to {}",
                    written.display()
                ))]),
                Err(e) => {
                    log_err!("save failed for {}: {}", path.display(), e);
                    Step::failure()
                }
            }
        }

        MenuChoice::Reset => match session.reset() {
            Ok(()) => Step::ok(vec![Effect::Notify(
                "Image restored to original".to_string(),
            )]),
            Err(e) => {
                log_warn!("reset skipped: {}", e);
                Step::failure()
            }
        },

        MenuChoice::Exit => Step::ok(vec![Effect::Exit]),
    }
}
