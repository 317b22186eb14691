// ============================================================================
// DIALOG SYSTEM — modal prompts for parameters and notices
// ============================================================================
//
// Every dialog follows the same pattern:
//   - struct holding the in-progress values
//   - show(&mut self, ctx) -> DialogResult<T> called each frame while open
//   - accent header, grid body, OK/Cancel footer, Enter/Esc keyboard handling
// At most one dialog is open at a time (see ActiveDialog); a dialog is torn
// down before control returns to the menu, confirmed or not.
// ============================================================================

use eframe::egui;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Vec2};

use crate::dispatch::IntPrompt;

// ============================================================================
// ACTIVE-DIALOG ENUM
// ============================================================================

/// The modal dialog currently in front of the menu, if any.
#[derive(Default)]
pub enum ActiveDialog {
    #[default]
    None,
    /// Blur kernel prompt.
    BlurKernel(IntegerPromptDialog),
    /// First of the two edge-detection prompts.
    EdgeLower(IntegerPromptDialog),
    /// Second edge-detection prompt, carrying the confirmed lower threshold.
    EdgeUpper {
        dialog: IntegerPromptDialog,
        lower: i64,
    },
    /// Success or error notice.
    Notice(NoticeDialog),
}

impl ActiveDialog {
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveDialog::None)
    }
}

/// Result returned by a dialog's `show()` method every frame.
pub enum DialogResult<T> {
    /// Dialog is still open, nothing to do this frame.
    Open,
    /// User confirmed — contains the final value.
    Ok(T),
    /// User cancelled or dismissed the dialog.
    Cancel,
}

// ============================================================================
// SHARED STYLING HELPERS
// ============================================================================

/// Colors extracted from the current egui visuals for dialog rendering.
pub(crate) struct DialogColors {
    pub accent: Color32,
    pub accent_faint: Color32,
    pub text_muted: Color32,
}

impl DialogColors {
    pub(crate) fn from_ctx(ctx: &egui::Context) -> Self {
        let visuals = ctx.style().visuals.clone();
        let accent = visuals.selection.stroke.color;
        let alpha = if visuals.dark_mode { 35 } else { 25 };
        Self {
            accent,
            accent_faint: Color32::from_rgba_unmultiplied(
                accent.r(),
                accent.g(),
                accent.b(),
                alpha,
            ),
            text_muted: if visuals.dark_mode {
                Color32::from_gray(160)
            } else {
                visuals.weak_text_color()
            },
        }
    }
}

/// Paint the accent header bar with icon + title.
pub(crate) fn paint_dialog_header(
    ui: &mut egui::Ui,
    colors: &DialogColors,
    icon: &str,
    title: &str,
) {
    let header_height = 30.0;
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), header_height),
        Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::ZERO, colors.accent_faint);
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(3.0, header_height)),
        Rounding::ZERO,
        colors.accent,
    );
    painter.text(
        Pos2::new(rect.min.x + 10.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        format!("{} {}", icon, title),
        egui::FontId::proportional(14.0),
        colors.accent,
    );
}

/// Thin separator line using the faint accent color.
pub(crate) fn accent_separator(ui: &mut egui::Ui, colors: &DialogColors) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors.accent_faint);
}

/// Styled OK / Cancel footer. Returns (ok_clicked, cancel_clicked).
pub(crate) fn dialog_footer(ui: &mut egui::Ui, colors: &DialogColors) -> (bool, bool) {
    let mut ok = false;
    let mut cancel = false;
    ui.add_space(4.0);
    accent_separator(ui, colors);
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
            let ok_btn = egui::Button::new(
                egui::RichText::new("  OK  ").color(Color32::WHITE).strong(),
            )
            .fill(colors.accent);
            if ui.add(ok_btn).clicked() {
                ok = true;
            }
        });
    });
    (ok, cancel)
}

// ============================================================================
// INTEGER PROMPT
// ============================================================================

/// Modal prompt for one integer parameter with inclusive bounds and an
/// optional preset default.
pub struct IntegerPromptDialog {
    title: &'static str,
    message: &'static str,
    min: i64,
    max: i64,
    pub value: i64,
}

impl IntegerPromptDialog {
    pub fn new(prompt: &IntPrompt) -> Self {
        Self {
            title: prompt.title,
            message: prompt.message,
            min: prompt.min,
            max: prompt.max,
            value: prompt.default.unwrap_or(prompt.min),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogResult<i64> {
        let mut result = DialogResult::Open;
        let colors = DialogColors::from_ctx(ctx);

        // Keyboard: Enter = OK, Esc = Cancel
        let enter = ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));
        let esc = ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape));
        if enter {
            return DialogResult::Ok(self.value.clamp(self.min, self.max));
        }
        if esc {
            return DialogResult::Cancel;
        }

        egui::Window::new(self.title)
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                paint_dialog_header(ui, &colors, "\u{1F522}", self.title);
                ui.add_space(6.0);
                ui.label(self.message);
                ui.add_space(4.0);

                egui::Grid::new("integer_prompt_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Value");
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::DragValue::new(&mut self.value)
                                    .speed(1)
                                    .clamp_range(self.min..=self.max),
                            );
                            ui.label(
                                egui::RichText::new(format!("({} – {})", self.min, self.max))
                                    .size(11.0)
                                    .color(colors.text_muted),
                            );
                        });
                        ui.end_row();
                    });

                let (ok, cancel) = dialog_footer(ui, &colors);
                if ok {
                    result = DialogResult::Ok(self.value.clamp(self.min, self.max));
                }
                if cancel {
                    result = DialogResult::Cancel;
                }
            });
        result
    }
}

// ============================================================================
// NOTICE
// ============================================================================

/// Modal notice with a single OK button, used for success confirmations and
/// the show-image error.
pub struct NoticeDialog {
    title: String,
    body: String,
    is_error: bool,
}

impl NoticeDialog {
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            body: body.into(),
            is_error: false,
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            body: body.into(),
            is_error: true,
        }
    }

    /// Returns true when the notice was dismissed this frame.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut dismissed = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)
        });
        let colors = DialogColors::from_ctx(ctx);
        let icon = if self.is_error { "\u{26A0}" } else { "\u{2714}" };

        egui::Window::new("notice_dialog")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                paint_dialog_header(ui, &colors, icon, &self.title);
                ui.add_space(8.0);
                ui.label(&self.body);
                ui.add_space(8.0);
                accent_separator(ui, &colors);
                ui.add_space(6.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let ok_btn = egui::Button::new(
                        egui::RichText::new("  OK  ").color(Color32::WHITE).strong(),
                    )
                    .fill(colors.accent);
                    if ui.add(ok_btn).clicked() {
                        dismissed = true;
                    }
                });
            });
        dismissed
    }
}
