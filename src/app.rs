// ============================================================================
// FILTERFE APP — eframe adapter around the pure menu dispatch
// ============================================================================
//
// The app owns the edit session and interprets dispatch effects: notices
// become modal dialogs, ShowPreview enters a full-window preview that blocks
// the menu until a key press, Exit closes the viewport. Parameters reach the
// dispatch core through `GuiParams` (native file dialogs + values collected
// by the modal integer prompts).

use eframe::egui;
use image::GenericImageView;
use std::path::PathBuf;

use crate::components::dialogs::{
    ActiveDialog, DialogResult, IntegerPromptDialog, NoticeDialog,
};
use crate::dispatch::{
    self, BLUR_KERNEL_PROMPT, EDGE_LOWER_PROMPT, EDGE_UPPER_PROMPT, Effect, IntPrompt,
    MenuChoice, ParamSource,
};
use crate::display;
use crate::io::FileHandler;
use crate::session::EditSession;
use crate::settings::{AppSettings, ThemeMode};

/// Fitted preview texture, rebuilt each time the preview opens.
struct PreviewState {
    texture: egui::TextureHandle,
    size: egui::Vec2,
}

/// Parameter source backed by the native file dialogs and the integer values
/// already collected by the modal prompts.
struct GuiParams<'a> {
    files: &'a mut FileHandler,
    integers: Vec<i64>,
}

impl ParamSource for GuiParams<'_> {
    fn open_path(&mut self) -> Option<PathBuf> {
        self.files.pick_open_path()
    }

    fn save_path(&mut self) -> Option<PathBuf> {
        self.files.pick_save_path()
    }

    fn integer(&mut self, _prompt: &IntPrompt) -> Option<i64> {
        if self.integers.is_empty() {
            None
        } else {
            Some(self.integers.remove(0))
        }
    }
}

pub struct FilterFEApp {
    session: EditSession,
    files: FileHandler,
    settings: AppSettings,
    /// At most one modal dialog is open at a time.
    active_dialog: ActiveDialog,
    /// When set, the preview covers the window and the menu is blocked.
    preview: Option<PreviewState>,
}

impl FilterFEApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        apply_theme(&cc.egui_ctx, settings.theme_mode);
        let files = FileHandler::new(
            settings.last_open_dir.clone(),
            settings.last_save_dir.clone(),
        );
        Self {
            session: EditSession::new(),
            files,
            settings,
            active_dialog: ActiveDialog::default(),
            preview: None,
        }
    }

    /// Route a menu action. Choices that need an integer open their prompt
    /// first; everything else goes straight through dispatch.
    fn handle_menu_choice(&mut self, ctx: &egui::Context, choice: MenuChoice) {
        match choice {
            MenuChoice::Blur if self.session.has_image() => {
                self.active_dialog =
                    ActiveDialog::BlurKernel(IntegerPromptDialog::new(&BLUR_KERNEL_PROMPT));
            }
            MenuChoice::DetectEdges if self.session.has_image() => {
                self.active_dialog =
                    ActiveDialog::EdgeLower(IntegerPromptDialog::new(&EDGE_LOWER_PROMPT));
            }
            other => self.run_choice(ctx, other, Vec::new()),
        }
    }

    /// Run one dispatch step and perform its effects.
    fn run_choice(&mut self, ctx: &egui::Context, choice: MenuChoice, integers: Vec<i64>) {
        let step = {
            let mut params = GuiParams {
                files: &mut self.files,
                integers,
            };
            dispatch::dispatch(choice, &mut self.session, &mut params)
        };
        self.remember_dialog_dirs();

        for effect in step.effects {
            match effect {
                Effect::Notify(msg) => {
                    self.active_dialog = ActiveDialog::Notice(NoticeDialog::info(msg));
                }
                Effect::NotifyError(msg) => {
                    self.active_dialog = ActiveDialog::Notice(NoticeDialog::error(msg));
                }
                Effect::ShowPreview => self.open_preview(ctx),
                Effect::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    /// Keep the settings file in sync with where the file dialogs last were.
    fn remember_dialog_dirs(&mut self) {
        if self.settings.last_open_dir != self.files.last_open_dir
            || self.settings.last_save_dir != self.files.last_save_dir
        {
            self.settings.last_open_dir = self.files.last_open_dir.clone();
            self.settings.last_save_dir = self.files.last_save_dir.clone();
            self.settings.save();
        }
    }

    /// Build the fitted preview texture for the current window size.
    fn open_preview(&mut self, ctx: &egui::Context) {
        let Some(working) = self.session.working() else {
            return;
        };
        let screen = ctx.screen_rect().size();
        let fitted = display::fit_to_area(working, screen.x, screen.y);
        let rgba = fitted.to_rgba8();
        let (width, height) = rgba.dimensions();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            rgba.as_raw(),
        );
        let texture = ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR);
        self.preview = Some(PreviewState {
            texture,
            size: egui::vec2(width as f32, height as f32),
        });
    }

    /// Full-window preview; any key press or click dismisses it.
    fn show_preview(&mut self, ctx: &egui::Context) {
        let dismiss = ctx.input(|i| {
            i.pointer.any_pressed()
                || i.events
                    .iter()
                    .any(|e| matches!(e, egui::Event::Key { pressed: true, .. }))
        });
        if dismiss {
            self.preview = None;
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    if let Some(preview) = &self.preview {
                        let sized =
                            egui::load::SizedTexture::new(preview.texture.id(), preview.size);
                        ui.add(egui::Image::new(sized));
                    }
                });
            });
    }

    /// Pump the active modal dialog. The panels underneath stay drawn (the
    /// menu is disabled while a dialog is open); the dialog overlays them.
    fn show_active_dialog(&mut self, ctx: &egui::Context) {
        let mut dialog = std::mem::take(&mut self.active_dialog);
        match &mut dialog {
            ActiveDialog::None => {}

            ActiveDialog::BlurKernel(prompt) => match prompt.show(ctx) {
                DialogResult::Open => self.active_dialog = dialog,
                DialogResult::Ok(kernel) => self.run_choice(ctx, MenuChoice::Blur, vec![kernel]),
                // Empty parameter queue = dismissed prompt; dispatch logs it.
                DialogResult::Cancel => self.run_choice(ctx, MenuChoice::Blur, Vec::new()),
            },

            ActiveDialog::EdgeLower(prompt) => match prompt.show(ctx) {
                DialogResult::Open => self.active_dialog = dialog,
                DialogResult::Ok(lower) => {
                    self.active_dialog = ActiveDialog::EdgeUpper {
                        dialog: IntegerPromptDialog::new(&EDGE_UPPER_PROMPT),
                        lower,
                    };
                }
                DialogResult::Cancel => {
                    self.run_choice(ctx, MenuChoice::DetectEdges, Vec::new());
                }
            },

            ActiveDialog::EdgeUpper { dialog: prompt, lower } => {
                let lower = *lower;
                match prompt.show(ctx) {
                    DialogResult::Open => self.active_dialog = dialog,
                    DialogResult::Ok(upper) => {
                        self.run_choice(ctx, MenuChoice::DetectEdges, vec![lower, upper]);
                    }
                    DialogResult::Cancel => {
                        // The confirmed lower threshold dies with the dialog.
                        self.run_choice(ctx, MenuChoice::DetectEdges, Vec::new());
                    }
                }
            }

            ActiveDialog::Notice(notice) => {
                if !notice.show(ctx) {
                    self.active_dialog = dialog;
                }
            }
        }
    }

    fn show_menu_panel(&mut self, ctx: &egui::Context) {
        let mut clicked: Option<MenuChoice> = None;
        let menu_enabled = self.active_dialog.is_none();

        // Number keys mirror the on-screen menu numbering.
        if menu_enabled {
            const NUMBER_KEYS: [egui::Key; 8] = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
                egui::Key::Num6,
                egui::Key::Num7,
                egui::Key::Num8,
            ];
            for (index, key) in NUMBER_KEYS.iter().enumerate() {
                if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, *key)) {
                    clicked = MenuChoice::from_number(index + 1);
                }
            }
        }

        egui::SidePanel::left("menu_panel")
            .exact_width(210.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("FilterFE");
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);

                ui.add_enabled_ui(menu_enabled, |ui| {
                    for choice in MenuChoice::ALL {
                        let label = format!("{}. {}", choice.number(), choice.label());
                        if ui
                            .add_sized([ui.available_width(), 26.0], egui::Button::new(label))
                            .clicked()
                        {
                            clicked = Some(choice);
                        }
                        ui.add_space(2.0);
                    }
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(8.0);
                    let label = match self.settings.theme_mode {
                        ThemeMode::Light => "\u{1F319} Dark theme",
                        ThemeMode::Dark => "\u{2600} Light theme",
                    };
                    if ui.button(label).clicked() {
                        self.settings.theme_mode = match self.settings.theme_mode {
                            ThemeMode::Light => ThemeMode::Dark,
                            ThemeMode::Dark => ThemeMode::Light,
                        };
                        apply_theme(ctx, self.settings.theme_mode);
                        self.settings.save();
                    }
                });
            });

        if let Some(choice) = clicked {
            self.handle_menu_choice(ctx, choice);
        }
    }

    fn show_status_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            match self.session.working() {
                Some(working) => {
                    let (width, height) = working.dimensions();
                    let channels = working.color().channel_count();
                    ui.heading("Image loaded");
                    ui.add_space(6.0);
                    ui.label(format!("Size: {} x {} px", width, height));
                    ui.label(format!(
                        "Channels: {} ({})",
                        channels,
                        if channels == 1 { "grayscale" } else { "color" }
                    ));
                    ui.add_space(10.0);
                    ui.weak("Choose 2 (Show Image) to preview the working copy.");
                }
                None => {
                    ui.heading("No image loaded");
                    ui.add_space(6.0);
                    ui.weak("Choose 1 (Load Image) to get started.");
                }
            }
        });
    }
}

impl eframe::App for FilterFEApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.preview.is_some() {
            self.show_preview(ctx);
            return;
        }

        self.show_menu_panel(ctx);
        self.show_status_panel(ctx);
        self.show_active_dialog(ctx);
    }
}

fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    ctx.set_visuals(match mode {
        ThemeMode::Light => egui::Visuals::light(),
        ThemeMode::Dark => egui::Visuals::dark(),
    });
}
