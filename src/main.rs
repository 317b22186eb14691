#![allow(dead_code)] // core API surface is shared with the library target

#[macro_use]
mod logger;

mod app;
mod cli;
mod components;
mod dispatch;
mod display;
mod io;
mod ops;
mod session;
mod settings;

use app::FilterFEApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // -- CLI / headless mode ------------------------------------------------
    // No window is created; the flags drive the same dispatch core.
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        logger::init();
        let args = cli::CliArgs::parse();
        std::process::exit(cli::run(args));
    }

    // -- GUI mode -----------------------------------------------------------

    // Initialize the session log (overwrites the previous session's log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("FilterFE"),
        ..Default::default()
    };

    eframe::run_native(
        "FilterFE",
        options,
        Box::new(|cc| Box::new(FilterFEApp::new(cc))),
    )
}
