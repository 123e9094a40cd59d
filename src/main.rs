mod app;
mod cli;
mod media;
mod security;
mod state;
mod ui;
mod view;

use std::process::ExitCode;

use app::PhotonApp;
use clap::Parser;
use eframe::egui;

const WINDOW_TITLE: &str = "Photon";
const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

fn main() -> ExitCode {
    let mut args = cli::Args::parse();
    cli::init_logging(args.verbosity);

    // A bad path is fatal and must be caught before any window exists.
    let path = match args.take_image_path() {
        Ok(path) => path,
        Err(e) => {
            log::error!("Security error: Invalid file path ({e})");
            return ExitCode::FAILURE;
        }
    };

    if path.is_none() {
        log::info!("Photon started - No image specified. Pass an image path to load one.");
        log::info!("Controls: ESC=Exit, +/-=Zoom, F=Fit, 1=Actual Size, I=Toggle Info");
    }
    log::info!("Press ESC to exit");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(true),
        vsync: true,
        ..Default::default()
    };

    let result = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(PhotonApp::new(&cc.egui_ctx, path, WINDOW_SIZE)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to initialize display: {e}");
            ExitCode::FAILURE
        }
    }
}
