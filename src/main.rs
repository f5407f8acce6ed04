mod app;
mod config;
mod export;
mod image;
mod library;
mod logging;
mod session;
mod util;

use app::TintbatchApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    logging::init_logger();
    let initial_folder: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 680.0])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tintbatch — Sprite Recolor",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(TintbatchApp::new_with_initial_folder(
                cc,
                initial_folder.as_deref(),
            )))
        }),
    )
}
