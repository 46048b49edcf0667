#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_sketch::{SketchApp, SketchConfig};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = SketchConfig::from_env().unwrap_or_else(|err| {
        log::warn!("Falling back to default config: {err}");
        SketchConfig::default()
    });

    let canvas = config.canvas_size();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas.x + 240.0, canvas.y.max(360.0) + 40.0])
            .with_min_inner_size([canvas.x + 200.0, canvas.y + 20.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe sketch",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}
