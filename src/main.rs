#![warn(clippy::all, rust_2018_idioms)]

use caption_canvas::{AppConfig, CaptionApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = AppConfig::from_env();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Caption Canvas"),
        ..Default::default()
    };
    eframe::run_native(
        "caption_canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(CaptionApp::new(cc, config)))),
    )
}
