mod app;
mod led_display;

use game_of_light::sim::{GridPreset, Simulation};

fn main() -> eframe::Result {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let sim = match Simulation::new(&GridPreset::HexB3.config()) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("cannot build grid: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Game of Light"),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Light",
        options,
        Box::new(|cc| Ok(Box::new(app::LightApp::new(cc, sim)))),
    )
}
