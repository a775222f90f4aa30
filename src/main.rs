use eframe::egui;
use medidict::gui::MedidictApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native("Medidict", options, Box::new(|cc| Ok(Box::new(MedidictApp::new(cc)))))
}
