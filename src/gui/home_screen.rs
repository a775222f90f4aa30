use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};

const NAV_BUTTON_SIZE: egui::Vec2 = egui::Vec2::new(220.0, 32.0);

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let welcome = app.text("welcome");
    let entries = [
        (app.text("search_terms"), Screen::Search),
        (app.text("add_term"), Screen::AddTerm),
        (app.text("quiz"), Screen::Quiz),
        (app.text("settings"), Screen::Settings),
    ];

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(app.theme.heading(&welcome));
        ui.add_space(16.0);

        for (label, screen) in entries {
            if ui.add(egui::Button::new(label).min_size(NAV_BUTTON_SIZE)).clicked() {
                app.set_screen(screen);
            }
            ui.add_space(4.0);
        }
    });
}
