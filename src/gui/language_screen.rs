use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};
use crate::core::models::Language;

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let choose = app.text("choose_language");
    let may_change = app.text("may_change_later");
    let login = app.text("login_or_register");
    let skip = app.text("continue_without_account");
    let note = app.text("please_note");

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(app.theme.heading(&choose));
        ui.label(app.theme.muted(&may_change));
        ui.add_space(12.0);

        for language in Language::ALL {
            if ui.selectable_label(app.language == language, language.label()).clicked() {
                app.language = language;
            }
        }

        ui.add_space(16.0);
        if ui.button(&login).clicked() {
            app.set_screen(Screen::Auth);
        }
        if ui.button(&skip).clicked() {
            app.set_screen(Screen::Home);
        }

        ui.add_space(12.0);
        ui.label(app.theme.muted(&note));
    });
}
