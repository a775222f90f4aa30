use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let title = app.text("login_or_register");
    let identifier_label = app.text("identifier");
    let secret_label = app.text("secret");
    let login_label = app.text("login");
    let register_label = app.text("register");
    let back_label = app.text("back");

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(app.theme.heading(&title));
        ui.add_space(12.0);

        egui::Grid::new("auth_form").num_columns(2).spacing([8.0, 8.0]).show(ui, |ui| {
            ui.label(&identifier_label);
            ui.text_edit_singleline(&mut app.auth_form.identifier);
            ui.end_row();

            ui.label(&secret_label);
            ui.add(egui::TextEdit::singleline(&mut app.auth_form.secret).password(true));
            ui.end_row();
        });

        ui.add_space(8.0);

        let mut register = None;
        ui.horizontal(|ui| {
            if ui.add_enabled(!app.auth_form.busy, egui::Button::new(&login_label)).clicked() {
                register = Some(false);
            }
            if ui.add_enabled(!app.auth_form.busy, egui::Button::new(&register_label)).clicked() {
                register = Some(true);
            }
        });

        if let Some(register) = register {
            app.authenticate(register);
        }

        ui.add_space(8.0);
        if ui.button(&back_label).clicked() {
            app.set_screen(Screen::Language);
        }
    });
}
