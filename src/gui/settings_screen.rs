use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};
use crate::core::models::Language;

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let title = app.text("settings");
    let language_label = app.text("language");
    let account_label = app.text("account_sync");
    let sync_label = app.text("sync");
    let last_sync_label = app.text("last_sync");
    let never_label = app.text("never");
    let sign_out_label = app.text("sign_out");
    let return_label = app.text("return_to_login");
    let language_menu_label = app.text("back_to_language_menu");
    let logged_in_label = app.text("logged_in_as");
    let unsynced_label = app.text("unsynced_changes");
    let home_label = app.text("back");

    ui.horizontal(|ui| {
        if ui.button(&home_label).clicked() {
            app.set_screen(Screen::Home);
        }
        ui.heading(app.theme.heading(&title));
    });
    ui.separator();

    ui.label(app.theme.heading(&language_label));
    ui.horizontal_wrapped(|ui| {
        for language in Language::ALL {
            if ui.selectable_label(app.language == language, language.label()).clicked() {
                app.language = language;
            }
        }
    });

    ui.add_space(12.0);
    ui.label(app.theme.heading(&account_label));

    match app.session.clone() {
        Some(session) => {
            ui.horizontal(|ui| {
                ui.label(&logged_in_label);
                ui.label(app.theme.bold(&session.email));
            });

            let last_sync = app
                .last_sync
                .map(|when| {
                    when.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string()
                })
                .unwrap_or(never_label);
            ui.label(format!("{}: {}", last_sync_label, last_sync));
            ui.label(format!("{}: {}", unsynced_label, app.dirty_records));

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!app.syncing, egui::Button::new(&sync_label)).clicked() {
                    app.start_sync();
                }
                if ui.button(&sign_out_label).clicked() {
                    app.sign_out();
                }
            });
        }
        None => {
            if ui.button(&return_label).clicked() {
                app.set_screen(Screen::Auth);
            }
            // Still reachable without a session, fails fast with a status hint.
            if ui.button(&sync_label).clicked() {
                app.start_sync();
            }
        }
    }

    ui.add_space(12.0);
    if ui.button(&language_menu_label).clicked() {
        app.set_screen(Screen::Language);
    }
}
