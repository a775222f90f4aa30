use chrono::Utc;
use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};
use crate::core::models::TermRecord;

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let title = app.text("add_term");
    let notes_label = app.text("notes");
    let save_label = app.text("save_term");
    let back_label = app.text("back");

    ui.horizontal(|ui| {
        if ui.button(&back_label).clicked() {
            app.set_screen(Screen::Home);
        }
        ui.heading(app.theme.heading(&title));
    });
    ui.add_space(8.0);

    egui::Grid::new("add_term_form").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
        for (field, value) in &mut app.add_form.fields {
            ui.label(field.label());
            ui.text_edit_singleline(value);
            ui.end_row();
        }

        ui.label(&notes_label);
        ui.text_edit_multiline(&mut app.add_form.notes);
        ui.end_row();
    });

    ui.add_space(8.0);
    if ui.button(&save_label).clicked() {
        save_term(app);
    }
}

fn save_term(app: &mut MedidictApp) {
    let mut record = TermRecord { source: Some("user".to_string()), dirty: true, ..Default::default() };

    for (field, value) in &app.add_form.fields {
        let value = value.trim();
        if !value.is_empty() {
            record.set_field(*field, value.to_string());
        }
    }

    let notes = app.add_form.notes.trim();
    if !notes.is_empty() {
        record.notes = Some(notes.to_string());
    }

    if !record.has_translations() {
        let message = app.text("nothing_to_save");
        app.set_status(message);
        return;
    }

    let now = Utc::now();
    record.created_at = Some(now);
    record.updated_at = Some(now);

    app.user_terms.push(record);
    app.save_user_terms();
    app.add_form.clear();

    let message = app.text("term_saved");
    app.set_status(message);
}
