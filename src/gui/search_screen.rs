use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::{
    app::MedidictApp,
    Screen,
};
use crate::core::models::TermField;

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let title = app.text("search_terms");
    let back_label = app.text("back");
    let no_matches = app.text("no_matches");
    let notes_label = app.text("notes");

    ui.horizontal(|ui| {
        if ui.button(&back_label).clicked() {
            app.set_screen(Screen::Home);
        }
        ui.heading(app.theme.heading(&title));
    });
    ui.add_space(8.0);

    ui.text_edit_singleline(&mut app.search_query);
    ui.add_space(8.0);

    let field = app.language.term_field();
    let rows: Vec<[String; 4]> = app
        .glossary
        .search(&app.search_query, &app.user_terms)
        .into_iter()
        .map(|term| {
            [
                term.field(field).unwrap_or("—").to_string(),
                term.field(TermField::English).unwrap_or("—").to_string(),
                term.field(TermField::Latin).unwrap_or("—").to_string(),
                term.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();

    if rows.is_empty() {
        if !app.search_query.trim().is_empty() {
            ui.label(app.theme.muted(&no_matches));
        }
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

    egui::ScrollArea::vertical().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(150.0))
            .column(Column::auto().at_least(150.0))
            .column(Column::auto().at_least(130.0))
            .column(Column::remainder())
            .header(25.0, |mut header| {
                header.col(|ui| {
                    ui.label(app.theme.heading(app.language.label()));
                });
                header.col(|ui| {
                    ui.label(app.theme.heading("English"));
                });
                header.col(|ui| {
                    ui.label(app.theme.heading("Latin"));
                });
                header.col(|ui| {
                    ui.label(app.theme.heading(&notes_label));
                });
            })
            .body(|body| {
                body.rows(row_height, rows.len(), |mut row| {
                    let entry = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(app.theme.bold(&entry[0]));
                    });
                    row.col(|ui| {
                        ui.label(&entry[1]);
                    });
                    row.col(|ui| {
                        ui.label(&entry[2]);
                    });
                    row.col(|ui| {
                        ui.label(app.theme.muted(&entry[3]));
                    });
                });
            });
    });
}
