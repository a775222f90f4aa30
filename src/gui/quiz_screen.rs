use chrono::Utc;
use eframe::egui;

use super::{
    app::MedidictApp,
    Screen,
};
use crate::{
    core::models::{
        ReviewRecord,
        TermField,
    },
    quiz::{
        self,
        QuizCard,
        QuizQuestion,
    },
};

/// An in-progress quiz round.
pub struct QuizState {
    pub questions: Vec<QuizQuestion>,
    pub current: usize,
    pub score: usize,
    pub answered: Option<usize>,
}

pub fn show(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let title = app.text("quiz");
    let back_label = app.text("back");

    ui.horizontal(|ui| {
        if ui.button(&back_label).clicked() {
            app.quiz = None;
            app.set_screen(Screen::Home);
        }
        ui.heading(app.theme.heading(&title));
    });
    ui.add_space(8.0);

    if app.quiz.is_none() {
        show_setup(app, ui);
    } else {
        show_round(app, ui);
    }
}

fn show_setup(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let start_label = app.text("start");
    let empty_label = app.text("quiz_empty");

    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("quiz_from")
            .selected_text(app.quiz_from.label())
            .show_ui(ui, |ui| {
                for field in TermField::ALL {
                    ui.selectable_value(&mut app.quiz_from, field, field.label());
                }
            });

        ui.label("→");

        egui::ComboBox::from_id_salt("quiz_to")
            .selected_text(app.quiz_to.label())
            .show_ui(ui, |ui| {
                for field in TermField::ALL {
                    ui.selectable_value(&mut app.quiz_to, field, field.label());
                }
            });
    });

    ui.add_space(8.0);
    if ui.button(&start_label).clicked() {
        if app.quiz_from == app.quiz_to {
            app.set_status("Pick two different columns".to_string());
            return;
        }

        let pool =
            quiz::build_pool(app.glossary.entries(), &app.user_terms, app.quiz_from, app.quiz_to);
        if pool.is_empty() {
            app.set_status(empty_label);
            return;
        }

        let questions = quiz::generate_quiz(&pool, &mut rand::rng());
        app.quiz = Some(QuizState { questions, current: 0, score: 0, answered: None });
    }
}

fn show_round(app: &mut MedidictApp, ui: &mut egui::Ui) {
    let next_label = app.text("quiz_next");
    let done_label = app.text("quiz_done");
    let score_label = app.text("quiz_score");
    let again_label = app.text("start");

    let Some(state) = app.quiz.as_ref() else {
        return;
    };
    let total = state.questions.len();
    let current = state.current;
    let score = state.score;
    let answered = state.answered;

    if current >= total {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(app.theme.heading(&done_label));
            ui.label(format!("{}: {} / {}", score_label, score, total));
            ui.add_space(12.0);
            if ui.button(&again_label).clicked() {
                app.quiz = None;
            }
        });
        return;
    }

    let question = state.questions[current].clone();

    ui.label(app.theme.muted(&format!("{} / {}", current + 1, total)));
    ui.add_space(4.0);
    ui.heading(app.theme.bold(&question.card.prompt));
    ui.add_space(8.0);

    let mut chosen = None;
    for (index, option) in question.options.iter().enumerate() {
        let mut text = egui::RichText::new(option);
        if let Some(answered) = answered {
            if *option == question.card.answer {
                text = text.color(app.theme.green());
            } else if answered == index {
                text = text.color(app.theme.red());
            }
        }

        let button = egui::Button::new(text).min_size(egui::Vec2::new(240.0, 28.0));
        if ui.add_enabled(answered.is_none(), button).clicked() {
            chosen = Some(index);
        }
        ui.add_space(4.0);
    }

    if let Some(index) = chosen {
        let correct = question.options[index] == question.card.answer;
        if let Some(state) = app.quiz.as_mut() {
            state.answered = Some(index);
            if correct {
                state.score += 1;
            }
        }
        record_answer(app, &question.card, correct);
    }

    if answered.is_some() {
        ui.add_space(8.0);
        if ui.button(&next_label).clicked() {
            if let Some(state) = app.quiz.as_mut() {
                state.current += 1;
                state.answered = None;
            }
        }
    }
}

fn record_answer(app: &mut MedidictApp, card: &QuizCard, correct: bool) {
    if apply_answer(&mut app.review_items, card, correct) {
        app.save_review_items();
    }
}

/// Bumps the review item tied to this card, creating one on first contact.
/// A wrong answer raises the difficulty, a right one lowers it toward zero.
/// Cards with no identity at all (an unsynced term without an English entry)
/// leave no review trail, there is nothing stable to link a new item back to.
fn apply_answer(review_items: &mut Vec<ReviewRecord>, card: &QuizCard, correct: bool) -> bool {
    if card.term_id.is_none() && card.term_key.is_none() {
        return false;
    }

    let now = Utc::now();
    let delta: f32 = if correct { -1.0 } else { 1.0 };

    let existing = review_items.iter_mut().find(|item| match (&item.term_id, &card.term_id) {
        (Some(a), Some(b)) => a == b,
        _ => item.term_key.is_some() && item.term_key == card.term_key,
    });

    match existing {
        Some(item) => {
            item.difficulty = Some((item.difficulty.unwrap_or(0.0) + delta).max(0.0));
            item.last_seen = Some(now);
            item.updated_at = Some(now);
            item.dirty = true;
        }
        None => review_items.push(ReviewRecord {
            term_id: card.term_id.clone(),
            term_key: card.term_key.clone(),
            difficulty: Some(delta.max(0.0)),
            last_seen: Some(now),
            updated_at: Some(now),
            dirty: true,
            ..Default::default()
        }),
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(term_id: Option<&str>, term_key: Option<&str>) -> QuizCard {
        QuizCard {
            prompt: "Niere".to_string(),
            answer: "ren".to_string(),
            term_id: term_id.map(str::to_string),
            term_key: term_key.map(str::to_string),
        }
    }

    #[test]
    fn answers_update_one_item_per_term() {
        let mut items = Vec::new();
        let card = card(None, Some("kidney"));

        assert!(apply_answer(&mut items, &card, false));
        assert!(apply_answer(&mut items, &card, false));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].difficulty, Some(2.0));
        assert_eq!(items[0].term_key.as_deref(), Some("kidney"));
        assert!(items[0].dirty);
    }

    #[test]
    fn correct_answers_lower_difficulty_toward_zero() {
        let mut items = Vec::new();
        let card = card(Some("t1"), None);

        apply_answer(&mut items, &card, false);
        apply_answer(&mut items, &card, true);
        apply_answer(&mut items, &card, true);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].difficulty, Some(0.0));
    }

    #[test]
    fn card_without_any_identity_leaves_no_trail() {
        // An unsynced term with only non-English translations has neither an
        // id nor a natural key; repeated answers must not pile up anonymous
        // review items.
        let mut items = Vec::new();
        let card = card(None, None);

        assert!(!apply_answer(&mut items, &card, false));
        assert!(!apply_answer(&mut items, &card, true));

        assert!(items.is_empty());
    }
}
