use chrono::{
    DateTime,
    Utc,
};
use eframe::egui;

use super::{
    add_term_screen,
    auth_screen,
    home_screen,
    language_screen,
    message_overlay::MessageOverlay,
    quiz_screen::{
        self,
        QuizState,
    },
    search_screen,
    settings_screen,
    theme::{
        set_theme,
        Theme,
    },
    Screen,
};
use crate::{
    cache::{
        self,
        LocalCache,
    },
    core::{
        models::{
            Language,
            ReviewRecord,
            TermField,
            TermRecord,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
    },
    glossary::Glossary,
    i18n::Translations,
    remote::{
        self,
        RemoteConfig,
        Session,
    },
};

#[derive(Default)]
pub struct AuthForm {
    pub identifier: String,
    pub secret: String,
    pub busy: bool,
}

pub struct AddTermForm {
    pub fields: Vec<(TermField, String)>,
    pub notes: String,
}

impl AddTermForm {
    fn new() -> Self {
        Self {
            fields: TermField::ALL.iter().map(|field| (*field, String::new())).collect(),
            notes: String::new(),
        }
    }

    pub fn clear(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
        self.notes.clear();
    }
}

impl Default for AddTermForm {
    fn default() -> Self {
        Self::new()
    }
}

/// All application state, explicitly constructed at startup and owned by the
/// view layer.
pub struct MedidictApp {
    // Routing & localization
    pub screen: Screen,
    pub language: Language,
    pub translations: Translations,

    // Reference data
    pub glossary: Glossary,

    // Personal records
    pub cache: LocalCache,
    pub user_terms: Vec<TermRecord>,
    pub review_items: Vec<ReviewRecord>,
    pub dirty_records: usize,
    pub last_sync: Option<DateTime<Utc>>,

    // Backend
    pub remote_config: Option<RemoteConfig>,
    pub session: Option<Session>,
    pub syncing: bool,

    // UI state
    pub status: Option<String>,
    pub theme: Theme,
    pub overlay: MessageOverlay,
    pub auth_form: AuthForm,
    pub add_form: AddTermForm,
    pub search_query: String,
    pub quiz_from: TermField,
    pub quiz_to: TermField,
    pub quiz: Option<QuizState>,

    tasks: TaskManager,
}

impl MedidictApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);

        let remote_config = RemoteConfig::load();
        if remote_config.is_none() {
            println!("No backend configured, running local-only");
        }

        let cache = LocalCache::open();
        let user_terms = cache.load_terms();
        let review_items = cache.load_review();
        let dirty_records = cache::dirty_count(&user_terms, &review_items);
        let last_sync = cache.last_sync();
        let session = remote::load_session();

        let tasks = TaskManager::new();
        tasks.load_reference_data(remote_config.clone(), cache.clone());

        let mut overlay = MessageOverlay::new();
        overlay.set_message("Loading reference data…".to_string());

        Self {
            screen: Screen::Language,
            language: Language::English,
            translations: Translations::builtin(),
            glossary: Glossary::new(),
            cache,
            user_terms,
            review_items,
            dirty_records,
            last_sync,
            remote_config,
            session,
            syncing: false,
            status: None,
            theme,
            overlay,
            auth_form: AuthForm::default(),
            add_form: AddTermForm::default(),
            search_query: String::new(),
            quiz_from: TermField::English,
            quiz_to: TermField::Latin,
            quiz: None,
            tasks,
        }
    }

    pub fn text(&self, key: &str) -> String {
        self.translations.text(self.language, key)
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    pub fn save_user_terms(&mut self) {
        if let Err(e) = self.cache.save_terms(&self.user_terms) {
            self.status = Some(format!("Save failed: {}", e));
        }
        self.dirty_records = cache::dirty_count(&self.user_terms, &self.review_items);
    }

    pub fn save_review_items(&mut self) {
        if let Err(e) = self.cache.save_review(&self.review_items) {
            self.status = Some(format!("Save failed: {}", e));
        }
        self.dirty_records = cache::dirty_count(&self.user_terms, &self.review_items);
    }

    pub fn start_sync(&mut self) {
        if self.syncing {
            return;
        }
        let Some(session) = self.session.clone() else {
            self.status = Some(self.text("login_required"));
            return;
        };
        let Some(config) = self.remote_config.clone() else {
            self.status = Some(self.text("offline_mode"));
            return;
        };

        self.syncing = true;
        self.status = Some(self.text("sync_in_progress"));
        self.tasks.run_sync(config, session, self.cache.clone());
    }

    pub fn sign_out(&mut self) {
        if let (Some(config), Some(session)) = (self.remote_config.clone(), self.session.take()) {
            self.tasks.sign_out(config, session);
        }
        self.session = None;
        if let Err(e) = remote::clear_session() {
            eprintln!("Failed to clear stored session: {}", e);
        }
        self.status = Some("Signed out".to_string());
    }

    pub fn authenticate(&mut self, register: bool) {
        let Some(config) = self.remote_config.clone() else {
            let message = self.text("offline_mode");
            self.set_status(message);
            return;
        };

        let identifier = self.auth_form.identifier.trim().to_string();
        if identifier.is_empty() || self.auth_form.secret.is_empty() {
            self.status = Some("Missing credentials".to_string());
            return;
        }

        self.auth_form.busy = true;
        self.tasks.authenticate(config, identifier, self.auth_form.secret.clone(), register);
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::ReferenceDataLoaded(Ok(data)) => {
                self.glossary = data.glossary;
                self.translations = data.translations;
                self.overlay.clear_message();
                self.status = Some(if data.loaded.is_empty() {
                    "Data: not loaded (missing reference files)".to_string()
                } else {
                    format!("Data: loaded ({})", data.loaded.join(", "))
                });
            }
            TaskResult::ReferenceDataLoaded(Err(e)) => {
                self.overlay.clear_message();
                self.status = Some(format!("Data: error ({})", e));
            }
            TaskResult::AuthFinished(Ok(session)) => {
                if let Err(e) = remote::store_session(&session) {
                    eprintln!("Failed to persist session: {}", e);
                }
                self.session = Some(session);
                self.auth_form.busy = false;
                self.auth_form.secret.clear();
                self.status = Some(self.text("welcome"));
                self.screen = Screen::Home;
            }
            TaskResult::AuthFinished(Err(e)) => {
                self.auth_form.busy = false;
                self.status = Some(e);
            }
            TaskResult::SignedOut(result) => {
                if let Err(e) = result {
                    eprintln!("Remote sign-out failed: {}", e);
                }
            }
            TaskResult::SyncFinished(Ok(synced_at)) => {
                self.syncing = false;
                self.user_terms = self.cache.load_terms();
                self.review_items = self.cache.load_review();
                self.dirty_records = cache::dirty_count(&self.user_terms, &self.review_items);
                self.last_sync = Some(synced_at);
                self.status = Some(self.text("sync_done"));
            }
            TaskResult::SyncFinished(Err(e)) => {
                self.syncing = false;
                self.status = Some(format!("{}: {}", self.text("sync"), e));
            }
        }
    }

    fn top_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.theme.heading(&self.text("app_title")));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let user = self
                    .session
                    .as_ref()
                    .map(|session| session.email.clone())
                    .unwrap_or_else(|| "—".to_string());
                ui.label(self.theme.muted(&user));

                if self.dirty_records > 0 {
                    ui.label(
                        egui::RichText::new(format!("✎ {}", self.dirty_records))
                            .color(self.theme.yellow()),
                    );
                }

                if let Some(status) = &self.status {
                    self.theme.status_label(ui, status);
                }
            });
        });
    }
}

impl eframe::App for MedidictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.tasks.poll_results() {
            self.handle_task_result(result);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| self.top_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.screen {
            Screen::Language => language_screen::show(self, ui),
            Screen::Auth => auth_screen::show(self, ui),
            Screen::Home => home_screen::show(self, ui),
            Screen::Search => search_screen::show(self, ui),
            Screen::AddTerm => add_term_screen::show(self, ui),
            Screen::Quiz => quiz_screen::show(self, ui),
            Screen::Settings => settings_screen::show(self, ui),
        });

        self.overlay.show(ctx, &self.theme);
    }
}
