use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::types::{
    ReferenceData,
    TaskResult,
};
use crate::{
    cache::{
        LocalCache,
        TERMS_FILE_ID,
        TRANSLATIONS_FILE_ID,
    },
    glossary::Glossary,
    i18n::Translations,
    parser::parse_csv,
    remote::{
        auth::AuthClient,
        files::{
            self,
            FileStore,
        },
        tables::TableClient,
        RemoteConfig,
        Session,
    },
    sync::SyncEngine,
};

/// Runs network and disk work off the GUI thread. Results come back through
/// a channel the app drains once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Refreshes the reference files when a backend is configured, then
    /// builds the glossary and translations from whatever the cache holds.
    /// A failed refresh only costs freshness, never the cached data.
    pub fn load_reference_data(&self, config: Option<RemoteConfig>, cache: LocalCache) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            if let Some(config) = config {
                let refresh = runtime.block_on(async {
                    files::refresh_reference_files(&FileStore::new(config), &cache).await
                });

                match refresh {
                    Ok(refreshed) if !refreshed.is_empty() => {
                        println!("Refreshed reference files: {}", refreshed.join(", "))
                    }
                    Ok(_) => {}
                    Err(e) => eprintln!("Reference refresh failed, using cached copies: {}", e),
                }
            }

            let result = build_reference_data(&cache);
            let _ = sender.send(TaskResult::ReferenceDataLoaded(result));
        });
    }

    pub fn authenticate(
        &self,
        config: RemoteConfig,
        identifier: String,
        secret: String,
        register: bool,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async {
                    let client = AuthClient::new(config);
                    if register {
                        client.sign_up(&identifier, &secret).await
                    } else {
                        client.sign_in(&identifier, &secret).await
                    }
                })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::AuthFinished(result));
        });
    }

    pub fn sign_out(&self, config: RemoteConfig, session: Session) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { AuthClient::new(config).sign_out(&session).await })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::SignedOut(result));
        });
    }

    pub fn run_sync(&self, config: RemoteConfig, session: Session, cache: LocalCache) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async {
                    let engine = SyncEngine::new(TableClient::new(config));
                    engine.sync_now(&cache, Some(&session)).await
                })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::SyncFinished(result));
        });
    }
}

fn build_reference_data(cache: &LocalCache) -> Result<ReferenceData, String> {
    let mut glossary = Glossary::new();
    let mut translations = Translations::builtin();
    let mut loaded = Vec::new();

    if let Some(file) = cache.cached_file(TERMS_FILE_ID) {
        match parse_csv(&file.content) {
            Ok(table) => {
                glossary.extend_from_csv(&table, "medical_terms");
                loaded.push(TERMS_FILE_ID.to_string());
            }
            Err(e) => eprintln!("Ignoring cached terms CSV: {}", e),
        }
    }

    if let Some(file) = cache.cached_file(TRANSLATIONS_FILE_ID) {
        match parse_csv(&file.content) {
            Ok(table) => {
                translations.merge_csv(&table);
                loaded.push(TRANSLATIONS_FILE_ID.to_string());
            }
            Err(e) => eprintln!("Ignoring cached translations CSV: {}", e),
        }
    }

    Ok(ReferenceData { glossary, translations, loaded })
}
