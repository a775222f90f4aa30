use chrono::{
    DateTime,
    Utc,
};

use crate::{
    glossary::Glossary,
    i18n::Translations,
    remote::Session,
};

/// Base glossary and UI strings assembled from the cached reference files.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub glossary: Glossary,
    pub translations: Translations,
    /// Logical names of the reference files that actually had content.
    pub loaded: Vec<String>,
}

/// Results background tasks hand back to the GUI thread.
#[derive(Debug)]
pub enum TaskResult {
    ReferenceDataLoaded(Result<ReferenceData, String>),
    AuthFinished(Result<Session, String>),
    SignedOut(Result<(), String>),
    SyncFinished(Result<DateTime<Utc>, String>),
}
