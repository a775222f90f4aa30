pub mod merge;

pub use merge::merge;

use chrono::{
    DateTime,
    Utc,
};
use futures::future::try_join;
use uuid::Uuid;

use crate::{
    cache::LocalCache,
    core::{
        models::{
            ReviewRecord,
            TermRecord,
        },
        MedidictError,
    },
    remote::Session,
};

/// Accessors the reconciler needs from both record kinds.
pub trait SyncRecord: Clone {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
    fn dirty(&self) -> bool;
    fn set_dirty(&mut self, dirty: bool);
}

impl SyncRecord for TermRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl SyncRecord for ReviewRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

/// Identifier generation is injected so tests can use predictable ids.
pub trait IdProvider: Send + Sync {
    fn new_id(&self) -> String;
}

pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// The two authenticated record tables upstream.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn fetch_terms(&self, session: &Session) -> Result<Vec<TermRecord>, MedidictError>;
    async fn fetch_review(&self, session: &Session) -> Result<Vec<ReviewRecord>, MedidictError>;
    async fn upsert_terms(
        &self,
        session: &Session,
        records: &[TermRecord],
    ) -> Result<(), MedidictError>;
    async fn upsert_review(
        &self,
        session: &Session,
        records: &[ReviewRecord],
    ) -> Result<(), MedidictError>;
}

pub struct SyncEngine<S> {
    store: S,
    ids: Box<dyn IdProvider>,
}

impl<S: RemoteStore> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_ids(store, Box::new(UuidProvider))
    }

    pub fn with_ids(store: S, ids: Box<dyn IdProvider>) -> Self {
        Self { store, ids }
    }

    /// Full sync round-trip: fetch both collections, merge against local
    /// state, push every dirty record upstream, then clear the flags.
    ///
    /// All-or-nothing: any remote failure aborts with the persisted dirty
    /// flags intact. The ids handed out between the two persist points are
    /// only written out once the upserts succeed.
    pub async fn sync_now(
        &self,
        cache: &LocalCache,
        session: Option<&Session>,
    ) -> Result<DateTime<Utc>, MedidictError> {
        let session = session.ok_or(MedidictError::LoginRequired)?;

        let (remote_terms, remote_review) =
            try_join(self.store.fetch_terms(session), self.store.fetch_review(session)).await?;

        let mut terms = merge(&cache.load_terms(), &remote_terms);
        let mut review = merge(&cache.load_review(), &remote_review);
        cache.save_terms(&terms)?;
        cache.save_review(&review)?;

        for record in terms.iter_mut().filter(|r| r.dirty && r.id.is_none()) {
            record.id = Some(self.ids.new_id());
        }
        for record in review.iter_mut().filter(|r| r.dirty && r.id.is_none()) {
            record.id = Some(self.ids.new_id());
        }

        let dirty_terms: Vec<TermRecord> = terms.iter().filter(|r| r.dirty).cloned().collect();
        let dirty_review: Vec<ReviewRecord> = review.iter().filter(|r| r.dirty).cloned().collect();

        try_join(
            self.upsert_terms_if_any(session, &dirty_terms),
            self.upsert_review_if_any(session, &dirty_review),
        )
        .await?;

        for record in &mut terms {
            record.dirty = false;
        }
        for record in &mut review {
            record.dirty = false;
        }
        cache.save_terms(&terms)?;
        cache.save_review(&review)?;

        let synced_at = Utc::now();
        cache.set_last_sync(synced_at)?;

        println!(
            "Sync finished: {} terms, {} review items ({} pushed)",
            terms.len(),
            review.len(),
            dirty_terms.len() + dirty_review.len()
        );
        Ok(synced_at)
    }

    async fn upsert_terms_if_any(
        &self,
        session: &Session,
        records: &[TermRecord],
    ) -> Result<(), MedidictError> {
        if records.is_empty() {
            return Ok(());
        }
        self.store.upsert_terms(session, records).await
    }

    async fn upsert_review_if_any(
        &self,
        session: &Session,
        records: &[ReviewRecord],
    ) -> Result<(), MedidictError> {
        if records.is_empty() {
            return Ok(());
        }
        self.store.upsert_review(session, records).await
    }
}
