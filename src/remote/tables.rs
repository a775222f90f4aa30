use reqwest::Client;
use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::{
    RemoteConfig,
    Session,
};
use crate::{
    core::{
        models::{
            ReviewRecord,
            TermRecord,
        },
        MedidictError,
    },
    sync::RemoteStore,
};

pub const TERMS_TABLE: &str = "user_terms";
pub const REVIEW_TABLE: &str = "user_review_items";

/// REST client for the two per-user record tables. Fetches are ordered by
/// `updated_at` descending; upserts are insert-or-update keyed on `id`.
pub struct TableClient {
    client: Client,
    config: RemoteConfig,
}

impl TableClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    async fn fetch_all<T: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
    ) -> Result<Vec<T>, MedidictError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", "updated_at.desc")])
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MedidictError::Remote { status: status.as_u16(), message });
        }

        Ok(response.json().await?)
    }

    async fn upsert_all<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        records: &[T],
    ) -> Result<(), MedidictError> {
        let rows = strip_local_flags(records)?;

        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", "id")])
            .header("apikey", &self.config.anon_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .bearer_auth(&session.access_token)
            .json(&rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MedidictError::Remote { status: status.as_u16(), message });
        }
        Ok(())
    }
}

/// The `dirty` flag is client-side bookkeeping with no column upstream.
fn strip_local_flags<T: Serialize>(records: &[T]) -> Result<Vec<serde_json::Value>, MedidictError> {
    records
        .iter()
        .map(|record| {
            let mut value = serde_json::to_value(record)?;
            if let Some(row) = value.as_object_mut() {
                row.remove("dirty");
            }
            Ok(value)
        })
        .collect()
}

impl RemoteStore for TableClient {
    async fn fetch_terms(&self, session: &Session) -> Result<Vec<TermRecord>, MedidictError> {
        self.fetch_all(session, TERMS_TABLE).await
    }

    async fn fetch_review(&self, session: &Session) -> Result<Vec<ReviewRecord>, MedidictError> {
        self.fetch_all(session, REVIEW_TABLE).await
    }

    async fn upsert_terms(
        &self,
        session: &Session,
        records: &[TermRecord],
    ) -> Result<(), MedidictError> {
        self.upsert_all(session, TERMS_TABLE, records).await
    }

    async fn upsert_review(
        &self,
        session: &Session,
        records: &[ReviewRecord],
    ) -> Result<(), MedidictError> {
        self.upsert_all(session, REVIEW_TABLE, records).await
    }
}
