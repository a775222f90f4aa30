use reqwest::Client;
use serde::Deserialize;

use super::RemoteConfig;
use crate::{
    cache::{
        LocalCache,
        TERMS_FILE_ID,
        TRANSLATIONS_FILE_ID,
    },
    core::MedidictError,
};

pub const REFERENCE_BUCKET: &str = "reference";

/// (logical cache name, object name in the bucket)
pub const REFERENCE_FILES: [(&str, &str); 2] = [
    (TERMS_FILE_ID, "medical_terms.csv"),
    (TRANSLATIONS_FILE_ID, "app_translations.csv"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFileInfo {
    pub name: String,
    pub updated_at: Option<String>,
}

/// Listing and download of the reference bucket.
#[allow(async_fn_in_trait)]
pub trait FileSource {
    async fn list(&self) -> Result<Vec<RemoteFileInfo>, MedidictError>;
    async fn download(&self, name: &str) -> Result<String, MedidictError>;
}

/// Object-storage client for the base reference files.
pub struct FileStore {
    client: Client,
    config: RemoteConfig,
}

impl FileStore {
    pub fn new(config: RemoteConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

impl FileSource for FileStore {
    async fn list(&self) -> Result<Vec<RemoteFileInfo>, MedidictError> {
        let url = format!("{}/storage/v1/object/list/{}", self.config.url, REFERENCE_BUCKET);
        let body = serde_json::json!({ "prefix": "", "limit": 100 });

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MedidictError::Remote { status: status.as_u16(), message });
        }

        Ok(response.json().await?)
    }

    async fn download(&self, name: &str) -> Result<String, MedidictError> {
        let url = format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, REFERENCE_BUCKET, name
        );

        let response =
            self.client.get(&url).header("apikey", &self.config.anon_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MedidictError::Remote {
                status: status.as_u16(),
                message: format!("download of {} failed", name),
            });
        }

        Ok(response.text().await?)
    }
}

/// Pulls the base reference files into the local file cache, skipping any
/// file whose cached last-modified stamp matches the listing. Returns the
/// logical names actually refreshed.
pub async fn refresh_reference_files(
    source: &impl FileSource,
    cache: &LocalCache,
) -> Result<Vec<String>, MedidictError> {
    let listing = source.list().await?;
    let mut refreshed = Vec::new();

    for (logical, object_name) in REFERENCE_FILES {
        let Some(remote) = listing.iter().find(|file| file.name == object_name) else {
            eprintln!("Reference file {} missing upstream, keeping cached copy", object_name);
            continue;
        };

        if let Some(cached) = cache.cached_file(logical) {
            if cached.last_modified.is_some() && cached.last_modified == remote.updated_at {
                continue;
            }
        }

        let content = source.download(object_name).await?;
        cache.store_file(logical, content, remote.updated_at.clone())?;
        refreshed.push(logical.to_string());
    }

    Ok(refreshed)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use uuid::Uuid;

    use super::*;

    struct FakeSource {
        listing: Vec<RemoteFileInfo>,
        fail_downloads: bool,
        downloads: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(listing: Vec<RemoteFileInfo>) -> Self {
            Self { listing, fail_downloads: false, downloads: Mutex::new(Vec::new()) }
        }
    }

    impl FileSource for FakeSource {
        async fn list(&self) -> Result<Vec<RemoteFileInfo>, MedidictError> {
            Ok(self.listing.clone())
        }

        async fn download(&self, name: &str) -> Result<String, MedidictError> {
            if self.fail_downloads {
                return Err(MedidictError::Custom("download refused".to_string()));
            }
            self.downloads.lock().unwrap().push(name.to_string());
            Ok(format!("{} content", name))
        }
    }

    fn info(name: &str, stamp: &str) -> RemoteFileInfo {
        RemoteFileInfo { name: name.to_string(), updated_at: Some(stamp.to_string()) }
    }

    fn temp_cache() -> LocalCache {
        LocalCache::in_dir(
            std::env::temp_dir().join(format!("medidict-files-test-{}", Uuid::new_v4())),
        )
    }

    #[tokio::test]
    async fn first_refresh_downloads_both_files() {
        let cache = temp_cache();
        let source =
            FakeSource::new(vec![info("medical_terms.csv", "s1"), info("app_translations.csv", "s2")]);

        let refreshed = refresh_reference_files(&source, &cache).await.unwrap();

        assert_eq!(refreshed, vec!["terms".to_string(), "translations".to_string()]);
        let cached = cache.cached_file(TERMS_FILE_ID).unwrap();
        assert_eq!(cached.content, "medical_terms.csv content");
        assert_eq!(cached.last_modified.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn matching_stamp_skips_the_download() {
        let cache = temp_cache();
        cache.store_file(TERMS_FILE_ID, "old terms".to_string(), Some("s1".to_string())).unwrap();
        let source =
            FakeSource::new(vec![info("medical_terms.csv", "s1"), info("app_translations.csv", "s2")]);

        let refreshed = refresh_reference_files(&source, &cache).await.unwrap();

        assert_eq!(refreshed, vec!["translations".to_string()]);
        assert_eq!(cache.cached_file(TERMS_FILE_ID).unwrap().content, "old terms");
        assert_eq!(*source.downloads.lock().unwrap(), vec!["app_translations.csv".to_string()]);
    }

    #[tokio::test]
    async fn changed_stamp_replaces_the_cached_copy() {
        let cache = temp_cache();
        cache.store_file(TERMS_FILE_ID, "old terms".to_string(), Some("s0".to_string())).unwrap();
        let source = FakeSource::new(vec![info("medical_terms.csv", "s1")]);

        let refreshed = refresh_reference_files(&source, &cache).await.unwrap();

        assert_eq!(refreshed, vec!["terms".to_string()]);
        let cached = cache.cached_file(TERMS_FILE_ID).unwrap();
        assert_eq!(cached.content, "medical_terms.csv content");
        assert_eq!(cached.last_modified.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn missing_upstream_file_keeps_the_cached_copy() {
        let cache = temp_cache();
        cache.store_file(TERMS_FILE_ID, "old terms".to_string(), Some("s0".to_string())).unwrap();
        let source = FakeSource::new(vec![info("app_translations.csv", "s2")]);

        let refreshed = refresh_reference_files(&source, &cache).await.unwrap();

        assert_eq!(refreshed, vec!["translations".to_string()]);
        assert_eq!(cache.cached_file(TERMS_FILE_ID).unwrap().content, "old terms");
    }

    #[tokio::test]
    async fn failed_download_keeps_cached_state() {
        let cache = temp_cache();
        cache.store_file(TERMS_FILE_ID, "old terms".to_string(), Some("s0".to_string())).unwrap();
        let mut source = FakeSource::new(vec![info("medical_terms.csv", "s1")]);
        source.fail_downloads = true;

        let result = refresh_reference_files(&source, &cache).await;

        assert!(result.is_err());
        let cached = cache.cached_file(TERMS_FILE_ID).unwrap();
        assert_eq!(cached.content, "old terms");
        assert_eq!(cached.last_modified.as_deref(), Some("s0"));
    }
}
