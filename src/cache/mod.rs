use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        ReviewRecord,
        TermRecord,
    },
    MedidictError,
};

const APP_NAME: &str = "medidict";

const TERMS_FILE: &str = "user_terms.json";
const REVIEW_FILE: &str = "user_review.json";
const LAST_SYNC_FILE: &str = "last_sync.json";
const FILE_CACHE_FILE: &str = "file_cache.json";

/// Logical names of the cached reference files.
pub const TERMS_FILE_ID: &str = "terms";
pub const TRANSLATIONS_FILE_ID: &str = "translations";

/// App-data directory for everything the app writes, created on first use.
pub fn app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), MedidictError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(app_data_dir().join(filename), json)?;
    Ok(())
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    let Ok(json) = fs::read_to_string(app_data_dir().join(filename)) else {
        return T::default();
    };

    match serde_json::from_str(&json) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

pub fn delete_data_file(filename: &str) -> Result<(), MedidictError> {
    let path = app_data_dir().join(filename);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

/// Offline copy of a remote reference file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedFile {
    pub content: String,
    pub last_modified: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// Directory of JSON files holding the user's personal records, the last-sync
/// stamp and the reference-file cache. Loads never fail: anything missing or
/// unreadable comes back empty.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn open() -> Self {
        Self::in_dir(app_data_dir())
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        let _ = fs::create_dir_all(&dir);
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.path(name);
        let Ok(json) = fs::read_to_string(&path) else {
            return T::default();
        };

        match serde_json::from_str(&json) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Ignoring unreadable {}: {}", name, e);
                T::default()
            }
        }
    }

    fn write<T: Serialize>(&self, name: &str, data: &T) -> Result<(), MedidictError> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(name), json)?;
        Ok(())
    }

    pub fn load_terms(&self) -> Vec<TermRecord> {
        self.read(TERMS_FILE)
    }

    pub fn save_terms(&self, records: &[TermRecord]) -> Result<(), MedidictError> {
        self.write(TERMS_FILE, &records)
    }

    pub fn load_review(&self) -> Vec<ReviewRecord> {
        self.read(REVIEW_FILE)
    }

    pub fn save_review(&self, records: &[ReviewRecord]) -> Result<(), MedidictError> {
        self.write(REVIEW_FILE, &records)
    }

    pub fn dirty_count(&self) -> usize {
        dirty_count(&self.load_terms(), &self.load_review())
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.read(LAST_SYNC_FILE)
    }

    pub fn set_last_sync(&self, when: DateTime<Utc>) -> Result<(), MedidictError> {
        self.write(LAST_SYNC_FILE, &Some(when))
    }

    pub fn cached_file(&self, name: &str) -> Option<CachedFile> {
        self.read::<HashMap<String, CachedFile>>(FILE_CACHE_FILE).remove(name)
    }

    pub fn store_file(
        &self,
        name: &str,
        content: String,
        last_modified: Option<String>,
    ) -> Result<(), MedidictError> {
        let mut files: HashMap<String, CachedFile> = self.read(FILE_CACHE_FILE);
        files.insert(name.to_string(), CachedFile { content, last_modified, saved_at: Utc::now() });
        self.write(FILE_CACHE_FILE, &files)
    }
}

/// Count of records with local edits not yet confirmed remote, across both
/// collections. Shown next to the sync button.
pub fn dirty_count(terms: &[TermRecord], review: &[ReviewRecord]) -> usize {
    terms.iter().filter(|record| record.dirty).count()
        + review.iter().filter(|record| record.dirty).count()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn temp_cache() -> LocalCache {
        LocalCache::in_dir(std::env::temp_dir().join(format!("medidict-test-{}", Uuid::new_v4())))
    }

    #[test]
    fn empty_cache_loads_empty_collections() {
        let cache = temp_cache();

        assert!(cache.load_terms().is_empty());
        assert!(cache.load_review().is_empty());
        assert_eq!(cache.dirty_count(), 0);
        assert_eq!(cache.last_sync(), None);
    }

    #[test]
    fn terms_round_trip_with_dirty_count() {
        let cache = temp_cache();
        let records = vec![
            TermRecord { english: Some("kidney".to_string()), dirty: true, ..Default::default() },
            TermRecord {
                id: Some("t1".to_string()),
                english: Some("liver".to_string()),
                ..Default::default()
            },
        ];

        cache.save_terms(&records).unwrap();

        assert_eq!(cache.load_terms(), records);
        assert_eq!(cache.dirty_count(), 1);
    }

    #[test]
    fn dirty_count_spans_both_kinds() {
        let terms = vec![TermRecord { dirty: true, ..Default::default() }];
        let review =
            vec![ReviewRecord { dirty: true, ..Default::default() }, ReviewRecord::default()];

        assert_eq!(dirty_count(&terms, &review), 2);
    }

    #[test]
    fn last_sync_round_trips() {
        let cache = temp_cache();
        let when = Utc::now();

        cache.set_last_sync(when).unwrap();

        assert_eq!(cache.last_sync(), Some(when));
    }

    #[test]
    fn file_cache_stores_per_logical_name() {
        let cache = temp_cache();

        cache.store_file(TERMS_FILE_ID, "a,b\n".to_string(), Some("stamp-1".to_string())).unwrap();
        cache.store_file(TRANSLATIONS_FILE_ID, "key,en\n".to_string(), None).unwrap();

        let terms = cache.cached_file(TERMS_FILE_ID).unwrap();
        assert_eq!(terms.content, "a,b\n");
        assert_eq!(terms.last_modified.as_deref(), Some("stamp-1"));
        assert!(cache.cached_file("muscles").is_none());
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let cache = temp_cache();
        std::fs::write(cache.path(TERMS_FILE), "not json").unwrap();

        assert!(cache.load_terms().is_empty());
    }
}
