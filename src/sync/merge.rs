use std::collections::HashMap;

use super::SyncRecord;

/// Identity of a record during one merge. Id-less local records get their own
/// variant so no backend id, whatever it is named, can ever collide with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MergeKey {
    Id(String),
    New(usize),
}

/// Deterministic reconciliation of a local and a remote record collection.
///
/// Every remote record seeds the result as clean. A dirty local record with a
/// known id shadows its remote counterpart wholesale; a clean one yields to
/// the remote version. Identified locals the remote has never seen pass
/// through with their dirty flag, and id-less locals are always kept as new
/// records, forced dirty. Output order is remote order first, then new local
/// records in input order, so repeated merges are idempotent.
pub fn merge<T: SyncRecord>(local: &[T], remote: &[T]) -> Vec<T> {
    let mut order: Vec<MergeKey> = Vec::new();
    let mut by_key: HashMap<MergeKey, T> = HashMap::new();

    for record in remote {
        let Some(id) = record.id() else {
            continue;
        };
        let mut record = record.clone();
        record.set_dirty(false);
        let key = MergeKey::Id(id.to_string());
        if by_key.insert(key.clone(), record).is_none() {
            order.push(key);
        }
    }

    let mut synthetic = 0usize;
    for record in local {
        match record.id() {
            Some(id) => {
                let key = MergeKey::Id(id.to_string());
                if by_key.contains_key(&key) {
                    if record.dirty() {
                        by_key.insert(key, record.clone());
                    }
                } else {
                    by_key.insert(key.clone(), record.clone());
                    order.push(key);
                }
            }
            None => {
                let key = MergeKey::New(synthetic);
                synthetic += 1;

                let mut record = record.clone();
                record.set_dirty(true);
                by_key.insert(key.clone(), record);
                order.push(key);
            }
        }
    }

    order.into_iter().filter_map(|key| by_key.remove(&key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::TermRecord;

    fn record(id: Option<&str>, english: &str, dirty: bool) -> TermRecord {
        TermRecord {
            id: id.map(|id| id.to_string()),
            english: Some(english.to_string()),
            dirty,
            ..Default::default()
        }
    }

    #[test]
    fn one_entry_per_identity_plus_new_locals() {
        let local = vec![
            record(Some("a"), "local a", true),
            record(Some("c"), "local c", false),
            record(None, "brand new", true),
        ];
        let remote = vec![record(Some("a"), "remote a", false), record(Some("b"), "remote b", false)];

        let merged = merge(&local, &remote);

        // a, b, c plus one synthetic entry for the id-less local.
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn dirty_local_shadows_remote() {
        let local = vec![record(Some("x"), "edited offline", true)];
        let remote = vec![record(Some("x"), "server copy", false)];

        let merged = merge(&local, &remote);

        assert_eq!(merged.len(), 1);
        assert!(merged[0].dirty);
        assert_eq!(merged[0].english.as_deref(), Some("edited offline"));
    }

    #[test]
    fn clean_local_is_overwritten_by_remote() {
        let local = vec![record(Some("x"), "stale copy", false)];
        let remote = vec![record(Some("x"), "server copy", false)];

        let merged = merge(&local, &remote);

        assert_eq!(merged[0].english.as_deref(), Some("server copy"));
        assert!(!merged[0].dirty);
    }

    #[test]
    fn remote_only_record_passes_through_clean() {
        let remote = vec![record(Some("x"), "server copy", true)];

        let merged = merge(&[], &remote);

        // Remote records are authoritative and never dirty, whatever the
        // fetched payload claims.
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].dirty);
        assert_eq!(merged[0].english.as_deref(), Some("server copy"));
    }

    #[test]
    fn id_less_local_is_forced_dirty() {
        let local = vec![record(None, "offline entry", false)];

        let merged = merge(&local, &[]);

        assert_eq!(merged.len(), 1);
        assert!(merged[0].dirty);
        assert_eq!(merged[0].id, None);
    }

    #[test]
    fn id_less_locals_never_collide_with_backend_ids() {
        // A backend is free to name an id anything, including something that
        // looks like a placeholder.
        let local = vec![record(None, "offline entry", true)];
        let remote = vec![record(Some("local-0"), "server copy", false)];

        let merged = merge(&local, &remote);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id.as_deref(), Some("local-0"));
        assert_eq!(merged[0].english.as_deref(), Some("server copy"));
        assert_eq!(merged[1].id, None);
    }

    #[test]
    fn id_less_locals_stay_distinct() {
        let local = vec![record(None, "one", true), record(None, "two", true)];

        let merged = merge(&local, &[]);

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let local = vec![
            record(Some("a"), "local a", true),
            record(Some("c"), "local c", true),
            record(None, "new", true),
        ];
        let remote = vec![record(Some("a"), "remote a", false), record(Some("b"), "remote b", false)];

        let once = merge(&local, &remote);
        let twice = merge(&once, &remote);

        assert_eq!(once, twice);
    }

    #[test]
    fn order_is_remote_first_then_new_locals() {
        let local = vec![record(Some("c"), "c", true), record(None, "new", true)];
        let remote = vec![record(Some("a"), "a", false), record(Some("b"), "b", false)];

        let merged = merge(&local, &remote);
        let ids: Vec<Option<&str>> = merged.iter().map(|r| r.id.as_deref()).collect();

        assert_eq!(ids, vec![Some("a"), Some("b"), Some("c"), None]);
    }
}
