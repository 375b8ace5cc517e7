use crate::store::IdStore;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// All listing ids ever observed, across every run.
///
/// Membership is hash-based; the set only ever grows. Persisted as a JSON
/// array of strings under a single store key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the persisted set from the store. A missing key or an
    /// unreadable value is treated as "no prior state", never as a fatal
    /// error, so a first run bootstraps from empty.
    pub fn load(store: &dyn IdStore, key: &str) -> Self {
        let bytes = match store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return SeenSet::new(),
            Err(e) => {
                eprintln!("Could not read stored ids ({}), starting from empty: {}", key, e);
                return SeenSet::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(ids) => SeenSet { ids: ids.into_iter().collect() },
            Err(e) => {
                eprintln!("Stored ids ({}) are not valid JSON, starting from empty: {}", key, e);
                SeenSet::new()
            }
        }
    }

    /// Diffs one page's batch against the set and records the whole batch
    /// as seen. Returns the new ids, deduplicated, in first-occurrence
    /// order within the batch. Does not persist.
    pub fn process_page(&mut self, batch: &[String]) -> Vec<String> {
        let mut new_ids = Vec::new();
        for id in batch {
            if self.ids.insert(id.clone()) {
                new_ids.push(id.clone());
            }
        }
        new_ids
    }

    /// Writes the full set through the store. Ids are sorted so the stored
    /// file is deterministic for a given set.
    pub fn persist(&self, store: &dyn IdStore, key: &str) -> Result<()> {
        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();
        let bytes = serde_json::to_vec(&ids).context("Failed to serialize seen ids")?;
        store.set(key, &bytes)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn batch(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_new_batch_with_intra_page_duplicate() {
        let mut seen = SeenSet::new();
        let new_ids = seen.process_page(&batch(&["10", "20", "10", "30"]));

        assert_eq!(new_ids, batch(&["10", "20", "30"]));
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_known_ids_are_filtered_and_batch_unioned() {
        let mut seen = SeenSet::new();
        seen.process_page(&batch(&["10", "20", "30"]));

        let new_ids = seen.process_page(&batch(&["20", "40"]));
        assert_eq!(new_ids, batch(&["40"]));
        assert_eq!(seen.len(), 4);
        assert!(seen.contains("20"));
    }

    #[test]
    fn test_reprocessing_same_batch_yields_nothing() {
        let mut seen = SeenSet::new();
        let page = batch(&["1", "2", "3"]);
        seen.process_page(&page);

        assert!(seen.process_page(&page).is_empty());
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_set_grows_monotonically() {
        let mut seen = SeenSet::new();
        let mut previous = seen.clone();

        for page in [batch(&["1", "2"]), batch(&[]), batch(&["2", "3"]), batch(&["1"])] {
            seen.process_page(&page);
            assert!(previous.len() <= seen.len());
            for id in ["1", "2", "3"] {
                if previous.contains(id) {
                    assert!(seen.contains(id));
                }
            }
            previous = seen.clone();
        }
    }

    #[test]
    fn test_new_ids_preserve_first_occurrence_order() {
        let mut seen = SeenSet::new();
        seen.process_page(&batch(&["5"]));

        let new_ids = seen.process_page(&batch(&["9", "5", "7", "9", "3"]));
        assert_eq!(new_ids, batch(&["9", "7", "3"]));
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let store = MemoryStore::new();
        let mut seen = SeenSet::new();
        seen.process_page(&batch(&["10", "20", "30"]));
        seen.persist(&store, "ids").unwrap();

        let reloaded = SeenSet::load(&store, "ids");
        assert_eq!(reloaded, seen);
    }

    #[test]
    fn test_load_from_empty_store_bootstraps_empty() {
        let store = MemoryStore::new();
        let seen = SeenSet::load(&store, "ids");
        assert!(seen.is_empty());
    }

    #[test]
    fn test_load_ignores_corrupt_value() {
        let store = MemoryStore::new();
        store.set("ids", b"not json").unwrap();

        let seen = SeenSet::load(&store, "ids");
        assert!(seen.is_empty());
    }

    #[test]
    fn test_persisted_ids_are_sorted() {
        let store = MemoryStore::new();
        let mut seen = SeenSet::new();
        seen.process_page(&batch(&["30", "10", "20"]));
        seen.persist(&store, "ids").unwrap();

        let bytes = store.get("ids").unwrap().unwrap();
        let ids: Vec<String> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ids, batch(&["10", "20", "30"]));
    }
}
