//! Durable, domain-keyed storage of discovered product URLs.
//!
//! The store is a single JSON file mapping each domain to its set of
//! product URLs. Every save runs read-merge-write over the whole file, so
//! repeated runs are idempotent: a URL once stored stays stored, and
//! duplicates collapse. The sequence assumes a single writer.

use crate::crawler::CrawlResults;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Persisted record: domain → deduplicated set of product URLs.
pub type StoredResults = BTreeMap<String, BTreeSet<String>>;

/// JSON-file-backed result store with append-only merge semantics.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted record.
    ///
    /// A missing, unreadable, or corrupt file loads as an empty record.
    pub fn load(&self) -> StoredResults {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => StoredResults::new(),
        }
    }

    /// Rewrite the full record to disk as pretty-printed JSON.
    pub fn persist(&self, record: &StoredResults) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write results to {}", self.path.display()))?;
        info!("results saved to {}", self.path.display());
        Ok(())
    }

    /// Merge `results` into the persisted record and rewrite it.
    pub fn save(&self, results: &CrawlResults) -> Result<()> {
        let mut record = self.load();
        merge_results(&mut record, results);
        self.persist(&record)
    }
}

/// Union newly discovered URLs into the record, deduplicating per domain.
pub fn merge_results(record: &mut StoredResults, results: &CrawlResults) {
    for (domain, urls) in results {
        record
            .entry(domain.clone())
            .or_default()
            .extend(urls.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn results(domain: &str, urls: &[&str]) -> CrawlResults {
        let mut r = CrawlResults::new();
        r.insert(domain.to_string(), urls.iter().map(|u| u.to_string()).collect());
        r
    }

    #[test]
    fn test_merge_unions_and_dedupes() {
        let mut record = StoredResults::new();
        merge_results(&mut record, &results("https://x.com", &["a", "b", "a"]));
        merge_results(&mut record, &results("https://x.com", &["b", "c"]));

        let stored = record.get("https://x.com").unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.contains("a") && stored.contains("b") && stored.contains("c"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let new = results("https://x.com", &["a", "b"]);

        let mut once = StoredResults::new();
        merge_results(&mut once, &new);

        let mut twice = once.clone();
        merge_results(&mut twice, &new);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_save_twice_does_not_double_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.json"));
        let new = results("https://x.com", &["https://x.com/product/1"]);

        store.save(&new).unwrap();
        store.save(&new).unwrap();

        let data = fs::read_to_string(dir.path().join("results.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_json_eq!(
            value,
            json!({ "https://x.com": ["https://x.com/product/1"] })
        );
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, "{not json").unwrap();

        let store = ResultStore::new(&path);
        assert!(store.load().is_empty());

        // Saving over a corrupt file recovers it.
        store
            .save(&results("https://x.com", &["https://x.com/p/1"]))
            .unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_existing_domains_survive_new_runs() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.json"));

        store.save(&results("https://a.com", &["https://a.com/p/1"])).unwrap();
        store.save(&results("https://b.com", &["https://b.com/item/2"])).unwrap();

        let record = store.load();
        assert_eq!(record.len(), 2);
        assert!(record.contains_key("https://a.com"));
        assert!(record.contains_key("https://b.com"));
    }
}
