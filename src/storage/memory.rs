//! In-memory storage backend

use super::traits::{check_slug, DocumentStore, StorageResult};
use crate::langdata::LanguageDocument;
use dashmap::DashMap;

/// Keeps serialized documents in memory
///
/// Holds the same text a [`JsonFileStore`](super::JsonFileStore) would
/// write, so shell substitution for corrupt content behaves identically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text for `slug`, bypassing serialization
    pub fn insert_raw(&self, slug: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(slug.into(), text.into());
    }

    /// The stored text for `slug`, if any
    pub fn raw(&self, slug: &str) -> Option<String> {
        self.documents.get(slug).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, slug: &str) -> StorageResult<Option<Vec<u8>>> {
        check_slug(slug)?;
        Ok(self.documents.get(slug).map(|text| text.as_bytes().to_vec()))
    }

    fn save(&self, slug: &str, document: &LanguageDocument) -> StorageResult<()> {
        check_slug(slug)?;
        let text = document.to_pretty_json()?;
        self.documents.insert(slug.to_string(), text);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let mut slugs: Vec<String> = self.documents.iter().map(|r| r.key().clone()).collect();
        slugs.sort();
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::langdata::normalize;
    use serde_json::json;

    #[test]
    fn missing_and_corrupt_both_yield_shell() {
        let store = MemoryStore::new();
        store.insert_raw("ruby", "<<garbage>>");

        assert_eq!(store.load("ruby").unwrap(), json!({"name": "Ruby", "slug": "ruby"}));
        assert_eq!(store.load("perl").unwrap(), json!({"name": "Perl", "slug": "perl"}));
    }

    #[test]
    fn save_stores_canonical_text() {
        let store = MemoryStore::new();
        let doc = normalize(&json!({"name": "Nim", "version": "2.0"}));
        store.save("nim", &doc).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.raw("nim").unwrap(), doc.to_pretty_json().unwrap());
        assert_eq!(normalize(&store.load("nim").unwrap()), doc);
        assert_eq!(store.list().unwrap(), vec!["nim".to_string()]);
    }
}
