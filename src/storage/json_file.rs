//! Directory-of-JSON-files storage backend

use super::traits::{check_slug, DocumentStore, StorageResult};
use crate::langdata::LanguageDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each language as `<root>/<slug>.json`
///
/// Saves write a sibling temporary file and rename it over the target, so
/// readers see either the previous document or the new one in full.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the backing file for `slug`
    pub fn path_for(&self, slug: &str) -> StorageResult<PathBuf> {
        check_slug(slug)?;
        Ok(self.root.join(format!("{slug}.json")))
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self, slug: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(slug)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, slug: &str, document: &LanguageDocument) -> StorageResult<()> {
        let path = self.path_for(slug)?;
        fs::create_dir_all(&self.root)?;

        let text = document.to_pretty_json()?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(slug, path = %path.display(), "saved language document");
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut slugs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if check_slug(stem).is_ok() {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::langdata::{normalize, GlossaryEntry};
    use crate::storage::StorageError;
    use serde_json::json;

    fn create_test_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("langdata"));
        (dir, store)
    }

    #[test]
    fn missing_document_loads_as_shell() {
        let (_dir, store) = create_test_store();
        let raw = store.load("python").unwrap();
        assert_eq!(raw, json!({"name": "Python", "slug": "python"}));
    }

    #[test]
    fn corrupt_document_loads_as_shell() {
        let (_dir, store) = create_test_store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path_for("go").unwrap(), "{\"name\": \"Go\", ").unwrap();

        let raw = store.load("go").unwrap();
        assert_eq!(raw, json!({"name": "Go", "slug": "go"}));
    }

    #[test]
    fn read_returns_stored_bytes_verbatim() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.read("go").unwrap(), None);

        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path_for("go").unwrap(), "{\"name\": \"Go\", ").unwrap();
        assert_eq!(store.read("go").unwrap(), Some(b"{\"name\": \"Go\", ".to_vec()));
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let (_dir, store) = create_test_store();
        let mut doc = normalize(&json!({"name": "Rust", "slug": "rust"}));
        doc.glossary.push(GlossaryEntry {
            term: "Borrow".into(),
            definition: "A reference.".into(),
        });

        store.save("rust", &doc).unwrap();
        let loaded = normalize(&store.load("rust").unwrap());
        assert_eq!(loaded, doc);
    }

    #[test]
    fn save_writes_pretty_json_with_newline() {
        let (_dir, store) = create_test_store();
        let doc = normalize(&json!({"name": "C", "slug": "c"}));
        store.save("c", &doc).unwrap();

        let text = fs::read_to_string(store.path_for("c").unwrap()).unwrap();
        assert_eq!(text, doc.to_pretty_json().unwrap());
        assert!(text.ends_with('\n'));
        assert!(!store.root().join("c.json.tmp").exists());
    }

    #[test]
    fn save_replaces_whole_document() {
        let (_dir, store) = create_test_store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path_for("lua").unwrap(), r#"{"name": "Lua", "tips": ["a", "b"]}"#).unwrap();

        let doc = normalize(&json!({"name": "Lua"}));
        store.save("lua", &doc).unwrap();

        let loaded = normalize(&store.load("lua").unwrap());
        assert!(loaded.tips.is_empty());
    }

    #[test]
    fn list_returns_sorted_json_stems() {
        let (_dir, store) = create_test_store();
        assert!(store.list().unwrap().is_empty());

        let doc = normalize(&json!({}));
        store.save("zig", &doc).unwrap();
        store.save("ada", &doc).unwrap();
        fs::write(store.root().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["ada".to_string(), "zig".to_string()]);
    }

    #[test]
    fn invalid_slug_is_rejected() {
        let (_dir, store) = create_test_store();
        assert!(matches!(store.load("../secrets"), Err(StorageError::InvalidSlug(_))));
        let doc = normalize(&json!({}));
        assert!(matches!(store.save("a/b", &doc), Err(StorageError::InvalidSlug(_))));
    }
}
