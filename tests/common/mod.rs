//! Shared fixtures for keycoding integration tests

use keycoding::{JsonFileStore, LangDataApi};
use std::path::Path;
use std::sync::Arc;

/// A file-backed API over a fresh temporary content directory
pub struct TestDashboard {
    _dir: tempfile::TempDir,
    pub store: Arc<JsonFileStore>,
    pub api: LangDataApi,
}

impl TestDashboard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = Arc::new(JsonFileStore::new(dir.path().join("langdata")));
        let api = LangDataApi::new(store.clone());
        Self {
            _dir: dir,
            store,
            api,
        }
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Write raw text as the stored document for `slug`
    pub fn write_raw(&self, slug: &str, text: &str) {
        std::fs::create_dir_all(self.root()).expect("create langdata dir");
        std::fs::write(self.root().join(format!("{slug}.json")), text).expect("write document");
    }

    pub fn read_raw(&self, slug: &str) -> Option<String> {
        std::fs::read_to_string(self.root().join(format!("{slug}.json"))).ok()
    }
}

/// A stored document in the shape the dashboard writes, with one damaged collection
pub const PYTHON_DOCUMENT: &str = r#"{
  "name": "Python",
  "slug": "python",
  "version": "3.12",
  "quick_start": [
    {"title": "Hello", "description": "", "code": "print('hi')"}
  ],
  "common_tasks": [
    {"group": "IO", "tasks": [{"title": "Read"}, {"title": "Write"}]}
  ],
  "projects": [
    {"title": "CLI", "summary": "", "description": "", "steps": []}
  ],
  "tools": ["pip", {"title": "black"}],
  "generated_by": "gen_python_builtins"
}
"#;
