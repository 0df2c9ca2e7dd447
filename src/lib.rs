//! Keycoding: language-learning dashboard content
//!
//! Each language's dashboard is one JSON document of structured learning
//! content (quick-start snippets, concepts, task groups, projects, glossary,
//! tips, built-ins, standard-library references, tools and links).
//!
//! # Core Concepts
//!
//! - **Normalization**: any stored JSON, however damaged, is turned into a
//!   canonical [`LanguageDocument`]
//! - **Actions**: named, validated edits applied to a document in place
//! - **Stores**: whole-document load and save, keyed by language slug
//!
//! # Example
//!
//! ```
//! use keycoding::{apply, normalize, Payload};
//! use serde_json::json;
//!
//! let mut doc = normalize(&json!({"name": "Rust", "slug": "rust"}));
//! let form = Payload::new()
//!     .with("term", "Borrow")
//!     .with("definition", "A reference to a value.");
//! let message = apply(&mut doc, "add_glossary", &form).unwrap();
//! assert_eq!(message, "Glossary entry added");
//! assert_eq!(doc.glossary.len(), 1);
//! ```

pub mod action;
pub mod api;
pub mod catalog;
pub mod config;
pub mod langdata;
pub mod storage;

pub use action::{apply, apply_action, Action, Payload, ValidationError, ValidationResult};
pub use api::{
    Access, ApiError, ApiResult, LangDataApi, LanguageView, NormalizeReport, NormalizeStatus,
};
pub use catalog::{Catalog, Category, LanguageRef};
pub use config::{Config, ConfigError};
pub use langdata::{normalize, LanguageDocument};
pub use storage::{DocumentStore, JsonFileStore, MemoryStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
