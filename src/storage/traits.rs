//! Storage trait definitions

use crate::langdata::LanguageDocument;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during storage operations
///
/// A missing or unparseable document is not an error: stores substitute
/// [`LanguageDocument::shell`] instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid language slug: {0:?}")]
    InvalidSlug(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for language document backends
///
/// Saves replace the whole document. Stores perform no locking of their
/// own; callers that need one-writer-at-a-time semantics serialize access
/// per slug (see [`LangDataApi`](crate::LangDataApi)).
pub trait DocumentStore: Send + Sync {
    /// The stored bytes for `slug`, or `None` if it has no document
    fn read(&self, slug: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Load the raw document for `slug`, or its shell if absent or corrupt
    fn load(&self, slug: &str) -> StorageResult<Value> {
        match self.read(slug)? {
            Some(bytes) => Ok(parse_or_shell(slug, &bytes)),
            None => {
                tracing::debug!(slug, "no language document, using shell");
                Ok(LanguageDocument::shell(slug))
            }
        }
    }

    /// Replace the stored document for `slug`
    fn save(&self, slug: &str, document: &LanguageDocument) -> StorageResult<()>;

    /// List the slugs that currently have a stored document, sorted
    fn list(&self) -> StorageResult<Vec<String>>;
}

/// Reject slugs that cannot serve as a storage key.
///
/// Slugs name files on disk, so only ASCII alphanumerics, `-` and `_` pass.
pub fn check_slug(slug: &str) -> StorageResult<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlug(slug.to_string()))
    }
}

/// Parse stored text, falling back to the shell document.
fn parse_or_shell(slug: &str, text: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(slug, error = %e, "corrupt language document, using shell");
            LanguageDocument::shell(slug)
        }
    }
}
