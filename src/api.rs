//! Transport-independent dashboard API.
//!
//! `LangDataApi` is the single entry point the surrounding application
//! uses. Web handlers, the CLI and tests call it; they never combine the
//! store, normalizer and action engine themselves.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;

use crate::action::{self, Payload, ValidationError};
use crate::catalog::Catalog;
use crate::langdata::{normalize, DocumentSummary, LanguageDocument};
use crate::storage::{DocumentStore, StorageError};

/// Errors surfaced to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    #[error("Only superusers can edit language data")]
    Forbidden,

    /// The edit was refused; nothing was saved
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// What the caller is allowed to do with a document
///
/// Deciding who gets `Manage` is the surrounding application's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    Manage,
}

/// A language dashboard ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub slug: String,
    /// Catalog display name
    pub display_name: &'static str,
    /// Catalog categories listing this language
    pub categories: Vec<&'static str>,
    pub document: LanguageDocument,
}

/// What `normalize_all` did with one stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeStatus {
    /// Already in canonical on-disk form
    Unchanged,
    Rewritten,
    /// Not valid JSON; left as it was for a person to repair
    Skipped,
}

/// Outcome of rewriting one stored document in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub slug: String,
    pub status: NormalizeStatus,
    /// Entry counts of the canonical document; `None` when skipped
    pub summary: Option<DocumentSummary>,
}

impl NormalizeReport {
    pub fn changed(&self) -> bool {
        self.status == NormalizeStatus::Rewritten
    }
}

/// Single entry point for dashboard reads and edits
#[derive(Clone)]
pub struct LangDataApi {
    store: Arc<dyn DocumentStore>,
    catalog: Catalog,
    /// Per-slug edit gates; edits on one document never interleave
    gates: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LangDataApi {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            catalog: Catalog,
            gates: Arc::new(DashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // --- Read ---

    /// Load a language dashboard.
    ///
    /// Missing or corrupt documents come back as an empty canonical
    /// document named after the catalog entry.
    pub fn view(&self, slug: &str) -> ApiResult<LanguageView> {
        let display_name = self.resolve(slug)?;
        let document = self.load_canonical(slug, display_name)?;
        Ok(LanguageView {
            slug: slug.to_string(),
            display_name,
            categories: self.catalog.categories_of(display_name),
            document,
        })
    }

    // --- Write ---

    /// Apply one editing action and persist the result.
    ///
    /// Runs load, normalize, apply and save under the document's edit gate.
    /// A refused action returns [`ApiError::Validation`] and saves nothing.
    pub fn edit(
        &self,
        slug: &str,
        access: Access,
        action_id: &str,
        payload: &Payload,
    ) -> ApiResult<String> {
        let display_name = self.resolve(slug)?;
        if access != Access::Manage {
            tracing::warn!(slug, action = action_id, "edit refused for read-only caller");
            return Err(ApiError::Forbidden);
        }

        let gate = self.gate(slug);
        // a poisoned gate only means an earlier edit panicked; the store is still whole
        let _guard = gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut document = self.load_canonical(slug, display_name)?;
        let message = match action::apply(&mut document, action_id, payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(slug, action = action_id, reason = %e, "edit refused");
                return Err(e.into());
            }
        };
        self.store.save(slug, &document)?;

        tracing::info!(slug, action = action_id, "{}", message);
        Ok(message)
    }

    // --- Maintenance ---

    /// Rewrite every stored document in canonical form.
    ///
    /// A document whose bytes already equal its canonical serialization is
    /// left untouched. A document that does not parse is skipped rather than
    /// replaced by its shell.
    pub fn normalize_all(&self) -> ApiResult<Vec<NormalizeReport>> {
        let mut reports = Vec::new();
        for slug in self.store.list()? {
            let gate = self.gate(&slug);
            let _guard = gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

            let Some(bytes) = self.store.read(&slug)? else {
                continue;
            };
            let raw: serde_json::Value = match serde_json::from_slice(&bytes) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(slug = %slug, error = %e, "skipping corrupt language document");
                    reports.push(NormalizeReport {
                        slug,
                        status: NormalizeStatus::Skipped,
                        summary: None,
                    });
                    continue;
                }
            };

            let document = normalize(&raw);
            let canonical = document.to_pretty_json().map_err(StorageError::from)?;
            let status = if canonical.as_bytes() == bytes.as_slice() {
                NormalizeStatus::Unchanged
            } else {
                self.store.save(&slug, &document)?;
                tracing::info!(slug = %slug, "normalized language document");
                NormalizeStatus::Rewritten
            };
            reports.push(NormalizeReport {
                summary: Some(document.summary()),
                slug,
                status,
            });
        }
        Ok(reports)
    }

    // --- Helpers ---

    fn resolve(&self, slug: &str) -> ApiResult<&'static str> {
        self.catalog
            .find(slug)
            .ok_or_else(|| ApiError::LanguageNotFound(slug.to_string()))
    }

    /// Load and normalize, filling blank name and slug from the catalog
    fn load_canonical(&self, slug: &str, display_name: &str) -> ApiResult<LanguageDocument> {
        let raw = self.store.load(slug)?;
        let mut document = normalize(&raw);
        if document.name.is_empty() {
            document.name = display_name.to_string();
        }
        if document.slug.is_empty() {
            document.slug = slug.to_string();
        }
        Ok(document)
    }

    fn gate(&self, slug: &str) -> Arc<Mutex<()>> {
        self.gates
            .entry(slug.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
