//! Storage backends for language documents
//!
//! Backends implement the `DocumentStore` trait. `JsonFileStore` is the
//! on-disk format the dashboard reads and writes; `MemoryStore` serves
//! embedding and tests.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{check_slug, DocumentStore, StorageError, StorageResult};
