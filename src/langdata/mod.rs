//! Language document model and schema normalization

mod document;
mod normalize;


pub use document::{
    title_case, BuiltinEntry, ConceptEntry, DocumentSummary, GlossaryEntry, LanguageDocument,
    LinkEntry, ProjectEntry, ProjectStep, QuickStartEntry, StdlibEntry, TaskEntry, TaskGroup,
    TipEntry, ToolEntry,
};
pub use normalize::{normalize, value_to_text};
