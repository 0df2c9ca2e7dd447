//! Action engine: validated, in-place edits of a language document
//!
//! Callers hand in a canonical [`LanguageDocument`](crate::LanguageDocument),
//! an action identifier and the submitted form. The engine never touches
//! storage; persisting the edited document is the caller's job.

mod engine;
mod error;
mod kind;
mod payload;


pub use engine::{apply, apply_action};
pub use error::{ValidationError, ValidationResult};
pub use kind::Action;
pub use payload::Payload;
