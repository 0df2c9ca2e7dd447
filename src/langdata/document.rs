//! Typed records for a language dashboard document
//!
//! Field order in each struct is the on-disk key order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A short runnable snippet shown in the Quick Start panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickStartEntry {
    pub title: String,
    pub description: String,
    pub code: String,
}

/// A core language concept with an optional code sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptEntry {
    /// Stable anchor used by the dashboard (`concept_id` in form payloads)
    pub id: String,
    pub title: String,
    pub tag: String,
    pub description: String,
    pub code: String,
}

/// A single task inside a [`TaskGroup`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskEntry {
    pub title: String,
    pub description: String,
    pub code: String,
}

/// Named group of common tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskGroup {
    pub group: String,
    pub tasks: Vec<TaskEntry>,
}

impl TaskGroup {
    pub fn new(group: impl Into<String>, task: TaskEntry) -> Self {
        Self {
            group: group.into(),
            tasks: vec![task],
        }
    }
}

/// One presentation fragment of a project walkthrough
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStep {
    pub title: String,
    pub text: String,
    pub code: String,
}

impl ProjectStep {
    /// Steps carry no mandatory field, but an all-empty step is meaningless.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.text.is_empty() && self.code.is_empty()
    }
}

/// A guided project made of ordered steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub steps: Vec<ProjectStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipEntry {
    pub title: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// A built-in function, type or constant of the language runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinEntry {
    pub name: String,
    pub kind: String,
    pub signature: String,
    pub description: String,
}

/// A standard-library module reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdlibEntry {
    pub name: String,
    pub description: String,
}

/// The full content record behind one language dashboard
///
/// Built by [`normalize`](super::normalize), which guarantees every
/// collection is present and every element has exactly its record shape.
/// Top-level keys this model does not know about are carried in `extra`
/// and written back after the known fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageDocument {
    pub name: String,
    pub slug: String,
    pub version: String,
    pub quick_start: Vec<QuickStartEntry>,
    pub concepts: Vec<ConceptEntry>,
    pub common_tasks: Vec<TaskGroup>,
    pub projects: Vec<ProjectEntry>,
    pub glossary: Vec<GlossaryEntry>,
    pub tips: Vec<TipEntry>,
    pub tools: Vec<ToolEntry>,
    pub links: Vec<LinkEntry>,
    pub builtins: Vec<BuiltinEntry>,
    pub stdlib: Vec<StdlibEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LanguageDocument {
    /// Top-level keys owned by the typed model
    pub const FIELDS: [&'static str; 13] = [
        "name",
        "slug",
        "version",
        "quick_start",
        "concepts",
        "common_tasks",
        "projects",
        "glossary",
        "tips",
        "tools",
        "links",
        "builtins",
        "stdlib",
    ];

    /// The raw stand-in used when a stored document is missing or unreadable
    pub fn shell(slug: &str) -> Value {
        let mut shell = Map::new();
        shell.insert("name".to_string(), Value::String(title_case(slug)));
        shell.insert("slug".to_string(), Value::String(slug.to_string()));
        Value::Object(shell)
    }

    /// Per-collection entry counts, in schema order
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            quick_start: self.quick_start.len(),
            concepts: self.concepts.len(),
            common_tasks: self.common_tasks.len(),
            tasks: self.common_tasks.iter().map(|g| g.tasks.len()).sum(),
            projects: self.projects.len(),
            glossary: self.glossary.len(),
            tips: self.tips.len(),
            tools: self.tools.len(),
            links: self.links.len(),
            builtins: self.builtins.len(),
            stdlib: self.stdlib.len(),
        }
    }

    /// Serialize as stored on disk: two-space indentation plus trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

/// Entry counts for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub quick_start: usize,
    pub concepts: usize,
    /// Number of task groups
    pub common_tasks: usize,
    /// Number of tasks across all groups
    pub tasks: usize,
    pub projects: usize,
    pub glossary: usize,
    pub tips: usize,
    pub tools: usize,
    pub links: usize,
    pub builtins: usize,
    pub stdlib: usize,
}

impl std::fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "quick_start:{}, concepts:{}, common_tasks:{}, projects:{}, glossary:{}, tips:{}",
            self.quick_start, self.concepts, self.common_tasks, self.projects, self.glossary, self.tips
        )
    }
}

/// Title-case a slug the way the shell document names it.
///
/// The first letter of every alphabetic run is upper-cased and the rest of
/// the run lower-cased, so `objective-c` becomes `Objective-C`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
