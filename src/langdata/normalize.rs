//! Schema normalization: arbitrary JSON in, canonical [`LanguageDocument`] out
//!
//! Normalization is total. Every collection is rebuilt element by element,
//! in input order; malformed elements are replaced in place rather than
//! dropped, so positions stay addressable by the editing engine.

use super::document::{
    BuiltinEntry, ConceptEntry, GlossaryEntry, LanguageDocument, LinkEntry, ProjectEntry,
    ProjectStep, QuickStartEntry, StdlibEntry, TaskEntry, TaskGroup, TipEntry, ToolEntry,
};
use serde_json::{Map, Value};

/// Produce the canonical form of a raw document.
///
/// Non-object input is treated as an empty document.
pub fn normalize(raw: &Value) -> LanguageDocument {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let extra = obj
        .iter()
        .filter(|(key, _)| !LanguageDocument::FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    LanguageDocument {
        name: field(obj, "name"),
        slug: field(obj, "slug"),
        version: field(obj, "version"),
        quick_start: collection(obj.get("quick_start"), quick_start),
        concepts: collection(obj.get("concepts"), concept),
        common_tasks: collection(obj.get("common_tasks"), task_group),
        projects: collection(obj.get("projects"), project),
        glossary: collection(obj.get("glossary"), glossary_entry),
        tips: collection(obj.get("tips"), tip),
        tools: collection(obj.get("tools"), tool),
        links: collection(obj.get("links"), link),
        builtins: collection(obj.get("builtins"), builtin),
        stdlib: collection(obj.get("stdlib"), stdlib_entry),
        extra,
    }
}

/// Render any JSON value as the string a record field stores.
///
/// Strings pass through, numbers and booleans use their literal text,
/// `null` becomes empty and containers fall back to compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(value_to_text).unwrap_or_default()
}

/// First present key wins; used for legacy field names.
fn field_or(obj: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match obj.get(key) {
        Some(value) => value_to_text(value),
        None => field(obj, fallback),
    }
}

/// Scalars that can stand in for a record's primary field
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(value_to_text(value)),
        _ => None,
    }
}

/// Normalize a list-valued field.
///
/// Absent and `null` give an empty list; a lone non-list value is treated
/// as a single-element list.
fn collection<T>(value: Option<&Value>, item: fn(&Value) -> T) -> Vec<T> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(item).collect(),
        Some(single) => vec![item(single)],
    }
}

fn quick_start(value: &Value) -> QuickStartEntry {
    match value.as_object() {
        Some(obj) => QuickStartEntry {
            title: field(obj, "title"),
            description: field(obj, "description"),
            code: field(obj, "code"),
        },
        None => QuickStartEntry::default(),
    }
}

fn concept(value: &Value) -> ConceptEntry {
    match value.as_object() {
        Some(obj) => ConceptEntry {
            id: field(obj, "id"),
            title: field(obj, "title"),
            tag: field(obj, "tag"),
            description: field(obj, "description"),
            code: field(obj, "code"),
        },
        None => ConceptEntry::default(),
    }
}

fn task(value: &Value) -> TaskEntry {
    match value.as_object() {
        Some(obj) => TaskEntry {
            title: field(obj, "title"),
            description: field(obj, "description"),
            code: field(obj, "code"),
        },
        None => TaskEntry::default(),
    }
}

fn task_group(value: &Value) -> TaskGroup {
    match value.as_object() {
        Some(obj) => TaskGroup {
            group: field(obj, "group"),
            tasks: collection(obj.get("tasks"), task),
        },
        None => TaskGroup::default(),
    }
}

fn project_step(value: &Value) -> ProjectStep {
    match value.as_object() {
        Some(obj) => ProjectStep {
            title: field(obj, "title"),
            text: field(obj, "text"),
            code: field(obj, "code"),
        },
        None => ProjectStep::default(),
    }
}

fn project(value: &Value) -> ProjectEntry {
    match value.as_object() {
        Some(obj) => ProjectEntry {
            title: field(obj, "title"),
            summary: field(obj, "summary"),
            description: field(obj, "description"),
            steps: collection(obj.get("steps"), project_step),
        },
        None => ProjectEntry::default(),
    }
}

fn glossary_entry(value: &Value) -> GlossaryEntry {
    match value.as_object() {
        Some(obj) => GlossaryEntry {
            term: field(obj, "term"),
            definition: field(obj, "definition"),
        },
        None => GlossaryEntry::default(),
    }
}

fn tip(value: &Value) -> TipEntry {
    match value.as_object() {
        Some(obj) => TipEntry {
            title: field(obj, "title"),
            note: field_or(obj, "note", "text"),
        },
        None => TipEntry {
            note: scalar_text(value).unwrap_or_default(),
            ..Default::default()
        },
    }
}

fn tool(value: &Value) -> ToolEntry {
    match value.as_object() {
        Some(obj) => ToolEntry {
            name: field_or(obj, "name", "title"),
            description: field(obj, "description"),
        },
        None => ToolEntry {
            name: scalar_text(value).unwrap_or_default(),
            ..Default::default()
        },
    }
}

fn link(value: &Value) -> LinkEntry {
    match value.as_object() {
        Some(obj) => LinkEntry {
            title: field(obj, "title"),
            url: field(obj, "url"),
            description: field(obj, "description"),
        },
        None => LinkEntry {
            title: scalar_text(value).unwrap_or_default(),
            ..Default::default()
        },
    }
}

fn builtin(value: &Value) -> BuiltinEntry {
    match value.as_object() {
        Some(obj) => BuiltinEntry {
            name: field(obj, "name"),
            kind: field(obj, "kind"),
            signature: field(obj, "signature"),
            description: field(obj, "description"),
        },
        None => BuiltinEntry {
            name: scalar_text(value).unwrap_or_default(),
            ..Default::default()
        },
    }
}

fn stdlib_entry(value: &Value) -> StdlibEntry {
    match value.as_object() {
        Some(obj) => StdlibEntry {
            name: field(obj, "name"),
            description: field(obj, "description"),
        },
        None => StdlibEntry {
            name: scalar_text(value).unwrap_or_default(),
            ..Default::default()
        },
    }
}
