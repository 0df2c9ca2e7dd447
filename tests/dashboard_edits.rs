//! End-to-end edit flow: load, normalize, apply, save against files on disk

mod common;

use common::{TestDashboard, PYTHON_DOCUMENT};
use keycoding::{Access, ApiError, DocumentStore, NormalizeStatus, Payload, ValidationError};
use serde_json::{json, Value};

fn stored(dash: &TestDashboard, slug: &str) -> Value {
    serde_json::from_str(&dash.read_raw(slug).expect("document saved")).expect("valid JSON")
}

fn task_form(group_index: &str, task_index: &str, title: &str, group: &str) -> Payload {
    Payload::new()
        .with("group_index", group_index)
        .with("task_index", task_index)
        .with("title", title)
        .with("group", group)
}

#[test]
fn first_edit_creates_the_document() {
    let dash = TestDashboard::new();
    assert!(dash.read_raw("rust").is_none());

    let form = Payload::new().with("term", "API").with("definition", "Interface.");
    let msg = dash.api.edit("rust", Access::Manage, "add_glossary", &form).unwrap();
    assert_eq!(msg, "Glossary entry added");

    let doc = stored(&dash, "rust");
    assert_eq!(doc["name"], "Rust");
    assert_eq!(doc["slug"], "rust");
    assert_eq!(doc["glossary"], json!([{"term": "API", "definition": "Interface."}]));
    assert!(dash.read_raw("rust").unwrap().ends_with("}\n"));
}

#[test]
fn edit_canonicalizes_the_rest_of_the_document() {
    let dash = TestDashboard::new();
    dash.write_raw("python", PYTHON_DOCUMENT);

    dash.api
        .edit("python", Access::Manage, "add_tip", &Payload::new().with("note", "Use venvs"))
        .unwrap();

    let doc = stored(&dash, "python");
    assert_eq!(
        doc["tools"],
        json!([
            {"name": "pip", "description": ""},
            {"name": "black", "description": ""}
        ])
    );
    assert_eq!(doc["common_tasks"][0]["tasks"][1], json!({"title": "Write", "description": "", "code": ""}));
    assert_eq!(doc["generated_by"], "gen_python_builtins");
    assert_eq!(doc["tips"], json!([{"title": "", "note": "Use venvs"}]));
}

#[test]
fn refused_edit_leaves_file_untouched() {
    let dash = TestDashboard::new();
    dash.write_raw("python", PYTHON_DOCUMENT);

    let form = Payload::new().with("term", "").with("definition", "x");
    let err = dash.api.edit("python", Access::Manage, "add_glossary", &form).unwrap_err();
    assert_eq!(err.to_string(), "Glossary term is required");
    assert_eq!(dash.read_raw("python").unwrap(), PYTHON_DOCUMENT);

    let form = Payload::new().with("index", "1").with("title", "t");
    let err = dash.api.edit("python", Access::Manage, "update_quick_start", &form).unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::NotFound(_))));
    assert_eq!(dash.read_raw("python").unwrap(), PYTHON_DOCUMENT);
}

#[test]
fn corrupt_document_is_served_as_shell_and_replaced_on_edit() {
    let dash = TestDashboard::new();
    dash.write_raw("go", "{\"name\": \"Go\", \"tips\": [");

    let view = dash.api.view("go").unwrap();
    assert_eq!(view.document.name, "Go");
    assert_eq!(view.document.slug, "go");
    assert!(view.document.tips.is_empty());

    dash.api
        .edit("go", Access::Manage, "add_tool", &Payload::new().with("name", "gofmt"))
        .unwrap();
    let doc = stored(&dash, "go");
    assert_eq!(doc["tools"], json!([{"name": "gofmt", "description": ""}]));
}

#[test]
fn task_regrouping_scenarios() {
    let dash = TestDashboard::new();
    dash.write_raw("python", PYTHON_DOCUMENT);

    // same group: position kept
    let msg = dash
        .api
        .edit("python", Access::Manage, "update_common_task", &task_form("0", "0", "Read2", "IO"))
        .unwrap();
    assert_eq!(msg, "Task updated");
    let doc = stored(&dash, "python");
    assert_eq!(doc["common_tasks"][0]["tasks"][0]["title"], "Read2");
    assert_eq!(doc["common_tasks"][0]["tasks"][1]["title"], "Write");

    // move to a new group: appended as its own group
    dash.api
        .edit("python", Access::Manage, "update_common_task", &task_form("0", "1", "Write", "Files"))
        .unwrap();
    let doc = stored(&dash, "python");
    assert_eq!(doc["common_tasks"].as_array().unwrap().len(), 2);
    assert_eq!(doc["common_tasks"][1]["group"], "Files");

    // moving the last task out of IO deletes IO
    dash.api
        .edit("python", Access::Manage, "update_common_task", &task_form("0", "0", "Read2", "Files"))
        .unwrap();
    let doc = stored(&dash, "python");
    assert_eq!(
        doc["common_tasks"],
        json!([{"group": "Files", "tasks": [
            {"title": "Write", "description": "", "code": ""},
            {"title": "Read2", "description": "", "code": ""}
        ]}])
    );

    // blank group drops the task
    dash.api
        .edit("python", Access::Manage, "update_common_task", &task_form("0", "0", "Write", ""))
        .unwrap();
    let doc = stored(&dash, "python");
    assert_eq!(doc["common_tasks"][0]["tasks"].as_array().unwrap().len(), 1);
}

#[test]
fn project_steps_round_trip_through_disk() {
    let dash = TestDashboard::new();
    dash.write_raw("python", PYTHON_DOCUMENT);

    let step = Payload::new()
        .with("project_index", "0")
        .with("title", "Parse args")
        .with("code", "import argparse\r\n");
    let msg = dash.api.edit("python", Access::Manage, "add_project_step", &step).unwrap();
    assert_eq!(msg, "Project step added");

    let view = dash.api.view("python").unwrap();
    let steps = &view.document.projects[0].steps;
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].code, "import argparse");
}

#[test]
fn read_only_access_never_writes() {
    let dash = TestDashboard::new();
    let form = Payload::new().with("name", "cargo");
    let err = dash.api.edit("rust", Access::ReadOnly, "add_tool", &form).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
    assert!(dash.read_raw("rust").is_none());
}

#[test]
fn normalize_all_reports_each_file() {
    let dash = TestDashboard::new();
    dash.write_raw("python", PYTHON_DOCUMENT);
    dash.api
        .edit("lua", Access::Manage, "add_tool", &Payload::new().with("name", "luarocks"))
        .unwrap();

    let reports = dash.api.normalize_all().unwrap();
    let flags: Vec<(&str, bool)> = reports.iter().map(|r| (r.slug.as_str(), r.changed())).collect();
    assert_eq!(flags, vec![("lua", false), ("python", true)]);
    assert_eq!(reports[1].summary.map(|s| s.tasks), Some(2));

    assert_eq!(dash.store.list().unwrap(), vec!["lua".to_string(), "python".to_string()]);
    assert!(dash.api.normalize_all().unwrap().iter().all(|r| !r.changed()));
}

#[test]
fn normalize_all_skips_files_that_do_not_parse() {
    let dash = TestDashboard::new();
    let damaged = r#"{"name": "Go", "glossary": [{"term": "goroutine", "definition": "A green thread."},]}"#;
    dash.write_raw("go", damaged);
    dash.write_raw("python", PYTHON_DOCUMENT);

    let reports = dash.api.normalize_all().unwrap();
    assert_eq!(reports[0].slug, "go");
    assert_eq!(reports[0].status, NormalizeStatus::Skipped);
    assert_eq!(reports[0].summary, None);
    assert_eq!(reports[1].status, NormalizeStatus::Rewritten);

    assert_eq!(dash.read_raw("go").unwrap(), damaged);
}

#[test]
fn normalize_all_adds_missing_trailing_newline() {
    let dash = TestDashboard::new();
    dash.api
        .edit("lua", Access::Manage, "add_tool", &Payload::new().with("name", "luarocks"))
        .unwrap();
    let pretty = dash.read_raw("lua").unwrap();
    dash.write_raw("lua", pretty.trim_end());

    let reports = dash.api.normalize_all().unwrap();
    assert_eq!(reports[0].status, NormalizeStatus::Rewritten);
    assert_eq!(dash.read_raw("lua").unwrap(), pretty);
}
