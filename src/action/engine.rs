//! Action dispatch and per-collection handlers
//!
//! Handlers validate every input before touching the document, so a
//! refused action leaves it exactly as it was.

use super::error::{ValidationError, ValidationResult};
use super::kind::Action;
use super::payload::Payload;
use crate::langdata::{
    BuiltinEntry, ConceptEntry, GlossaryEntry, LanguageDocument, LinkEntry, ProjectEntry,
    ProjectStep, QuickStartEntry, StdlibEntry, TaskEntry, TaskGroup, TipEntry, ToolEntry,
};

/// Apply the action named `action_id` to `doc`.
///
/// Returns the confirmation notice for the editor.
pub fn apply(
    doc: &mut LanguageDocument,
    action_id: &str,
    payload: &Payload,
) -> ValidationResult<String> {
    let action = Action::parse(action_id).ok_or(ValidationError::UnrecognisedAction)?;
    apply_action(doc, action, payload)
}

/// Apply an already-parsed action to `doc`.
pub fn apply_action(
    doc: &mut LanguageDocument,
    action: Action,
    payload: &Payload,
) -> ValidationResult<String> {
    match action {
        Action::UpdateLanguageMeta => update_language_meta(doc, payload),

        Action::AddQuickStart => add::<QuickStartEntry>(doc, payload),
        Action::UpdateQuickStart => update::<QuickStartEntry>(doc, payload),
        Action::DeleteQuickStart => delete::<QuickStartEntry>(doc, payload),

        Action::AddConcept => add::<ConceptEntry>(doc, payload),
        Action::UpdateConcept => update::<ConceptEntry>(doc, payload),
        Action::DeleteConcept => delete::<ConceptEntry>(doc, payload),

        Action::AddCommonTask => add_common_task(doc, payload),
        Action::UpdateCommonTask => update_common_task(doc, payload),
        Action::DeleteCommonTask => delete_common_task(doc, payload),
        Action::RenameCommonTaskGroup => rename_common_task_group(doc, payload),
        Action::DeleteCommonTaskGroup => delete_common_task_group(doc, payload),

        Action::AddProject => add_project(doc, payload),
        Action::UpdateProject => update_project(doc, payload),
        Action::DeleteProject => delete_project(doc, payload),
        Action::AddProjectStep => add_project_step(doc, payload),
        Action::UpdateProjectStep => update_project_step(doc, payload),
        Action::DeleteProjectStep => delete_project_step(doc, payload),

        Action::AddGlossary => add::<GlossaryEntry>(doc, payload),
        Action::UpdateGlossary => update::<GlossaryEntry>(doc, payload),
        Action::DeleteGlossary => delete::<GlossaryEntry>(doc, payload),

        Action::AddTip => add::<TipEntry>(doc, payload),
        Action::UpdateTip => update::<TipEntry>(doc, payload),
        Action::DeleteTip => delete::<TipEntry>(doc, payload),

        Action::AddBuiltin => add::<BuiltinEntry>(doc, payload),
        Action::UpdateBuiltin => update::<BuiltinEntry>(doc, payload),
        Action::DeleteBuiltin => delete::<BuiltinEntry>(doc, payload),

        Action::AddStdlib => add::<StdlibEntry>(doc, payload),
        Action::UpdateStdlib => update::<StdlibEntry>(doc, payload),
        Action::DeleteStdlib => delete::<StdlibEntry>(doc, payload),

        Action::AddTool => add::<ToolEntry>(doc, payload),
        Action::UpdateTool => update::<ToolEntry>(doc, payload),
        Action::DeleteTool => delete::<ToolEntry>(doc, payload),

        Action::AddLink => add::<LinkEntry>(doc, payload),
        Action::UpdateLink => update::<LinkEntry>(doc, payload),
        Action::DeleteLink => delete::<LinkEntry>(doc, payload),
    }
}

fn required(value: String, notice: &'static str) -> ValidationResult<String> {
    if value.is_empty() {
        Err(ValidationError::Required(notice))
    } else {
        Ok(value)
    }
}

/// Parse an index field and check it addresses an element of `items`.
fn locate<T>(
    items: &[T],
    payload: &Payload,
    key: &str,
    label: &'static str,
    entity: &'static str,
) -> ValidationResult<usize> {
    let index = payload.index(key, label)?;
    if index >= items.len() {
        return Err(ValidationError::NotFound(entity));
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// Language metadata
// ---------------------------------------------------------------------------

fn update_language_meta(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let name = payload.text("name");
    if !name.is_empty() {
        doc.name = name;
    }
    doc.version = payload.text("version");
    Ok("Language details updated".to_string())
}

// ---------------------------------------------------------------------------
// Flat collections
// ---------------------------------------------------------------------------

/// A record kept in one of the document's index-addressed lists
trait FlatEntry: Sized {
    /// Names the `index` field in "Invalid ... index"
    const LABEL: &'static str;
    /// Subject of "... not found"
    const ENTITY: &'static str;
    /// Subject of the "... added/updated/removed" confirmations
    const NOUN: &'static str;

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self>;

    /// Build the record from a form, checking its mandatory fields
    fn from_payload(payload: &Payload) -> ValidationResult<Self>;
}

fn add<T: FlatEntry>(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let entry = T::from_payload(payload)?;
    T::list(doc).push(entry);
    Ok(format!("{} added", T::NOUN))
}

fn update<T: FlatEntry>(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let index = locate(T::list(doc), payload, "index", T::LABEL, T::ENTITY)?;
    let entry = T::from_payload(payload)?;
    T::list(doc)[index] = entry;
    Ok(format!("{} updated", T::NOUN))
}

fn delete<T: FlatEntry>(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let index = locate(T::list(doc), payload, "index", T::LABEL, T::ENTITY)?;
    T::list(doc).remove(index);
    Ok(format!("{} removed", T::NOUN))
}

impl FlatEntry for QuickStartEntry {
    const LABEL: &'static str = "Quick Start";
    const ENTITY: &'static str = "Quick Start entry";
    const NOUN: &'static str = "Quick Start entry";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.quick_start
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        Ok(Self {
            title: required(payload.text("title"), "Title is required for Quick Start entries")?,
            description: payload.multiline("description"),
            code: payload.multiline("code"),
        })
    }
}

impl FlatEntry for ConceptEntry {
    const LABEL: &'static str = "concept";
    const ENTITY: &'static str = "Concept";
    const NOUN: &'static str = "Concept";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.concepts
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        let id = required(payload.text("concept_id"), "Concept ID is required")?;
        let title = required(payload.text("title"), "Concept title is required")?;
        Ok(Self {
            id,
            title,
            tag: payload.text("tag"),
            description: payload.multiline("description"),
            code: payload.multiline("code"),
        })
    }
}

impl FlatEntry for GlossaryEntry {
    const LABEL: &'static str = "glossary entry";
    const ENTITY: &'static str = "Glossary entry";
    const NOUN: &'static str = "Glossary entry";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.glossary
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        let term = required(payload.text("term"), "Glossary term is required")?;
        let definition = required(payload.multiline("definition"), "Glossary definition is required")?;
        Ok(Self { term, definition })
    }
}

impl FlatEntry for TipEntry {
    const LABEL: &'static str = "tip";
    const ENTITY: &'static str = "Tip";
    const NOUN: &'static str = "Tip";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.tips
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        let note = required(payload.multiline("note"), "Tip note is required")?;
        Ok(Self {
            title: payload.text("title"),
            note,
        })
    }
}

impl FlatEntry for BuiltinEntry {
    const LABEL: &'static str = "built-in";
    const ENTITY: &'static str = "Built-in";
    const NOUN: &'static str = "Built-in entry";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.builtins
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        Ok(Self {
            name: required(payload.text("name"), "Built-in name is required")?,
            kind: payload.text("kind"),
            signature: payload.text("signature"),
            description: payload.multiline("description"),
        })
    }
}

impl FlatEntry for StdlibEntry {
    const LABEL: &'static str = "standard library entry";
    const ENTITY: &'static str = "Standard library entry";
    const NOUN: &'static str = "Standard library entry";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.stdlib
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        Ok(Self {
            name: required(payload.text("name"), "Standard library name is required")?,
            description: payload.multiline("description"),
        })
    }
}

impl FlatEntry for ToolEntry {
    const LABEL: &'static str = "tool";
    const ENTITY: &'static str = "Tool";
    const NOUN: &'static str = "Tool";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.tools
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        Ok(Self {
            name: required(payload.text("name"), "Tool name is required")?,
            description: payload.multiline("description"),
        })
    }
}

impl FlatEntry for LinkEntry {
    const LABEL: &'static str = "link";
    const ENTITY: &'static str = "Link";
    const NOUN: &'static str = "Link";

    fn list(doc: &mut LanguageDocument) -> &mut Vec<Self> {
        &mut doc.links
    }

    fn from_payload(payload: &Payload) -> ValidationResult<Self> {
        let title = required(payload.text("title"), "Link title is required")?;
        let url = required(payload.text("url"), "Link URL is required")?;
        Ok(Self {
            title,
            url,
            description: payload.multiline("description"),
        })
    }
}

// ---------------------------------------------------------------------------
// Common tasks (groups of tasks)
// ---------------------------------------------------------------------------

fn task_from_payload(payload: &Payload) -> ValidationResult<TaskEntry> {
    Ok(TaskEntry {
        title: required(payload.text("title"), "Task title is required")?,
        description: payload.multiline("description"),
        code: payload.multiline("code"),
    })
}

/// Append `task` to the first group called `name`, creating the group if none matches.
fn place_task(groups: &mut Vec<TaskGroup>, name: String, task: TaskEntry) {
    match groups.iter_mut().find(|g| g.group == name) {
        Some(group) => group.tasks.push(task),
        None => groups.push(TaskGroup::new(name, task)),
    }
}

/// Validate a `(group_index, task_index)` address.
fn locate_task(groups: &[TaskGroup], payload: &Payload) -> ValidationResult<(usize, usize)> {
    let group_index = payload.index("group_index", "task group")?;
    let task_index = payload.index("task_index", "task")?;
    let group = groups
        .get(group_index)
        .ok_or(ValidationError::NotFound("Task group"))?;
    if task_index >= group.tasks.len() {
        return Err(ValidationError::NotFound("Task"));
    }
    Ok((group_index, task_index))
}

/// Remove a task, dropping its group when that empties it.
///
/// Returns true if the group was removed.
fn take_task(groups: &mut Vec<TaskGroup>, group_index: usize, task_index: usize) -> bool {
    groups[group_index].tasks.remove(task_index);
    if groups[group_index].tasks.is_empty() {
        groups.remove(group_index);
        true
    } else {
        false
    }
}

fn add_common_task(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let group = required(payload.text("group"), "Task group is required")?;
    let task = task_from_payload(payload)?;
    place_task(&mut doc.common_tasks, group, task);
    Ok("Task added".to_string())
}

/// Replace a task, optionally moving it to another group.
///
/// The task is taken out first (dropping its group if that empties it),
/// then reinserted: at its old position when it stays in a surviving
/// group of the same name, otherwise appended to the first group with the
/// target name or to a new group. A blank target name drops the task.
fn update_common_task(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let groups = &mut doc.common_tasks;
    let (group_index, task_index) = locate_task(groups, payload)?;
    let task = task_from_payload(payload)?;

    let original = groups[group_index].group.clone();
    // an omitted field keeps the current group; a submitted blank means "no group"
    let target = match payload.get("group") {
        Some(_) => payload.text("group"),
        None => original.clone(),
    };

    let removed_group = take_task(groups, group_index, task_index);

    if target.is_empty() {
        return Ok("Task updated".to_string());
    }
    if !removed_group && target == original {
        let tasks = &mut groups[group_index].tasks;
        let position = task_index.min(tasks.len());
        tasks.insert(position, task);
    } else {
        place_task(groups, target, task);
    }
    Ok("Task updated".to_string())
}

fn delete_common_task(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let (group_index, task_index) = locate_task(&doc.common_tasks, payload)?;
    take_task(&mut doc.common_tasks, group_index, task_index);
    Ok("Task removed".to_string())
}

fn rename_common_task_group(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let group_index = payload.index("group_index", "task group")?;
    let name = required(payload.text("group"), "Group name is required")?;
    let group = doc
        .common_tasks
        .get_mut(group_index)
        .ok_or(ValidationError::NotFound("Task group"))?;
    group.group = name;
    Ok("Task group renamed".to_string())
}

fn delete_common_task_group(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let group_index = locate(&doc.common_tasks, payload, "group_index", "task group", "Task group")?;
    doc.common_tasks.remove(group_index);
    Ok("Task group removed".to_string())
}

// ---------------------------------------------------------------------------
// Projects and their steps
// ---------------------------------------------------------------------------

fn locate_project(doc: &LanguageDocument, payload: &Payload) -> ValidationResult<usize> {
    locate(&doc.projects, payload, "project_index", "project", "Project")
}

/// Validate a `(project_index, step_index)` address.
fn locate_step(doc: &LanguageDocument, payload: &Payload) -> ValidationResult<(usize, usize)> {
    let project_index = payload.index("project_index", "project")?;
    let step_index = payload.index("step_index", "project step")?;
    let project = doc
        .projects
        .get(project_index)
        .ok_or(ValidationError::NotFound("Project"))?;
    if step_index >= project.steps.len() {
        return Err(ValidationError::NotFound("Project step"));
    }
    Ok((project_index, step_index))
}

fn step_from_payload(payload: &Payload) -> ValidationResult<ProjectStep> {
    let step = ProjectStep {
        title: payload.text("title"),
        text: payload.multiline("text"),
        code: payload.multiline("code"),
    };
    if step.is_blank() {
        return Err(ValidationError::EmptyStep);
    }
    Ok(step)
}

fn add_project(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let title = required(payload.text("title"), "Project title is required")?;
    doc.projects.push(ProjectEntry {
        title,
        summary: payload.text("summary"),
        description: payload.multiline("description"),
        steps: Vec::new(),
    });
    Ok("Project added".to_string())
}

/// Replace a project's header fields; its steps are kept.
fn update_project(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let index = locate_project(doc, payload)?;
    let title = required(payload.text("title"), "Project title is required")?;
    let project = &mut doc.projects[index];
    project.title = title;
    project.summary = payload.text("summary");
    project.description = payload.multiline("description");
    Ok("Project updated".to_string())
}

fn delete_project(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let index = locate_project(doc, payload)?;
    doc.projects.remove(index);
    Ok("Project removed".to_string())
}

fn add_project_step(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let index = locate_project(doc, payload)?;
    let step = step_from_payload(payload)?;
    doc.projects[index].steps.push(step);
    Ok("Project step added".to_string())
}

fn update_project_step(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let (project_index, step_index) = locate_step(doc, payload)?;
    let step = step_from_payload(payload)?;
    doc.projects[project_index].steps[step_index] = step;
    Ok("Project step updated".to_string())
}

fn delete_project_step(doc: &mut LanguageDocument, payload: &Payload) -> ValidationResult<String> {
    let (project_index, step_index) = locate_step(doc, payload)?;
    doc.projects[project_index].steps.remove(step_index);
    Ok("Project step removed".to_string())
}
