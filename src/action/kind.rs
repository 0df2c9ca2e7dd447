//! The closed set of editing actions

use super::error::ValidationError;
use std::str::FromStr;

macro_rules! actions {
    ($($variant:ident => $id:literal,)+) => {
        /// One named mutation understood by the engine
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Action {
            $($variant,)+
        }

        impl Action {
            /// Every action, in dashboard order
            pub const ALL: &'static [Action] = &[$(Action::$variant,)+];

            /// Look up an action by its form identifier
            pub fn parse(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(Action::$variant),)+
                    _ => None,
                }
            }

            /// The form identifier, e.g. `add_glossary`
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Action::$variant => $id,)+
                }
            }
        }
    };
}

actions! {
    UpdateLanguageMeta => "update_language_meta",
    AddQuickStart => "add_quick_start",
    UpdateQuickStart => "update_quick_start",
    DeleteQuickStart => "delete_quick_start",
    AddConcept => "add_concept",
    UpdateConcept => "update_concept",
    DeleteConcept => "delete_concept",
    AddCommonTask => "add_common_task",
    UpdateCommonTask => "update_common_task",
    DeleteCommonTask => "delete_common_task",
    RenameCommonTaskGroup => "rename_common_task_group",
    DeleteCommonTaskGroup => "delete_common_task_group",
    AddProject => "add_project",
    UpdateProject => "update_project",
    DeleteProject => "delete_project",
    AddProjectStep => "add_project_step",
    UpdateProjectStep => "update_project_step",
    DeleteProjectStep => "delete_project_step",
    AddGlossary => "add_glossary",
    UpdateGlossary => "update_glossary",
    DeleteGlossary => "delete_glossary",
    AddTip => "add_tip",
    UpdateTip => "update_tip",
    DeleteTip => "delete_tip",
    AddBuiltin => "add_builtin",
    UpdateBuiltin => "update_builtin",
    DeleteBuiltin => "delete_builtin",
    AddStdlib => "add_stdlib",
    UpdateStdlib => "update_stdlib",
    DeleteStdlib => "delete_stdlib",
    AddTool => "add_tool",
    UpdateTool => "update_tool",
    DeleteTool => "delete_tool",
    AddLink => "add_link",
    UpdateLink => "update_link",
    DeleteLink => "delete_link",
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::parse(s).ok_or(ValidationError::UnrecognisedAction)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
