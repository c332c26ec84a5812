use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// The three mutually exclusive view states of the surrounding editor UI.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    #[default]
    List,
    Editing,
    Previewing,
}

/// Tracks the legal transitions between list, editing and preview states.
/// Save is only valid while editing; exiting to the list discards unsaved
/// state unless the caller saved first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorSession {
    mode: EditorMode,
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// List -> Editing, entered by a create or edit action.
    pub fn open_editor(&mut self) -> Result<(), DocumentError> {
        match self.mode {
            EditorMode::List => {
                self.mode = EditorMode::Editing;
                Ok(())
            }
            _ => Err(DocumentError::Invariant(
                "a document is already open".into(),
            )),
        }
    }

    /// Editing <-> Previewing.
    pub fn toggle_preview(&mut self) -> Result<(), DocumentError> {
        match self.mode {
            EditorMode::Editing => {
                self.mode = EditorMode::Previewing;
                Ok(())
            }
            EditorMode::Previewing => {
                self.mode = EditorMode::Editing;
                Ok(())
            }
            EditorMode::List => Err(DocumentError::Invariant(
                "no document open to preview".into(),
            )),
        }
    }

    /// Editing/Previewing -> List.
    pub fn exit_to_list(&mut self) {
        self.mode = EditorMode::List;
    }

    pub fn can_save(&self) -> bool {
        self.mode == EditorMode::Editing
    }
}
