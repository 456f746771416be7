use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// Serialized as `{"id": ..., "text": ..., "completed": ...}`; this is the
/// persisted record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    /// Opaque identifier, unique within the list
    pub id: String,
    /// Trimmed, never empty
    pub text: String,
    pub completed: bool,
}

impl TaskItem {
    /// Create an open (not completed) item. `text` is expected to be trimmed already.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        TaskItem {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Open items are the ones counted in the "N items left" label
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Trim user input; `None` when nothing but whitespace remains.
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
