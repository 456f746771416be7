use crate::session::Command;

use super::line_buffer::LineBuffer;

/// Per-row inline editing: either showing labels, or one row's text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InlineEditor {
    #[default]
    Display,
    Editing { id: String, buffer: LineBuffer },
}

impl InlineEditor {
    /// Enter editing for a row, pre-filled with `text`, cursor at the end.
    ///
    /// If another row was being edited, its edit is resolved as a blur and
    /// the resulting commit is returned so the caller can dispatch it first.
    pub fn begin(&mut self, id: &str, text: &str) -> Option<Command> {
        let pending = self.commit();
        *self = InlineEditor::Editing {
            id: id.to_string(),
            buffer: LineBuffer::with_text(text),
        };
        pending
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, InlineEditor::Editing { .. })
    }

    /// Id of the row being edited
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            InlineEditor::Editing { id, .. } => Some(id),
            InlineEditor::Display => None,
        }
    }

    pub fn buffer(&self) -> Option<&LineBuffer> {
        match self {
            InlineEditor::Editing { buffer, .. } => Some(buffer),
            InlineEditor::Display => None,
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut LineBuffer> {
        match self {
            InlineEditor::Editing { buffer, .. } => Some(buffer),
            InlineEditor::Display => None,
        }
    }

    /// Enter or blur: leave editing and produce the update to dispatch.
    /// Blank text yields an update that deletes the item.
    pub fn commit(&mut self) -> Option<Command> {
        match std::mem::take(self) {
            InlineEditor::Editing { id, buffer } => Some(Command::Update {
                id,
                text: buffer.text().to_string(),
            }),
            InlineEditor::Display => None,
        }
    }

    /// Escape: leave editing without saving. Returns whether an edit was open.
    pub fn discard(&mut self) -> bool {
        let was_editing = self.is_editing();
        *self = InlineEditor::Display;
        was_editing
    }
}
