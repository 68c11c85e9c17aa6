use crate::query::MARKER;

/// The key presses the editor reacts to. Everything else is ignored
/// before it reaches the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Char(char),
    Space,
    Backspace,
    Enter,
    Escape,
}

/// What one applied event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStep {
    /// Still editing; redraw and wait for the next key.
    Editing,
    /// Enter was pressed; the buffer contents at that moment.
    Submitted(String),
    /// Escape was pressed; the buffer is discarded.
    Aborted,
}

/// Append-only edit buffer seeded with the marker character.
///
/// Holds no terminal state at all, which keeps every transition
/// checkable without a terminal.
#[derive(Debug, Clone)]
pub struct EditorState {
    buffer: Vec<char>,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            buffer: vec![MARKER],
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn apply(&mut self, event: EditorEvent) -> EditorStep {
        match event {
            EditorEvent::Char(c) => {
                self.buffer.push(c);
                EditorStep::Editing
            }
            EditorEvent::Space => {
                self.buffer.push(' ');
                EditorStep::Editing
            }
            EditorEvent::Backspace => {
                // The seeded marker is never erased.
                if self.buffer.len() > 1 {
                    self.buffer.pop();
                }
                EditorStep::Editing
            }
            EditorEvent::Enter => EditorStep::Submitted(self.text()),
            EditorEvent::Escape => EditorStep::Aborted,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
