use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};

/// Terminal events read by the runtime and offered to
/// [`Model::event`](crate::Model::event).
///
/// Each variant wraps the corresponding [`crossterm::event::Event`] payload,
/// so key codes, modifiers and mouse buttons are matched with the full
/// crossterm API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The key event, if this is a key *press* (repeats and releases are skipped).
    pub fn key_press(&self) -> Option<KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn key_press_skips_release() {
        let mut key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(TerminalEvent::Key(key).key_press().is_some());
        key.kind = KeyEventKind::Release;
        assert!(TerminalEvent::Key(key).key_press().is_none());
    }
}
