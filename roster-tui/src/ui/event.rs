use crossterm::event::{
    Event as CrosstermEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

/// Input the app reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Left mouse button press
    Click { x: u16, y: u16 },
    /// Mouse wheel; negative is up
    Scroll { delta: i16 },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

impl Input {
    #[cfg(test)]
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    #[cfg(test)]
    pub fn ctrl(c: char) -> Self {
        Self::Key {
            key: Key::Char(c),
            modifiers: Modifiers::ctrl(),
        }
    }

    /// Maps a crossterm event, dropping the ones the app ignores (key
    /// releases, mouse moves, focus changes, paste).
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                let code = Key::from_code(key.code)?;
                Some(Self::Key {
                    key: code,
                    modifiers: key.modifiers.into(),
                })
            }
            CrosstermEvent::Mouse(MouseEvent {
                kind, column, row, ..
            }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Self::Click { x: column, y: row }),
                MouseEventKind::ScrollUp => Some(Self::Scroll { delta: -1 }),
                MouseEventKind::ScrollDown => Some(Self::Scroll { delta: 1 }),
                _ => None,
            },
            CrosstermEvent::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    fn from_code(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
