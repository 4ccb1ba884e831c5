/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, carrying the character the key produces.
    /// `Shift+a` arrives as `Char('A')` and `Shift+4` as `Char('$')`.
    Char(char),
    /// The Escape key, used to exit modes and cancel operations.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key.
    Backspace,
    Tab,
    // Arrow keys act like h/j/k/l outside insert mode.
    Left,
    Right,
    Up,
    Down,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// This represents a single key press, including any modifier keys held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// A key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    pub const fn esc() -> Self {
        Self::plain(KeyCode::Esc)
    }

    pub const fn enter() -> Self {
        Self::plain(KeyCode::Enter)
    }

    /// The typed character, if this is a character key without command modifiers.
    ///
    /// Shift is ignored since it is already folded into the character.
    pub fn typed_char(&self) -> Option<char> {
        let command = Modifiers::CTRL | Modifiers::ALT | Modifiers::META;
        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(command) => Some(c),
            _ => None,
        }
    }

    pub fn is_ctrl(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && self.mods.contains(Modifiers::CTRL)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// Input events that can be processed by the vim engine.
///
/// This enum distinguishes between key presses (used for commands)
/// and text input (used in insert mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event, typically used for commands and navigation.
    Key(KeyEvent),
    /// A character received through text input (IME, paste, composed keys).
    /// Outside insert mode it is interpreted like the matching key press.
    ReceivedChar(char),
}
