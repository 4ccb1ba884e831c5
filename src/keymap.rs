//! Key tables for command and visual mode.
//!
//! Each table maps a single key to an action as plain data; the engine
//! decides what to do with the action given its pending state.

use crate::key::{KeyCode, KeyEvent};
use crate::motion::{FindKind, Motion};
use crate::operator::Operator;
use crate::text_object::Scope;
use crate::types::VisualKind;

/// A key that moves the cursor, possibly after more keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKey {
    Plain(Motion),
    /// `f F t T`, waiting for the character.
    Find(FindKind),
    /// `;` and `,`.
    RepeatFind { reverse: bool },
    /// `g`, waiting for the second key.
    GPrefix,
    /// `'` and `` ` ``, waiting for the mark name.
    Mark { linewise: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// `i`
    Cursor,
    /// `a`
    After,
    /// `I`
    FirstNonBlank,
    /// `A`
    LineEnd,
    /// `o`
    LineBelow,
    /// `O`
    LineAbove,
}

/// Single keys that stand for an operator plus a fixed motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `x` = `dl`
    DeleteChar,
    /// `X` = `dh`
    DeleteCharBefore,
    /// `D` = `d$`
    DeleteToEnd,
    /// `C` = `c$`
    ChangeToEnd,
    /// `s` = `cl`
    SubstituteChar,
    /// `S` = `cc`
    SubstituteLine,
    /// `Y` = `yy`
    YankLine,
}

impl Shortcut {
    /// The operator and motion it expands to; `None` means whole lines.
    pub fn expand(self) -> (Operator, Option<Motion>) {
        match self {
            Shortcut::DeleteChar => (Operator::Delete, Some(Motion::Right)),
            Shortcut::DeleteCharBefore => (Operator::Delete, Some(Motion::Left)),
            Shortcut::DeleteToEnd => (Operator::Delete, Some(Motion::LineEnd)),
            Shortcut::ChangeToEnd => (Operator::Change, Some(Motion::LineEnd)),
            Shortcut::SubstituteChar => (Operator::Change, Some(Motion::Right)),
            Shortcut::SubstituteLine => (Operator::Change, None),
            Shortcut::YankLine => (Operator::Yank, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKey),
    Operator(Operator),
    Shortcut(Shortcut),
    Insert(InsertAt),
    Visual(VisualKind),
    Paste { before: bool },
    /// `r`
    Replace,
    /// `m`
    SetMark,
    /// `J`
    Join,
    /// `~`
    ToggleCase,
    Undo,
    Redo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualAction {
    Motion(MotionKey),
    Operator(Operator),
    /// `v` / `V`: switch kind, or leave visual mode when already in that kind.
    Kind(VisualKind),
    /// `o`: jump to the other end of the selection.
    SwapEnds,
    /// `i` / `a`: grow the selection to a text object.
    TextObject(Scope),
    Join,
}

/// Keys that are motions in every non-insert context.
pub fn motion_key(key: &KeyEvent) -> Option<MotionKey> {
    let plain = |m| Some(MotionKey::Plain(m));
    match key.code {
        KeyCode::Left | KeyCode::Backspace => return plain(Motion::Left),
        KeyCode::Right => return plain(Motion::Right),
        KeyCode::Up => return plain(Motion::Up),
        KeyCode::Down => return plain(Motion::Down),
        _ => {}
    }
    match key.typed_char()? {
        'h' => plain(Motion::Left),
        'l' | ' ' => plain(Motion::Right),
        'j' => plain(Motion::Down),
        'k' => plain(Motion::Up),
        'w' => plain(Motion::WordForward { big: false }),
        'W' => plain(Motion::WordForward { big: true }),
        'b' => plain(Motion::WordBackward { big: false }),
        'B' => plain(Motion::WordBackward { big: true }),
        'e' => plain(Motion::WordEnd { big: false }),
        'E' => plain(Motion::WordEnd { big: true }),
        '0' => plain(Motion::LineStart),
        '^' => plain(Motion::FirstNonBlank),
        '$' => plain(Motion::LineEnd),
        'G' => plain(Motion::DocumentEnd),
        '}' => plain(Motion::ParagraphForward),
        '{' => plain(Motion::ParagraphBackward),
        '*' => plain(Motion::SearchWord { forward: true }),
        '#' => plain(Motion::SearchWord { forward: false }),
        'f' => Some(MotionKey::Find(FindKind::Forward)),
        'F' => Some(MotionKey::Find(FindKind::Backward)),
        't' => Some(MotionKey::Find(FindKind::TillForward)),
        'T' => Some(MotionKey::Find(FindKind::TillBackward)),
        ';' => Some(MotionKey::RepeatFind { reverse: false }),
        ',' => Some(MotionKey::RepeatFind { reverse: true }),
        'g' => Some(MotionKey::GPrefix),
        '\'' => Some(MotionKey::Mark { linewise: true }),
        '`' => Some(MotionKey::Mark { linewise: false }),
        _ => None,
    }
}

/// Operators started directly by one key in command mode.
pub fn operator_key(c: char) -> Option<Operator> {
    match c {
        'd' => Some(Operator::Delete),
        'c' => Some(Operator::Change),
        'y' => Some(Operator::Yank),
        '>' => Some(Operator::Indent),
        '<' => Some(Operator::Dedent),
        _ => None,
    }
}

/// Operators reached through `g`: `g~`, `gu`, `gU`.
pub fn g_operator_key(c: char) -> Option<Operator> {
    match c {
        '~' => Some(Operator::ToggleCase),
        'u' => Some(Operator::Lowercase),
        'U' => Some(Operator::Uppercase),
        _ => None,
    }
}

pub fn command_action(key: &KeyEvent) -> Option<Action> {
    if key.is_ctrl('r') {
        return Some(Action::Redo);
    }
    if let Some(c) = key.typed_char() {
        if let Some(op) = operator_key(c) {
            return Some(Action::Operator(op));
        }
        let action = match c {
            'i' => Some(Action::Insert(InsertAt::Cursor)),
            'a' => Some(Action::Insert(InsertAt::After)),
            'I' => Some(Action::Insert(InsertAt::FirstNonBlank)),
            'A' => Some(Action::Insert(InsertAt::LineEnd)),
            'o' => Some(Action::Insert(InsertAt::LineBelow)),
            'O' => Some(Action::Insert(InsertAt::LineAbove)),
            'v' => Some(Action::Visual(VisualKind::CharWise)),
            'V' => Some(Action::Visual(VisualKind::LineWise)),
            'x' => Some(Action::Shortcut(Shortcut::DeleteChar)),
            'X' => Some(Action::Shortcut(Shortcut::DeleteCharBefore)),
            'D' => Some(Action::Shortcut(Shortcut::DeleteToEnd)),
            'C' => Some(Action::Shortcut(Shortcut::ChangeToEnd)),
            's' => Some(Action::Shortcut(Shortcut::SubstituteChar)),
            'S' => Some(Action::Shortcut(Shortcut::SubstituteLine)),
            'Y' => Some(Action::Shortcut(Shortcut::YankLine)),
            'p' => Some(Action::Paste { before: false }),
            'P' => Some(Action::Paste { before: true }),
            'r' => Some(Action::Replace),
            'm' => Some(Action::SetMark),
            'J' => Some(Action::Join),
            '~' => Some(Action::ToggleCase),
            'u' => Some(Action::Undo),
            _ => None,
        };
        if action.is_some() {
            return action;
        }
    }
    motion_key(key).map(Action::Motion)
}

pub fn visual_action(key: &KeyEvent) -> Option<VisualAction> {
    if let Some(c) = key.typed_char() {
        let action = match c {
            'd' | 'x' => Some(VisualAction::Operator(Operator::Delete)),
            'c' | 's' => Some(VisualAction::Operator(Operator::Change)),
            'y' => Some(VisualAction::Operator(Operator::Yank)),
            '>' => Some(VisualAction::Operator(Operator::Indent)),
            '<' => Some(VisualAction::Operator(Operator::Dedent)),
            '~' => Some(VisualAction::Operator(Operator::ToggleCase)),
            'u' => Some(VisualAction::Operator(Operator::Lowercase)),
            'U' => Some(VisualAction::Operator(Operator::Uppercase)),
            'v' => Some(VisualAction::Kind(VisualKind::CharWise)),
            'V' => Some(VisualAction::Kind(VisualKind::LineWise)),
            'o' => Some(VisualAction::SwapEnds),
            'i' => Some(VisualAction::TextObject(Scope::Inner)),
            'a' => Some(VisualAction::TextObject(Scope::Around)),
            'J' => Some(VisualAction::Join),
            _ => None,
        };
        if action.is_some() {
            return action;
        }
    }
    motion_key(key).map(VisualAction::Motion)
}
