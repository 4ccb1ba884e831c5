//! Character classes and word boundaries.
//!
//! A word is a run of one class: keyword characters (letters, digits and
//! `_`), other non-blank characters, or whitespace. A WORD (`W`, `B`, `E`,
//! `iW`) only distinguishes blank from non-blank.

use crate::traits::TextHost;
use crate::types::Position;
use crate::view::BufferView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Blank,
    Keyword,
    Punct,
}

pub fn classify(grapheme: &str) -> CharClass {
    match grapheme.chars().next() {
        None => CharClass::Blank,
        Some(c) if c.is_whitespace() => CharClass::Blank,
        Some(c) if c.is_alphanumeric() || c == '_' => CharClass::Keyword,
        Some(_) => CharClass::Punct,
    }
}

pub fn classify_big(grapheme: &str) -> CharClass {
    match classify(grapheme) {
        CharClass::Blank => CharClass::Blank,
        _ => CharClass::Keyword,
    }
}

/// Start of the next word (`w`). Empty lines count as words.
///
/// Past the last word this returns the position just after the end of the
/// buffer, so an operator covers the trailing text.
pub fn next_word_start<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> Position {
    let mut p = view.clamp(pos);
    let class = view.class_at(p, big);
    if class != CharClass::Blank {
        while p.col < view.line_len(p.line) && view.class_at(p, big) == class {
            p.col += 1;
        }
    }
    loop {
        if p.col >= view.line_len(p.line) {
            if p.line >= view.last_line() {
                return Position::new(p.line, view.line_len(p.line));
            }
            p = Position::new(p.line + 1, 0);
            if view.line_len(p.line) == 0 {
                return p;
            }
            continue;
        }
        if view.class_at(p, big) != CharClass::Blank {
            return p;
        }
        p.col += 1;
    }
}

/// Start of the current or previous word (`b`). Empty lines count as words.
pub fn prev_word_start<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> Position {
    let pos = view.clamp(pos);
    let mut p = if pos.col > 0 {
        Position::new(pos.line, pos.col - 1)
    } else if pos.line > 0 {
        Position::new(pos.line - 1, view.line_len(pos.line - 1))
    } else {
        return pos;
    };
    loop {
        let len = view.line_len(p.line);
        if len == 0 {
            return p;
        }
        if p.col >= len {
            p.col = len - 1;
        }
        if view.class_at(p, big) != CharClass::Blank {
            break;
        }
        if p.col > 0 {
            p.col -= 1;
        } else if p.line > 0 {
            p = Position::new(p.line - 1, view.line_len(p.line - 1));
        } else {
            return p;
        }
    }
    run_start(view, p, big)
}

/// End of the current or next word (`e`). Empty lines are skipped.
pub fn next_word_end<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> Position {
    let pos = view.clamp(pos);
    let Some(mut p) = view.next_grapheme(pos) else {
        return view.clamp_cursor(pos);
    };
    while view.class_at(p, big) == CharClass::Blank {
        match view.next_grapheme(p) {
            Some(next) => p = next,
            None => return p,
        }
    }
    run_end(view, p, big)
}

/// First column of the same-class run containing `pos`, within its line.
pub fn run_start<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> Position {
    let class = view.class_at(pos, big);
    let mut p = pos;
    while p.col > 0 && view.class_at(Position::new(p.line, p.col - 1), big) == class {
        p.col -= 1;
    }
    p
}

/// Last column of the same-class run containing `pos`, within its line.
pub fn run_end<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> Position {
    let class = view.class_at(pos, big);
    let len = view.line_len(pos.line);
    let mut p = pos;
    while p.col + 1 < len && view.class_at(Position::new(p.line, p.col + 1), big) == class {
        p.col += 1;
    }
    p
}

pub fn is_run_end<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    big: bool,
) -> bool {
    view.class_at(pos, big) != CharClass::Blank && run_end(view, pos, big) == pos
}

/// Where `cw` stops: like `e`, except a cursor already on the last grapheme
/// of a word only changes that word.
pub fn change_word_end<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    count: u32,
    big: bool,
) -> Position {
    let mut p = view.clamp(pos);
    for i in 0..count.max(1) {
        if i == 0 && is_run_end(view, p, big) {
            continue;
        }
        let next = next_word_end(view, p, big);
        if next == p {
            break;
        }
        p = next;
    }
    p
}
