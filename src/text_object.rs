//! Text objects: spans chosen by structure rather than by cursor motion.
//!
//! ```text
//! operator + text-object = action
//! d        + iw          = delete inner word
//! c        + i"          = change inside quotes
//! y        + a(          = yank around parentheses
//! ```
//!
//! Resolution returns `None` when nothing encloses the cursor; the pending
//! operator is then dropped without touching the buffer.

use crate::traits::TextHost;
use crate::types::{Position, Range};
use crate::view::BufferView;
use crate::word::{self, CharClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `i`: contents only.
    Inner,
    /// `a`: contents plus delimiters or surrounding whitespace.
    Around,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObjectKind {
    Word,
    BigWord,
    Quote(char),
    Bracket { open: char, close: char },
}

impl TextObjectKind {
    /// The object selected by the key typed after `i`/`a`.
    pub fn from_char(c: char) -> Option<Self> {
        let bracket = |open, close| Some(TextObjectKind::Bracket { open, close });
        match c {
            'w' => Some(TextObjectKind::Word),
            'W' => Some(TextObjectKind::BigWord),
            '"' | '\'' | '`' => Some(TextObjectKind::Quote(c)),
            '(' | ')' | 'b' => bracket('(', ')'),
            '{' | '}' | 'B' => bracket('{', '}'),
            '[' | ']' => bracket('[', ']'),
            '<' | '>' => bracket('<', '>'),
            _ => None,
        }
    }
}

/// Resolve `kind` around `pos`. `count` widens word objects by runs and
/// bracket objects by nesting levels; quotes ignore it.
pub fn resolve<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    kind: TextObjectKind,
    scope: Scope,
    count: u32,
) -> Option<Range> {
    let pos = view.clamp(pos);
    match kind {
        TextObjectKind::Word => word_object(view, pos, scope, count, false),
        TextObjectKind::BigWord => word_object(view, pos, scope, count, true),
        TextObjectKind::Quote(quote) => quote_object(view, pos, quote, scope),
        TextObjectKind::Bracket { open, close } => {
            bracket_object(view, pos, open, close, scope, count)
        }
    }
}

fn word_object<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    scope: Scope,
    count: u32,
    big: bool,
) -> Option<Range> {
    let len = view.line_len(pos.line);
    if pos.col >= len {
        return None;
    }
    let line = pos.line;
    let class_at = |col: u32| view.class_at(Position::new(line, col), big);
    let run_end = |col: u32| word::run_end(view, Position::new(line, col), big).col + 1;

    let start = word::run_start(view, pos, big).col;
    let mut end = run_end(pos.col);
    let on_blank = class_at(pos.col) == CharClass::Blank;

    match scope {
        Scope::Inner => {
            for _ in 1..count.max(1) {
                if end >= len {
                    break;
                }
                end = run_end(end);
            }
            Some(Range::exclusive(Position::new(line, start), Position::new(line, end)))
        }
        Scope::Around if on_blank => {
            // Leading whitespace plus the word after it.
            for i in 0..count.max(1) {
                if i > 0 && end < len && class_at(end) == CharClass::Blank {
                    end = run_end(end);
                }
                if end >= len {
                    break;
                }
                end = run_end(end);
            }
            Some(Range::exclusive(Position::new(line, start), Position::new(line, end)))
        }
        Scope::Around => {
            let mut start = start;
            let mut took_trailing = false;
            for i in 0..count.max(1) {
                if i > 0 {
                    if end >= len {
                        break;
                    }
                    end = run_end(end);
                }
                if end < len && class_at(end) == CharClass::Blank {
                    end = run_end(end);
                    took_trailing = true;
                }
            }
            if !took_trailing && start > 0 && class_at(start - 1) == CharClass::Blank {
                start = word::run_start(view, Position::new(line, start - 1), big).col;
            }
            Some(Range::exclusive(Position::new(line, start), Position::new(line, end)))
        }
    }
}

/// Unescaped occurrences of `quote` in a line, paired left to right.
fn quote_pairs(graphemes: &[String], quote: char) -> Vec<(u32, u32)> {
    let mut buf = [0u8; 4];
    let quote: &str = quote.encode_utf8(&mut buf);
    let cols: Vec<u32> = graphemes
        .iter()
        .enumerate()
        .filter(|(i, g)| g.as_str() == quote && (*i == 0 || graphemes[i - 1] != "\\"))
        .map(|(i, _)| i as u32)
        .collect();
    cols.chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

fn quote_object<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    quote: char,
    scope: Scope,
) -> Option<Range> {
    let pairs = quote_pairs(view.graphemes(pos.line), quote);
    // The pair around the cursor, else the first pair starting after it.
    let (open, close) = pairs
        .iter()
        .find(|(open, close)| *open <= pos.col && pos.col <= *close)
        .or_else(|| pairs.iter().find(|(open, _)| *open > pos.col))
        .copied()?;
    let (start, end) = match scope {
        Scope::Inner => (open + 1, close),
        Scope::Around => (open, close + 1),
    };
    Some(Range::exclusive(Position::new(pos.line, start), Position::new(pos.line, end)))
}

/// Nearest unmatched `open` at or before `pos`, skipping nested pairs.
fn find_open<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    open: char,
    close: char,
) -> Option<Position> {
    let mut depth = 0u32;
    let mut cur = Some(pos);
    while let Some(p) = cur {
        if view.is_char(p, close) {
            depth += 1;
        } else if view.is_char(p, open) {
            if depth == 0 {
                return Some(p);
            }
            depth -= 1;
        }
        cur = view.prev_grapheme(p);
    }
    None
}

fn find_close<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    open_pos: Position,
    open: char,
    close: char,
) -> Option<Position> {
    let mut depth = 0u32;
    let mut p = open_pos;
    while let Some(next) = view.next_grapheme(p) {
        p = next;
        if view.is_char(p, open) {
            depth += 1;
        } else if view.is_char(p, close) {
            if depth == 0 {
                return Some(p);
            }
            depth -= 1;
        }
    }
    None
}

fn bracket_object<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    pos: Position,
    open: char,
    close: char,
    scope: Scope,
    count: u32,
) -> Option<Range> {
    let mut open_pos = if view.is_char(pos, open) {
        pos
    } else if view.is_char(pos, close) {
        // On a closing bracket, start from the pair it closes.
        find_open(view, view.prev_grapheme(pos)?, open, close)?
    } else {
        find_open(view, pos, open, close)?
    };
    for _ in 1..count.max(1) {
        let outer = view.prev_grapheme(open_pos)?;
        open_pos = find_open(view, outer, open, close)?;
    }
    let close_pos = find_close(view, open_pos, open, close)?;

    match scope {
        Scope::Around => Some(Range::inclusive(open_pos, close_pos)),
        Scope::Inner => {
            let after_open = Position::new(open_pos.line, open_pos.col + 1);
            let opens_line = after_open.col >= view.line_len(open_pos.line);
            let closes_line = close_pos.col <= view.first_non_blank(close_pos.line)
                && close_pos.line > open_pos.line;
            if opens_line && closes_line {
                // Braces on their own lines: the lines in between.
                if close_pos.line - open_pos.line >= 2 {
                    return Some(Range::lines(open_pos.line + 1, close_pos.line - 1));
                }
                let at = Position::new(close_pos.line, 0);
                return Some(Range::exclusive(at, at));
            }
            // A bracket alone at a line edge keeps its line break.
            let start = if opens_line {
                Position::new(open_pos.line + 1, 0)
            } else {
                after_open
            };
            let end = if closes_line {
                let line = close_pos.line - 1;
                Position::new(line, view.line_len(line))
            } else {
                close_pos
            };
            Some(Range::exclusive(start, end))
        }
    }
}
