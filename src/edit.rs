//! Edits that are not operators: paste, join, replace, open line.
//!
//! Each returns the new cursor position, or `None` when nothing changed.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::register::{Register, RegisterKind};
use crate::traits::TextHost;
use crate::types::{Position, Span};
use crate::view::BufferView;
use crate::word::{CharClass, classify};

/// `p` / `P`: put the register `count` times after or before the cursor.
pub(crate) fn paste<H: TextHost + ?Sized>(
    host: &mut H,
    register: &Register,
    cursor: Position,
    before: bool,
    count: u32,
) -> Option<Position> {
    if register.is_empty() {
        trace!("paste from empty register ignored");
        return None;
    }
    let text = register.content().repeat(count.max(1) as usize);
    match register.kind() {
        RegisterKind::Line => {
            let (at, insert, target_line) = {
                let view = BufferView::new(&*host);
                let cursor = view.clamp(cursor);
                if before {
                    (Position::new(cursor.line, 0), text, cursor.line)
                } else if cursor.line < view.last_line() {
                    (Position::new(cursor.line + 1, 0), text, cursor.line + 1)
                } else {
                    // Below the last line there is no line start to insert at.
                    let last = view.last_line();
                    let body = text.strip_suffix('\n').unwrap_or(&text);
                    (
                        Position::new(last, view.line_len(last)),
                        format!("\n{body}"),
                        last + 1,
                    )
                }
            };
            host.insert(at, &insert);
            let view = BufferView::new(&*host);
            Some(Position::new(target_line, view.first_non_blank(target_line)))
        }
        RegisterKind::Char => {
            let at = {
                let view = BufferView::new(&*host);
                let cursor = view.clamp(cursor);
                let len = view.line_len(cursor.line);
                if before || len == 0 {
                    cursor
                } else {
                    Position::new(cursor.line, (cursor.col + 1).min(len))
                }
            };
            host.insert(at, &text);
            // Single-line text leaves the cursor on its last grapheme;
            // multi-line text leaves it at the start.
            let pos = if text.contains('\n') {
                at
            } else {
                let len = text.graphemes(true).count() as u32;
                Position::new(at.line, at.col + len.saturating_sub(1))
            };
            Some(BufferView::new(&*host).clamp_cursor(pos))
        }
    }
}

/// `J`: join `count` lines (at least two) starting at the cursor line.
///
/// Leading whitespace of each joined line is dropped and a single space is
/// put in between, unless the current line is empty or already ends in
/// whitespace, or the joined line is blank. The cursor lands on the join.
pub(crate) fn join_lines<H: TextHost + ?Sized>(
    host: &mut H,
    cursor: Position,
    count: u32,
) -> Option<Position> {
    let line = cursor.line;
    let mut join_col = None;
    for _ in 0..count.max(2) - 1 {
        let (span, separator) = {
            let view = BufferView::new(&*host);
            if line >= view.last_line() {
                break;
            }
            let current = view.graphemes(line);
            let next = view.graphemes(line + 1);
            let leading = next
                .iter()
                .take_while(|g| classify(g) == CharClass::Blank)
                .count();
            let ends_blank = current
                .last()
                .is_none_or(|g| classify(g) == CharClass::Blank);
            let separator = if ends_blank || leading == next.len() {
                ""
            } else {
                " "
            };
            let len = view.line_len(line);
            (
                Span {
                    start: Position::new(line, len),
                    end: Position::new(line + 1, leading as u32),
                },
                separator,
            )
        };
        host.delete_range(span);
        if !separator.is_empty() {
            host.insert(span.start, separator);
        }
        join_col = Some(span.start.col);
    }
    let col = join_col?;
    Some(BufferView::new(&*host).clamp_cursor(Position::new(line, col)))
}

/// `r{ch}`: overwrite `count` graphemes. Does nothing if the line is too short.
pub(crate) fn replace_chars<H: TextHost + ?Sized>(
    host: &mut H,
    cursor: Position,
    ch: char,
    count: u32,
) -> Option<Position> {
    let count = count.max(1);
    let len = BufferView::new(&*host).line_len(cursor.line);
    if cursor.col.saturating_add(count) > len {
        return None;
    }
    host.delete_range(Span {
        start: cursor,
        end: Position::new(cursor.line, cursor.col + count),
    });
    host.insert(cursor, &ch.to_string().repeat(count as usize));
    Some(Position::new(cursor.line, cursor.col + count - 1))
}

/// `o` / `O`: open an empty line below or above the cursor line.
pub(crate) fn open_line<H: TextHost + ?Sized>(
    host: &mut H,
    cursor: Position,
    above: bool,
) -> Position {
    if above {
        host.insert(Position::new(cursor.line, 0), "\n");
        Position::new(cursor.line, 0)
    } else {
        let len = BufferView::new(&*host).line_len(cursor.line);
        host.insert(Position::new(cursor.line, len), "\n");
        Position::new(cursor.line + 1, 0)
    }
}
