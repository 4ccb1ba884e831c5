//! Operators and the operator-pending state.
//!
//! ```text
//! [count1] operator [count2] (motion | i/a text-object)
//! ```
//!
//! The effective count is `count1 * count2`. Typing the operator's own key
//! again (`dd`, `yy`, `>>`, `g~~`) applies it to `count` whole lines.

use tracing::debug;

use crate::motion::{FindKind, MotionTarget};
use crate::register::{Register, RegisterKind};
use crate::text_object::Scope;
use crate::traits::TextHost;
use crate::types::{Position, Range, Span};
use crate::view::BufferView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Delete,
    Change,
    Yank,
    Indent,
    Dedent,
    ToggleCase,
    Lowercase,
    Uppercase,
}

impl Operator {
    /// The key that, typed again while pending, makes the operator line-wise.
    pub fn doubling_char(self) -> char {
        match self {
            Operator::Delete => 'd',
            Operator::Change => 'c',
            Operator::Yank => 'y',
            Operator::Indent => '>',
            Operator::Dedent => '<',
            Operator::ToggleCase => '~',
            Operator::Lowercase => 'u',
            Operator::Uppercase => 'U',
        }
    }

    pub fn enters_insert(self) -> bool {
        self == Operator::Change
    }
}

/// What the next key of a multi-key command is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
    /// After an operator: a count digit, a motion, `i`/`a`, or the operator again.
    Motion,
    /// After `i`/`a`: the text object kind.
    TextObject(Scope),
    /// After `f`/`F`/`t`/`T`.
    FindChar(FindKind),
    /// After `r`.
    ReplaceChar,
    /// After `m`.
    MarkName,
    /// After `'` (line-wise) or `` ` ``.
    MarkJump { linewise: bool },
    /// After `g`.
    GPrefix,
}

/// An in-progress multi-key command. Dropped as a whole on completion,
/// on Escape, or on any key that does not fit `awaiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingState {
    pub operator: Option<Operator>,
    /// Count typed before the operator (or before the first key of the sequence).
    pub count1: Option<u32>,
    pub awaiting: Awaiting,
}

impl PendingState {
    pub fn new(operator: Option<Operator>, count1: Option<u32>, awaiting: Awaiting) -> Self {
        Self {
            operator,
            count1,
            awaiting,
        }
    }
}

/// The range an operator covers when combined with a motion from `from`.
pub(crate) fn motion_range<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    from: Position,
    target: MotionTarget,
    word_forward: bool,
) -> Range {
    let from = view.clamp(from);
    if target.is_linewise() {
        return Range::lines(from.line, target.pos.line);
    }
    if target.is_inclusive() {
        let len = view.line_len(target.pos.line);
        // `d$` on an empty line has nothing to include.
        if target.pos.col >= len {
            return Range::exclusive(from, Position::new(target.pos.line, len));
        }
        return Range::inclusive(from, target.pos);
    }
    let mut end = target.pos;
    // `dw` on the last word of a line stops at the line end instead of
    // pulling in the next line.
    if word_forward && end.line > from.line {
        let line = end.line - 1;
        let line_end = Position::new(line, view.line_len(line));
        if line_end > from {
            end = line_end;
        }
    }
    Range::exclusive(from, end)
}

/// Resolve a range into the concrete half-open span it removes.
pub(crate) fn span_of<H: TextHost + ?Sized>(view: &BufferView<'_, H>, range: &Range) -> Span {
    let last = view.last_line();
    if range.linewise {
        let first = range.first_line().min(last);
        let end_line = range.last_line().min(last);
        return if end_line < last {
            Span {
                start: Position::new(first, 0),
                end: Position::new(end_line + 1, 0),
            }
        } else if first > 0 {
            // Last line: take the line break before the block instead.
            Span {
                start: Position::new(first - 1, view.line_len(first - 1)),
                end: Position::new(end_line, view.line_len(end_line)),
            }
        } else {
            Span {
                start: Position::ZERO,
                end: Position::new(end_line, view.line_len(end_line)),
            }
        };
    }
    let start = view.clamp(range.start);
    let mut end = view.clamp(range.end);
    if range.inclusive {
        let len = view.line_len(end.line);
        end = if end.col < len {
            Position::new(end.line, end.col + 1)
        } else if end.line < last {
            Position::new(end.line + 1, 0)
        } else {
            end
        };
    }
    Span { start, end }
}

/// Like [`span_of`], but a line-wise range keeps its line breaks.
pub(crate) fn content_span<H: TextHost + ?Sized>(view: &BufferView<'_, H>, range: &Range) -> Span {
    if !range.linewise {
        return span_of(view, range);
    }
    let first = range.first_line().min(view.last_line());
    let last = range.last_line().min(view.last_line());
    Span {
        start: Position::new(first, 0),
        end: Position::new(last, view.line_len(last)),
    }
}

/// Apply `op` over `range` and return where the cursor ends up.
pub(crate) fn apply<H: TextHost + ?Sized>(
    host: &mut H,
    op: Operator,
    range: Range,
    cursor: Position,
    register: &mut Register,
    indent_unit: &str,
) -> Position {
    debug!(?op, ?range, "applying operator");
    match op {
        Operator::Yank => yank(&*host, range, cursor, register),
        Operator::Delete => delete(host, range, register),
        Operator::Change => change(host, range, register),
        Operator::Indent => shift_lines(host, range, true, indent_unit),
        Operator::Dedent => shift_lines(host, range, false, indent_unit),
        Operator::ToggleCase | Operator::Lowercase | Operator::Uppercase => {
            convert_case(host, range, op)
        }
    }
}

fn yank<H: TextHost + ?Sized>(
    host: &H,
    range: Range,
    cursor: Position,
    register: &mut Register,
) -> Position {
    let view = BufferView::new(host);
    if range.linewise {
        register.store(
            view.lines_text(range.first_line(), range.last_line()),
            RegisterKind::Line,
        );
        return view.clamp_cursor(Position::new(range.first_line(), cursor.col));
    }
    let span = span_of(&view, &range);
    if !span.is_empty() {
        register.store(view.slice(span), RegisterKind::Char);
    }
    view.clamp_cursor(span.start)
}

fn delete<H: TextHost + ?Sized>(host: &mut H, range: Range, register: &mut Register) -> Position {
    if range.linewise {
        let (span, text) = {
            let view = BufferView::new(&*host);
            (
                span_of(&view, &range),
                view.lines_text(range.first_line(), range.last_line()),
            )
        };
        host.delete_range(span);
        register.store(text, RegisterKind::Line);
        let view = BufferView::new(&*host);
        let line = range.first_line().min(view.last_line());
        return Position::new(line, view.first_non_blank(line));
    }
    let span = span_of(&BufferView::new(&*host), &range);
    if !span.is_empty() {
        let removed = host.delete_range(span);
        register.store(removed, RegisterKind::Char);
    }
    BufferView::new(&*host).clamp_cursor(span.start)
}

fn change<H: TextHost + ?Sized>(host: &mut H, range: Range, register: &mut Register) -> Position {
    let (span, text) = {
        let view = BufferView::new(&*host);
        let span = content_span(&view, &range);
        let text = if range.linewise {
            view.lines_text(range.first_line(), range.last_line())
        } else {
            view.slice(span)
        };
        (span, text)
    };
    if !span.is_empty() {
        host.delete_range(span);
    }
    if !text.is_empty() {
        let kind = if range.linewise {
            RegisterKind::Line
        } else {
            RegisterKind::Char
        };
        register.store(text, kind);
    }
    BufferView::new(&*host).clamp(span.start)
}

fn shift_lines<H: TextHost + ?Sized>(
    host: &mut H,
    range: Range,
    indent: bool,
    unit: &str,
) -> Position {
    let width = unit.chars().count().max(1);
    let (first, last) = {
        let view = BufferView::new(&*host);
        (
            range.first_line().min(view.last_line()),
            range.last_line().min(view.last_line()),
        )
    };
    for line in first..=last {
        let remove = {
            let view = BufferView::new(&*host);
            let graphemes = view.graphemes(line);
            if graphemes.is_empty() {
                continue;
            }
            // A leading tab goes on its own; otherwise up to one unit of spaces.
            if graphemes[0] == "\t" {
                1
            } else {
                graphemes
                    .iter()
                    .take(width)
                    .take_while(|g| g.as_str() == " ")
                    .count() as u32
            }
        };
        if indent {
            host.insert(Position::new(line, 0), unit);
        } else if remove > 0 {
            host.delete_range(Span {
                start: Position::new(line, 0),
                end: Position::new(line, remove),
            });
        }
    }
    let view = BufferView::new(&*host);
    Position::new(first, view.first_non_blank(first))
}

fn convert_case<H: TextHost + ?Sized>(host: &mut H, range: Range, op: Operator) -> Position {
    let (span, text) = {
        let view = BufferView::new(&*host);
        let span = content_span(&view, &range);
        (span, view.slice(span))
    };
    let converted: String = match op {
        Operator::Lowercase => text.to_lowercase(),
        Operator::Uppercase => text.to_uppercase(),
        _ => text.chars().map(toggle_case).collect(),
    };
    if converted != text {
        host.delete_range(span);
        host.insert(span.start, &converted);
    }
    BufferView::new(&*host).clamp_cursor(span.start)
}

/// Swap the case of `c` when it has a single-character counterpart.
fn toggle_case(c: char) -> char {
    let swapped: Vec<char> = if c.is_lowercase() {
        c.to_uppercase().collect()
    } else if c.is_uppercase() {
        c.to_lowercase().collect()
    } else {
        return c;
    };
    match swapped.as_slice() {
        [one] => *one,
        _ => c,
    }
}
