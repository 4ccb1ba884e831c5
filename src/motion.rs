//! Cursor motions.
//!
//! Motions never touch the buffer. Each one maps a position and a count to a
//! target position plus the way an operator should treat the covered text.
//! Targets may sit one column past the end of a line; callers moving the
//! cursor in command mode clamp them back onto a grapheme.

use crate::traits::TextHost;
use crate::types::Position;
use crate::view::BufferView;
use crate::word::{self, CharClass};

/// How an operator consumes the text between the cursor and the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// The target grapheme is excluded.
    Exclusive,
    /// The target grapheme is included (`e`, `$`, `f`, `t`).
    Inclusive,
    /// Whole lines between cursor and target (`j`, `k`, `gg`, `G`, `'a`).
    Linewise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTarget {
    pub pos: Position,
    pub kind: MotionKind,
}

impl MotionTarget {
    fn new(pos: Position, kind: MotionKind) -> Self {
        Self { pos, kind }
    }

    pub fn is_inclusive(&self) -> bool {
        self.kind == MotionKind::Inclusive
    }

    pub fn is_linewise(&self) -> bool {
        self.kind == MotionKind::Linewise
    }
}

/// `f`, `F`, `t`, `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindKind {
    /// `f`: forward onto the character.
    Forward,
    /// `F`: backward onto the character.
    Backward,
    /// `t`: forward, stopping before the character.
    TillForward,
    /// `T`: backward, stopping after the character.
    TillBackward,
}

impl FindKind {
    pub fn reversed(self) -> Self {
        match self {
            FindKind::Forward => FindKind::Backward,
            FindKind::Backward => FindKind::Forward,
            FindKind::TillForward => FindKind::TillBackward,
            FindKind::TillBackward => FindKind::TillForward,
        }
    }

    fn is_forward(self) -> bool {
        matches!(self, FindKind::Forward | FindKind::TillForward)
    }

    fn is_till(self) -> bool {
        matches!(self, FindKind::TillForward | FindKind::TillBackward)
    }
}

/// A remembered character search, replayed by `;` and `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FindChar {
    pub kind: FindKind,
    pub ch: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordForward { big: bool },
    WordBackward { big: bool },
    WordEnd { big: bool },
    /// `0`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `$`; a count moves down `count - 1` lines first.
    LineEnd,
    /// `gg` without a count.
    DocumentStart,
    /// `G` without a count.
    DocumentEnd,
    /// `{count}G` / `{count}gg`, 1-indexed.
    GotoLine(u32),
    ParagraphForward,
    ParagraphBackward,
    /// `repeat` is set for `;`/`,`, which skip a till target right next to the cursor.
    Find { find: FindChar, repeat: bool },
    /// `*` / `#`: whole-word search for the word under the cursor, wrapping around.
    SearchWord { forward: bool },
    /// A resolved jump target (marks). Line-wise jumps land on the first non-blank.
    Jump { to: Position, linewise: bool },
}

impl Motion {
    /// Resolve the motion. `None` means it cannot move at all (a failed find,
    /// `k` on the first line), which cancels a pending operator.
    pub fn apply<H: TextHost + ?Sized>(
        &self,
        view: &BufferView<'_, H>,
        from: Position,
        count: u32,
        preferred_col: Option<u32>,
    ) -> Option<MotionTarget> {
        let from = view.clamp(from);
        let count = count.max(1);
        let target = match *self {
            Motion::Left => MotionTarget::new(
                Position::new(from.line, from.col.saturating_sub(count)),
                MotionKind::Exclusive,
            ),
            Motion::Right => MotionTarget::new(
                Position::new(
                    from.line,
                    from.col.saturating_add(count).min(view.line_len(from.line)),
                ),
                MotionKind::Exclusive,
            ),
            Motion::Up => {
                if from.line == 0 {
                    return None;
                }
                let line = from.line.saturating_sub(count);
                vertical(view, line, from, preferred_col)
            }
            Motion::Down => {
                if from.line >= view.last_line() {
                    return None;
                }
                let line = from.line.saturating_add(count).min(view.last_line());
                vertical(view, line, from, preferred_col)
            }
            Motion::WordForward { big } => MotionTarget::new(
                repeat(count, from, |p| word::next_word_start(view, p, big)),
                MotionKind::Exclusive,
            ),
            Motion::WordBackward { big } => MotionTarget::new(
                repeat(count, from, |p| word::prev_word_start(view, p, big)),
                MotionKind::Exclusive,
            ),
            Motion::WordEnd { big } => MotionTarget::new(
                repeat(count, from, |p| word::next_word_end(view, p, big)),
                MotionKind::Inclusive,
            ),
            Motion::LineStart => {
                MotionTarget::new(Position::new(from.line, 0), MotionKind::Exclusive)
            }
            Motion::FirstNonBlank => MotionTarget::new(
                Position::new(from.line, view.first_non_blank(from.line)),
                MotionKind::Exclusive,
            ),
            Motion::LineEnd => {
                let line = from.line.saturating_add(count - 1).min(view.last_line());
                let col = view.line_len(line).saturating_sub(1);
                MotionTarget::new(Position::new(line, col), MotionKind::Inclusive)
            }
            Motion::DocumentStart => line_target(view, 0),
            Motion::DocumentEnd => line_target(view, view.last_line()),
            Motion::GotoLine(n) => line_target(view, n.saturating_sub(1).min(view.last_line())),
            Motion::ParagraphForward => MotionTarget::new(
                repeat(count, from, |p| paragraph_forward(view, p)),
                MotionKind::Exclusive,
            ),
            Motion::ParagraphBackward => MotionTarget::new(
                repeat(count, from, |p| paragraph_backward(view, p)),
                MotionKind::Exclusive,
            ),
            Motion::Find { find, repeat } => find_in_line(view, from, find, count, repeat)?,
            Motion::SearchWord { forward } => search_word(view, from, forward)?,
            Motion::Jump { to, linewise } => {
                let to = view.clamp(to);
                if linewise {
                    line_target(view, to.line)
                } else {
                    MotionTarget::new(view.clamp_cursor(to), MotionKind::Exclusive)
                }
            }
        };
        Some(target)
    }

    /// Whether the motion keeps the remembered column for `j`/`k`.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Motion::Up | Motion::Down)
    }
}

fn repeat(count: u32, from: Position, mut step: impl FnMut(Position) -> Position) -> Position {
    let mut pos = from;
    for _ in 0..count {
        let next = step(pos);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

fn vertical<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    line: u32,
    from: Position,
    preferred_col: Option<u32>,
) -> MotionTarget {
    let want = preferred_col.unwrap_or(from.col);
    let col = want.min(view.line_len(line).saturating_sub(1));
    MotionTarget::new(Position::new(line, col), MotionKind::Linewise)
}

fn line_target<H: TextHost + ?Sized>(view: &BufferView<'_, H>, line: u32) -> MotionTarget {
    MotionTarget::new(
        Position::new(line, view.first_non_blank(line)),
        MotionKind::Linewise,
    )
}

/// Next blank line after the current paragraph, or the end of the buffer.
fn paragraph_forward<H: TextHost + ?Sized>(view: &BufferView<'_, H>, from: Position) -> Position {
    let mut seen_text = !view.is_blank_line(from.line);
    for line in from.line + 1..view.line_count() {
        if !view.is_blank_line(line) {
            seen_text = true;
        } else if seen_text {
            return Position::new(line, 0);
        }
    }
    let last = view.last_line();
    Position::new(last, view.line_len(last))
}

fn paragraph_backward<H: TextHost + ?Sized>(view: &BufferView<'_, H>, from: Position) -> Position {
    let mut seen_text = !view.is_blank_line(from.line);
    for line in (0..from.line).rev() {
        if !view.is_blank_line(line) {
            seen_text = true;
        } else if seen_text {
            return Position::new(line, 0);
        }
    }
    Position::ZERO
}

fn find_in_line<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    from: Position,
    find: FindChar,
    count: u32,
    repeat: bool,
) -> Option<MotionTarget> {
    let len = view.line_len(from.line);
    let at = |col: u32| view.is_char(Position::new(from.line, col), find.ch);
    // A repeated till would stop where it already is; look one further.
    let skip = u32::from(repeat && find.kind.is_till());

    let col = if find.kind.is_forward() {
        let mut remaining = count;
        let mut hit = None;
        for col in from.col + 1 + skip..len {
            if at(col) {
                remaining -= 1;
                if remaining == 0 {
                    hit = Some(col);
                    break;
                }
            }
        }
        let hit = hit?;
        if find.kind.is_till() { hit - 1 } else { hit }
    } else {
        let mut remaining = count;
        let mut hit = None;
        for col in (0..from.col.saturating_sub(skip)).rev() {
            if at(col) {
                remaining -= 1;
                if remaining == 0 {
                    hit = Some(col);
                    break;
                }
            }
        }
        let hit = hit?;
        if find.kind.is_till() { hit + 1 } else { hit }
    };

    if col == from.col {
        return None;
    }
    let kind = if find.kind.is_forward() {
        MotionKind::Inclusive
    } else {
        MotionKind::Exclusive
    };
    Some(MotionTarget::new(Position::new(from.line, col), kind))
}

/// The keyword under the cursor as (start, end-exclusive) columns.
fn keyword_at<H: TextHost + ?Sized>(view: &BufferView<'_, H>, pos: Position) -> Option<(u32, u32)> {
    if view.class_at(pos, false) != CharClass::Keyword {
        return None;
    }
    let start = word::run_start(view, pos, false).col;
    let end = word::run_end(view, pos, false).col + 1;
    Some((start, end))
}

fn search_word<H: TextHost + ?Sized>(
    view: &BufferView<'_, H>,
    from: Position,
    forward: bool,
) -> Option<MotionTarget> {
    let (start, end) = keyword_at(view, from)?;
    let needle: Vec<&str> = view.graphemes(from.line)[start as usize..end as usize]
        .iter()
        .map(String::as_str)
        .collect();

    // Every whole-word occurrence in document order.
    let mut hits = Vec::new();
    for line in 0..view.line_count() {
        let graphemes = view.graphemes(line);
        let n = needle.len();
        if graphemes.len() < n {
            continue;
        }
        for col in 0..=graphemes.len() - n {
            let matches = graphemes[col..col + n]
                .iter()
                .zip(&needle)
                .all(|(g, w)| g == w);
            if !matches {
                continue;
            }
            let before = col
                .checked_sub(1)
                .map(|c| view.class_at(Position::new(line, c as u32), false));
            let after = view.class_at(Position::new(line, (col + n) as u32), false);
            if before != Some(CharClass::Keyword) && after != CharClass::Keyword {
                hits.push(Position::new(line, col as u32));
            }
        }
    }

    let current = Position::new(from.line, start);
    let pos = if forward {
        hits.iter()
            .find(|p| **p > current)
            .or_else(|| hits.first())
            .copied()
    } else {
        hits.iter()
            .rev()
            .find(|p| **p < current)
            .or_else(|| hits.last())
            .copied()
    }?;
    Some(MotionTarget::new(pos, MotionKind::Exclusive))
}
