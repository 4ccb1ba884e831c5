/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A range produced by a motion or text object, before it is applied.
///
/// `start <= end` in document order. When `inclusive` is set the grapheme at
/// `end` belongs to the range; when `linewise` is set only the line numbers
/// matter and whole lines are affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
    pub inclusive: bool,
    pub linewise: bool,
}

impl Range {
    /// A character-wise range with an exclusive end.
    pub fn exclusive(a: Position, b: Position) -> Self {
        let (start, end) = ordered(a, b);
        Self {
            start,
            end,
            inclusive: false,
            linewise: false,
        }
    }

    /// A character-wise range that includes the grapheme at its end.
    pub fn inclusive(a: Position, b: Position) -> Self {
        Self {
            inclusive: true,
            ..Self::exclusive(a, b)
        }
    }

    /// Whole lines `first..=last` (in either order).
    pub fn lines(first: u32, last: u32) -> Self {
        let (first, last) = (first.min(last), first.max(last));
        Self {
            start: Position::new(first, 0),
            end: Position::new(last, 0),
            inclusive: false,
            linewise: true,
        }
    }

    pub fn first_line(&self) -> u32 {
        self.start.line
    }

    pub fn last_line(&self) -> u32 {
        self.end.line
    }
}

/// A resolved half-open span `[start, end)` handed to the host for deletion.
///
/// `end` may sit at column 0 of the line after the last affected one, which
/// covers the line break in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The current mode of the vim engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Insert mode - keys go to the host's text input.
    Insert,
    /// Command mode - for navigation and operators.
    Command,
    /// Visual mode - for selecting text.
    Visual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Visual => "VISUAL",
        }
    }
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// Character-wise selection (v).
    CharWise,
    /// Line-wise selection (V).
    LineWise,
}

/// A live visual selection.
///
/// `anchor` is where visual mode was entered; `cursor` follows motions.
/// Either may come first in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub cursor: Position,
    pub kind: VisualKind,
}

impl Selection {
    /// An empty selection at `pos`.
    pub fn at(pos: Position, kind: VisualKind) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
            kind,
        }
    }

    /// The ordered range an operator covers. Char-wise selections include
    /// the grapheme under the cursor.
    pub fn range(&self) -> Range {
        match self.kind {
            VisualKind::CharWise => Range::inclusive(self.anchor, self.cursor),
            VisualKind::LineWise => Range::lines(self.anchor.line, self.cursor.line),
        }
    }
}

pub(crate) fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}
