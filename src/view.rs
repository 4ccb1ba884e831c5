use std::cell::OnceCell;

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextHost;
use crate::types::{Position, Span};
use crate::word::{CharClass, classify, classify_big};

/// Read-only, grapheme-split view of the host buffer for one key press.
///
/// Lines are fetched from the host lazily and split once.
pub struct BufferView<'h, H: TextHost + ?Sized> {
    host: &'h H,
    lines: Vec<OnceCell<Vec<String>>>,
}

impl<'h, H: TextHost + ?Sized> BufferView<'h, H> {
    pub fn new(host: &'h H) -> Self {
        let count = host.line_count().max(1);
        Self {
            host,
            lines: (0..count).map(|_| OnceCell::new()).collect(),
        }
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn last_line(&self) -> u32 {
        self.line_count() - 1
    }

    pub fn graphemes(&self, line: u32) -> &[String] {
        match self.lines.get(line as usize) {
            Some(cell) => cell.get_or_init(|| {
                self.host
                    .line(line)
                    .graphemes(true)
                    .map(str::to_owned)
                    .collect()
            }),
            None => &[],
        }
    }

    pub fn line_len(&self, line: u32) -> u32 {
        self.graphemes(line).len() as u32
    }

    pub fn line_text(&self, line: u32) -> String {
        self.graphemes(line).concat()
    }

    pub fn grapheme(&self, pos: Position) -> Option<&str> {
        self.graphemes(pos.line)
            .get(pos.col as usize)
            .map(String::as_str)
    }

    /// Whether the grapheme at `pos` is exactly `ch`.
    pub fn is_char(&self, pos: Position, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.grapheme(pos) == Some(ch.encode_utf8(&mut buf))
    }

    /// Class of the grapheme at `pos`; past the end of a line counts as blank.
    pub fn class_at(&self, pos: Position, big: bool) -> CharClass {
        match self.grapheme(pos) {
            Some(g) if big => classify_big(g),
            Some(g) => classify(g),
            None => CharClass::Blank,
        }
    }

    pub fn is_blank_line(&self, line: u32) -> bool {
        self.graphemes(line)
            .iter()
            .all(|g| classify(g) == CharClass::Blank)
    }

    /// First non-blank column, or 0 for a blank line.
    pub fn first_non_blank(&self, line: u32) -> u32 {
        self.graphemes(line)
            .iter()
            .position(|g| classify(g) != CharClass::Blank)
            .unwrap_or(0) as u32
    }

    /// Clamp to the buffer, allowing the column just past the line end.
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    /// Clamp for a command-mode cursor, which always sits on a grapheme.
    pub fn clamp_cursor(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        let max = self.line_len(line).saturating_sub(1);
        Position::new(line, pos.col.min(max))
    }

    /// The previous grapheme, skipping line breaks and empty lines.
    pub fn prev_grapheme(&self, pos: Position) -> Option<Position> {
        if pos.col > 0 && self.line_len(pos.line) > 0 {
            let col = (pos.col - 1).min(self.line_len(pos.line) - 1);
            return Some(Position::new(pos.line, col));
        }
        (0..pos.line.min(self.line_count()))
            .rev()
            .find(|&line| self.line_len(line) > 0)
            .map(|line| Position::new(line, self.line_len(line) - 1))
    }

    /// The next grapheme, skipping line breaks and empty lines.
    pub fn next_grapheme(&self, pos: Position) -> Option<Position> {
        if pos.col + 1 < self.line_len(pos.line) {
            return Some(Position::new(pos.line, pos.col + 1));
        }
        (pos.line + 1..self.line_count())
            .find(|&line| self.line_len(line) > 0)
            .map(|line| Position::new(line, 0))
    }

    /// Text covered by `span`, line breaks included.
    pub fn slice(&self, span: Span) -> String {
        let mut out = String::new();
        if span.is_empty() {
            return out;
        }
        let end_line = span.end.line.min(self.last_line());
        for line in span.start.line..=end_line {
            let graphemes = self.graphemes(line);
            let len = graphemes.len();
            let from = if line == span.start.line {
                (span.start.col as usize).min(len)
            } else {
                0
            };
            let to = if line == span.end.line {
                (span.end.col as usize).min(len)
            } else {
                len
            };
            if from < to {
                out.extend(graphemes[from..to].iter().map(String::as_str));
            }
            if line < span.end.line && line < self.last_line() {
                out.push('\n');
            }
        }
        out
    }

    /// Whole lines `first..=last`, each terminated by `\n`.
    pub fn lines_text(&self, first: u32, last: u32) -> String {
        let mut out = String::new();
        for line in first..=last.min(self.last_line()) {
            out.push_str(&self.line_text(line));
            out.push('\n');
        }
        out
    }
}
