use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use vimkeys::{Position, Selection, Span, TextHost};

type Snapshot = (String, Position);

/// A rope-backed host with snapshot undo.
///
/// Mutations between two calls to [`MockBuffer::begin_group`] share one undo
/// step, the way a widget groups the edits made by one key press.
pub struct MockBuffer {
    rope: Rope,
    cursor: Position,
    selection: Option<Selection>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    group_open: bool,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::ZERO,
            selection: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            group_open: false,
        }
    }

    pub fn with_cursor(text: &str, line: u32, col: u32) -> Self {
        let mut buf = Self::new(text);
        buf.cursor = Position::new(line, col);
        buf
    }

    pub fn begin_group(&mut self) {
        self.group_open = false;
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    fn snapshot(&mut self) {
        if !self.group_open {
            self.undo_stack.push((self.rope.to_string(), self.cursor));
            self.redo_stack.clear();
            self.group_open = true;
        }
    }

    /// Char index of a grapheme position, clamped to the line.
    fn char_idx(&self, pos: Position) -> usize {
        let line = (pos.line as usize).min(self.rope.len_lines() - 1);
        let start = self.rope.line_to_char(line);
        let chars: usize = self
            .line(line as u32)
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        start + chars
    }
}

impl TextHost for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line(&self, line: u32) -> String {
        if line as usize >= self.rope.len_lines() {
            return String::new();
        }
        let mut s = self.rope.line(line as usize).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.snapshot();
        self.rope = Rope::from_str(text);
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
    }

    fn insert(&mut self, at: Position, text: &str) {
        self.snapshot();
        let idx = self.char_idx(at);
        self.rope.insert(idx, text);
    }

    fn delete_range(&mut self, span: Span) -> String {
        self.snapshot();
        let start = self.char_idx(span.start);
        let end = self.char_idx(span.end).max(start);
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    fn undo(&mut self) {
        if let Some((text, cursor)) = self.undo_stack.pop() {
            self.redo_stack.push((self.rope.to_string(), self.cursor));
            self.rope = Rope::from_str(&text);
            self.cursor = cursor;
        }
    }

    fn redo(&mut self) {
        if let Some((text, cursor)) = self.redo_stack.pop() {
            self.undo_stack.push((self.rope.to_string(), self.cursor));
            self.rope = Rope::from_str(&text);
            self.cursor = cursor;
        }
    }
}
