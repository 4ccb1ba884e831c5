use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Position, Selection, Span};

/// The editable text widget the engine drives.
///
/// Columns are grapheme clusters. An empty buffer still has one (empty) line.
/// The engine calls these synchronously from `handle_key` and never holds
/// on to the host between calls.
pub trait TextHost {
    // Basic queries
    fn line_count(&self) -> u32;
    /// Line contents without the trailing line break; empty when out of range.
    fn line(&self, line: u32) -> String;
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);

    fn cursor(&self) -> Position;
    fn set_cursor(&mut self, pos: Position);

    // Mutations
    fn insert(&mut self, at: Position, text: &str);
    /// Remove `span` and return the removed text.
    fn delete_range(&mut self, span: Span) -> String;

    // Selection highlight; the engine owns the selection state and only mirrors it here.
    fn selection(&self) -> Option<Selection>;
    fn set_selection(&mut self, selection: Option<Selection>);

    fn undo(&mut self);
    fn redo(&mut self);

    fn line_len(&self, line: u32) -> u32 {
        self.line(line).graphemes(true).count() as u32
    }

    fn last_line(&self) -> u32 {
        self.line_count().saturating_sub(1)
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }
}
