//! Visual mode: a live selection that motions extend and operators consume.
//!
//! The engine owns the selection; every change is mirrored to the host with
//! [`TextHost::set_selection`] so it can draw the highlight.

use tracing::trace;

use crate::edit;
use crate::engine::Engine;
use crate::key::{KeyCode, KeyEvent};
use crate::keymap::{self, VisualAction};
use crate::operator::{Awaiting, Operator, PendingState};
use crate::traits::TextHost;
use crate::types::{Mode, Position, Range, Selection, VisualKind};
use crate::view::BufferView;

impl Engine {
    pub(crate) fn enter_visual<H: TextHost + ?Sized>(&mut self, host: &mut H, kind: VisualKind) {
        let cursor = BufferView::new(&*host).clamp_cursor(host.cursor());
        self.switch_mode(host, Mode::Visual);
        self.selection = Some(Selection::at(cursor, kind));
        host.set_cursor(cursor);
        host.set_selection(self.selection);
    }

    pub(crate) fn visual_key<H: TextHost + ?Sized>(&mut self, host: &mut H, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.switch_mode(host, Mode::Command);
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.continue_pending(host, pending, key);
            return;
        }
        if let Some(d) = key.typed_char().and_then(|c| c.to_digit(10))
            && self.count.accept_digit(d)
        {
            return;
        }
        let Some(action) = keymap::visual_action(&key) else {
            trace!(?key, "unmapped key ignored");
            self.count.clear();
            return;
        };
        match action {
            VisualAction::Motion(mk) => {
                let count = self.count.take();
                self.motion_key(host, None, count, mk);
            }
            VisualAction::Operator(op) => {
                self.count.clear();
                self.visual_apply(host, op);
            }
            VisualAction::Kind(kind) => {
                self.count.clear();
                match self.selection {
                    Some(sel) if sel.kind != kind => {
                        self.selection = Some(Selection { kind, ..sel });
                        host.set_selection(self.selection);
                    }
                    _ => self.switch_mode(host, Mode::Command),
                }
            }
            VisualAction::SwapEnds => {
                self.count.clear();
                if let Some(sel) = self.selection {
                    let swapped = Selection {
                        anchor: sel.cursor,
                        cursor: sel.anchor,
                        kind: sel.kind,
                    };
                    self.selection = Some(swapped);
                    host.set_cursor(swapped.cursor);
                    host.set_selection(self.selection);
                }
            }
            VisualAction::TextObject(scope) => {
                self.pending = Some(PendingState::new(
                    None,
                    self.count.take(),
                    Awaiting::TextObject(scope),
                ));
            }
            VisualAction::Join => {
                self.count.clear();
                self.visual_join(host);
            }
        }
    }

    /// Move the selection's cursor end to `pos`.
    pub(crate) fn visual_extend<H: TextHost + ?Sized>(&mut self, host: &mut H, pos: Position) {
        let pos = BufferView::new(&*host).clamp_cursor(pos);
        let Some(sel) = self.selection.as_mut() else {
            host.set_cursor(pos);
            return;
        };
        sel.cursor = pos;
        host.set_cursor(pos);
        host.set_selection(self.selection);
    }

    /// Replace the selection with a text object's range.
    pub(crate) fn visual_select<H: TextHost + ?Sized>(&mut self, host: &mut H, range: Range) {
        let Some(current) = self.selection else {
            return;
        };
        let selection = {
            let view = BufferView::new(&*host);
            if range.linewise {
                Selection {
                    anchor: Position::new(range.first_line(), 0),
                    cursor: Position::new(range.last_line(), 0),
                    kind: VisualKind::LineWise,
                }
            } else {
                let end = if range.inclusive {
                    range.end
                } else if range.end.col > 0 {
                    Position::new(range.end.line, range.end.col - 1)
                } else {
                    view.prev_grapheme(range.end).unwrap_or(range.start)
                };
                if end < range.start {
                    trace!("empty text object leaves selection unchanged");
                    return;
                }
                Selection {
                    anchor: range.start,
                    cursor: end,
                    kind: current.kind,
                }
            }
        };
        self.selection = Some(selection);
        host.set_cursor(selection.cursor);
        host.set_selection(self.selection);
    }

    /// Apply `op` to the selection and leave visual mode.
    fn visual_apply<H: TextHost + ?Sized>(&mut self, host: &mut H, op: Operator) {
        let Some(sel) = self.selection else {
            self.switch_mode(host, Mode::Command);
            return;
        };
        self.apply_operator(host, op, sel.range(), sel.cursor);
    }

    fn visual_join<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        let Some(sel) = self.selection else {
            self.switch_mode(host, Mode::Command);
            return;
        };
        let range = sel.range();
        let count = range.last_line() - range.first_line() + 1;
        self.switch_mode(host, Mode::Command);
        let start = Position::new(range.first_line(), 0);
        if let Some(pos) = edit::join_lines(host, start, count) {
            host.set_cursor(pos);
        }
    }
}
