use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::count::{Count, multiply};
use crate::edit;
use crate::error::Result;
use crate::key::{InputEvent, KeyCode, KeyEvent};
use crate::keymap::{self, Action, InsertAt, MotionKey};
use crate::marks::Marks;
use crate::motion::{FindChar, Motion};
use crate::operator::{self, Awaiting, Operator, PendingState};
use crate::register::Register;
use crate::text_object::{self, Scope, TextObjectKind};
use crate::traits::TextHost;
use crate::types::{Mode, Position, Range, Selection, VisualKind};
use crate::view::BufferView;
use crate::word::{self, CharClass};

/// Something the host should react to beyond the buffer edits already made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ModeChanged { from: Mode, to: Mode },
    /// The submit key was pressed in insert mode; carries the buffer text.
    Submitted(String),
}

/// Result of feeding one key to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// `false` means the host should apply its default handling of the key
    /// (typing it, in insert mode).
    pub consumed: bool,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    pub(crate) mode: Mode,
    pub(crate) count: Count,
    pub(crate) pending: Option<PendingState>,
    pub(crate) register: Register,
    pub(crate) marks: Marks,
    pub(crate) selection: Option<Selection>,
    /// Column `j`/`k` aim for; `u32::MAX` after `$`.
    pub(crate) preferred_col: Option<u32>,
    pub(crate) last_find: Option<FindChar>,
    events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub preferred_col: Option<u32>,
    pub pending_count: Option<u32>,
    pub pending: Option<PendingState>,
    pub selection: Option<Selection>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    /// Key that submits from insert mode; `None` disables submitting.
    pub fn submit_key(mut self, key: Option<KeyEvent>) -> Self {
        self.config.submit_key = key;
        self
    }

    pub fn clear_on_submit(mut self, clear: bool) -> Self {
        self.config.clear_on_submit = clear;
        self
    }

    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.config.indent_unit = unit.into();
        self
    }

    pub fn build(self) -> Result<Engine> {
        Engine::with_config(self.config)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: EngineConfig) -> Self {
        Self {
            mode: config.initial_mode,
            config,
            count: Count::new(),
            pending: None,
            register: Register::new(),
            marks: Marks::new(),
            selection: None,
            preferred_col: None,
            last_find: None,
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn register_mut(&mut self) -> &mut Register {
        &mut self.register
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut Marks {
        &mut self.marks
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn pending(&self) -> Option<PendingState> {
        self.pending
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            preferred_col: self.preferred_col,
            pending_count: self.count.peek(),
            pending: self.pending,
            selection: self.selection,
        }
    }

    /// Switch mode from outside key handling, e.g. when the widget gains focus.
    pub fn set_mode<H: TextHost + ?Sized>(&mut self, host: &mut H, mode: Mode) -> Vec<Event> {
        self.events.clear();
        if mode == Mode::Visual {
            self.enter_visual(host, VisualKind::CharWise);
        } else {
            self.switch_mode(host, mode);
        }
        std::mem::take(&mut self.events)
    }

    pub fn handle_event<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        input: InputEvent,
    ) -> Outcome {
        match input {
            InputEvent::Key(key) => self.handle_key(host, key),
            InputEvent::ReceivedChar(_) if self.mode == Mode::Insert => Outcome::default(),
            InputEvent::ReceivedChar(c) => self.handle_key(host, KeyEvent::char(c)),
        }
    }

    pub fn handle_key<H: TextHost + ?Sized>(&mut self, host: &mut H, key: KeyEvent) -> Outcome {
        trace!(?key, mode = self.mode.as_str(), "key");
        self.events.clear();
        let consumed = match self.mode {
            Mode::Insert => self.insert_key(host, key),
            Mode::Command => {
                self.command_key(host, key);
                true
            }
            Mode::Visual => {
                self.visual_key(host, key);
                true
            }
        };
        Outcome {
            consumed,
            events: std::mem::take(&mut self.events),
        }
    }

    fn insert_key<H: TextHost + ?Sized>(&mut self, host: &mut H, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            self.switch_mode(host, Mode::Command);
            return true;
        }
        if self.config.submit_key == Some(key) {
            let text = host.text();
            debug!(len = text.len(), "submitted");
            if self.config.clear_on_submit {
                host.set_text("");
                host.set_cursor(Position::ZERO);
            }
            self.events.push(Event::Submitted(text));
            return true;
        }
        false
    }

    fn command_key<H: TextHost + ?Sized>(&mut self, host: &mut H, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.cancel_pending("escape");
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.continue_pending(host, pending, key);
            return;
        }
        if let Some(d) = digit(&key)
            && self.count.accept_digit(d)
        {
            trace!(count = self.count.peek(), "count");
            return;
        }
        match keymap::command_action(&key) {
            Some(action) => self.run_action(host, action),
            None => {
                trace!(?key, "unmapped key ignored");
                self.count.clear();
            }
        }
    }

    fn run_action<H: TextHost + ?Sized>(&mut self, host: &mut H, action: Action) {
        if !matches!(action, Action::Motion(_)) {
            self.preferred_col = None;
        }
        match action {
            Action::Motion(mk) => {
                let count = self.count.take();
                self.motion_key(host, None, count, mk);
            }
            Action::Operator(op) => {
                let count = self.count.take();
                self.pending = Some(PendingState::new(Some(op), count, Awaiting::Motion));
            }
            Action::Shortcut(shortcut) => {
                let count = self.count.take();
                match shortcut.expand() {
                    (op, Some(motion)) => self.land(host, Some(op), count, motion),
                    (op, None) => self.apply_to_lines(host, op, count.unwrap_or(1)),
                }
            }
            Action::Insert(at) => {
                self.count.clear();
                self.insert_at(host, at);
            }
            Action::Visual(kind) => {
                self.count.clear();
                self.enter_visual(host, kind);
            }
            Action::Paste { before } => {
                let count = self.count.consume();
                let cursor = self.cursor(host);
                if let Some(pos) = edit::paste(host, &self.register, cursor, before, count) {
                    host.set_cursor(pos);
                }
            }
            Action::Replace => self.await_key(Awaiting::ReplaceChar),
            Action::SetMark => self.await_key(Awaiting::MarkName),
            Action::Join => {
                let count = self.count.take().unwrap_or(2);
                let cursor = self.cursor(host);
                if let Some(pos) = edit::join_lines(host, cursor, count) {
                    host.set_cursor(pos);
                }
            }
            Action::ToggleCase => {
                let count = self.count.consume();
                self.toggle_case_forward(host, count);
            }
            Action::Undo | Action::Redo => {
                let count = self.count.consume();
                for _ in 0..count {
                    if action == Action::Undo {
                        host.undo();
                    } else {
                        host.redo();
                    }
                }
                let pos = BufferView::new(&*host).clamp_cursor(host.cursor());
                host.set_cursor(pos);
            }
        }
    }

    /// Keep the typed count and wait for one more key.
    fn await_key(&mut self, awaiting: Awaiting) {
        self.pending = Some(PendingState::new(None, self.count.take(), awaiting));
    }

    pub(crate) fn continue_pending<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        pending: PendingState,
        key: KeyEvent,
    ) {
        let ch = key.typed_char();
        match pending.awaiting {
            Awaiting::Motion => {
                let Some(op) = pending.operator else {
                    return self.cancel_pending("no operator");
                };
                if let Some(d) = digit(&key)
                    && self.count.accept_digit(d)
                {
                    self.pending = Some(pending);
                    return;
                }
                let count = multiply(pending.count1, self.count.take());
                if ch == Some(op.doubling_char()) {
                    return self.apply_to_lines(host, op, count.unwrap_or(1));
                }
                let scope = match ch {
                    Some('i') => Some(Scope::Inner),
                    Some('a') => Some(Scope::Around),
                    _ => None,
                };
                if let Some(scope) = scope {
                    let awaiting = Awaiting::TextObject(scope);
                    self.pending = Some(PendingState::new(Some(op), count, awaiting));
                    return;
                }
                match keymap::motion_key(&key) {
                    Some(mk) => self.motion_key(host, Some(op), count, mk),
                    None => self.cancel_pending("not a motion"),
                }
            }
            Awaiting::TextObject(scope) => match ch.and_then(TextObjectKind::from_char) {
                Some(kind) => self.text_object(host, pending.operator, pending.count1, kind, scope),
                None => self.cancel_pending("not a text object"),
            },
            Awaiting::FindChar(kind) => {
                let Some(ch) = ch else {
                    return self.cancel_pending("find needs a character");
                };
                let find = FindChar { kind, ch };
                self.last_find = Some(find);
                let motion = Motion::Find {
                    find,
                    repeat: false,
                };
                self.land(host, pending.operator, pending.count1, motion);
            }
            Awaiting::ReplaceChar => {
                let Some(ch) = ch else {
                    return self.cancel_pending("replace needs a character");
                };
                let cursor = self.cursor(host);
                match edit::replace_chars(host, cursor, ch, pending.count1.unwrap_or(1)) {
                    Some(pos) => host.set_cursor(pos),
                    None => trace!("replace past line end ignored"),
                }
            }
            Awaiting::MarkName => {
                let Some(name) = ch else {
                    return self.cancel_pending("mark needs a name");
                };
                let cursor = self.cursor(host);
                if let Err(err) = self.marks.set(name, cursor) {
                    trace!(%err, "mark not set");
                }
            }
            Awaiting::MarkJump { linewise } => {
                let Some(name) = ch else {
                    return self.cancel_pending("mark jump needs a name");
                };
                let Some(to) = self.marks.get(name) else {
                    trace!(name = %name, "mark not set");
                    return;
                };
                self.land(host, pending.operator, None, Motion::Jump { to, linewise });
            }
            Awaiting::GPrefix => {
                let (op, count) = (pending.operator, pending.count1);
                match ch {
                    Some('g') => self.land(host, op, count, Motion::DocumentStart),
                    Some(c) if op.is_none() && self.mode == Mode::Command => {
                        match keymap::g_operator_key(c) {
                            Some(op) => {
                                let awaiting = Awaiting::Motion;
                                self.pending = Some(PendingState::new(Some(op), count, awaiting));
                            }
                            None => self.cancel_pending("unknown g command"),
                        }
                    }
                    _ => self.cancel_pending("unknown g command"),
                }
            }
        }
    }

    pub(crate) fn cancel_pending(&mut self, reason: &'static str) {
        if self.pending.take().is_some() || self.count.is_set() {
            trace!(reason, "pending command cancelled");
        }
        self.count.clear();
    }

    pub(crate) fn motion_key<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        op: Option<Operator>,
        count: Option<u32>,
        mk: MotionKey,
    ) {
        match mk {
            MotionKey::Plain(motion) => self.land(host, op, count, motion),
            MotionKey::Find(kind) => {
                self.pending = Some(PendingState::new(op, count, Awaiting::FindChar(kind)));
            }
            MotionKey::RepeatFind { reverse } => match self.last_find {
                Some(last) => {
                    let find = if reverse {
                        FindChar {
                            kind: last.kind.reversed(),
                            ..last
                        }
                    } else {
                        last
                    };
                    self.land(host, op, count, Motion::Find { find, repeat: true });
                }
                None => trace!("no find to repeat"),
            },
            MotionKey::GPrefix => {
                self.pending = Some(PendingState::new(op, count, Awaiting::GPrefix));
            }
            MotionKey::Mark { linewise } => {
                let awaiting = Awaiting::MarkJump { linewise };
                self.pending = Some(PendingState::new(op, count, awaiting));
            }
        }
    }

    /// Finish a motion: move the cursor, extend the selection, or apply `op`.
    fn land<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        op: Option<Operator>,
        count: Option<u32>,
        motion: Motion,
    ) {
        let motion = match (motion, count) {
            (Motion::DocumentStart | Motion::DocumentEnd, Some(n)) => Motion::GotoLine(n),
            (motion, _) => motion,
        };
        let n = count.unwrap_or(1);
        let cursor = self.cursor(host);
        if let Some(op) = op {
            return self.operate_with_motion(host, op, n, motion, cursor);
        }
        let target = {
            let view = BufferView::new(&*host);
            motion.apply(&view, cursor, n, self.preferred_col)
        };
        let Some(target) = target else {
            trace!(?motion, "motion did not move");
            return;
        };
        self.preferred_col = if motion.is_vertical() {
            Some(self.preferred_col.unwrap_or(cursor.col))
        } else if motion == Motion::LineEnd {
            Some(u32::MAX)
        } else {
            None
        };
        if self.mode == Mode::Visual {
            self.visual_extend(host, target.pos);
        } else {
            let pos = BufferView::new(&*host).clamp_cursor(target.pos);
            host.set_cursor(pos);
        }
    }

    fn operate_with_motion<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        op: Operator,
        count: u32,
        motion: Motion,
        cursor: Position,
    ) {
        let range = {
            let view = BufferView::new(&*host);
            match motion {
                // `cw` on a word changes to the end of the word, like `ce`.
                Motion::WordForward { big }
                    if op == Operator::Change && view.class_at(cursor, big) != CharClass::Blank =>
                {
                    let end = word::change_word_end(&view, cursor, count, big);
                    Some(Range::inclusive(cursor, end))
                }
                _ => {
                    let word_forward = matches!(motion, Motion::WordForward { .. });
                    let target = motion.apply(&view, cursor, count, self.preferred_col);
                    target.map(|t| operator::motion_range(&view, cursor, t, word_forward))
                }
            }
        };
        match range {
            Some(range) => self.apply_operator(host, op, range, cursor),
            None => trace!(?op, ?motion, "operator dropped, motion failed"),
        }
    }

    /// `dd`, `cc`, `yy`, `>>` and friends: `count` lines from the cursor.
    fn apply_to_lines<H: TextHost + ?Sized>(&mut self, host: &mut H, op: Operator, count: u32) {
        let cursor = self.cursor(host);
        let last = BufferView::new(&*host).last_line();
        let end = cursor.line.saturating_add(count.max(1) - 1).min(last);
        self.apply_operator(host, op, Range::lines(cursor.line, end), cursor);
    }

    pub(crate) fn text_object<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        op: Option<Operator>,
        count: Option<u32>,
        kind: TextObjectKind,
        scope: Scope,
    ) {
        let cursor = self.cursor(host);
        let range = {
            let view = BufferView::new(&*host);
            text_object::resolve(&view, cursor, kind, scope, count.unwrap_or(1))
        };
        let Some(range) = range else {
            trace!(?kind, ?scope, "no enclosing text object");
            return;
        };
        match op {
            Some(op) => self.apply_operator(host, op, range, cursor),
            None if self.mode == Mode::Visual => self.visual_select(host, range),
            None => {}
        }
    }

    pub(crate) fn apply_operator<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
        op: Operator,
        range: Range,
        cursor: Position,
    ) {
        let pos = operator::apply(
            host,
            op,
            range,
            cursor,
            &mut self.register,
            &self.config.indent_unit,
        );
        self.preferred_col = None;
        if op.enters_insert() {
            self.switch_mode(host, Mode::Insert);
        } else {
            self.switch_mode(host, Mode::Command);
        }
        host.set_cursor(pos);
    }

    fn insert_at<H: TextHost + ?Sized>(&mut self, host: &mut H, at: InsertAt) {
        let cursor = self.cursor(host);
        let pos = {
            let view = BufferView::new(&*host);
            let len = view.line_len(cursor.line);
            match at {
                InsertAt::Cursor => Some(cursor),
                InsertAt::After => Some(Position::new(cursor.line, (cursor.col + 1).min(len))),
                InsertAt::FirstNonBlank => {
                    Some(Position::new(cursor.line, view.first_non_blank(cursor.line)))
                }
                InsertAt::LineEnd => Some(Position::new(cursor.line, len)),
                InsertAt::LineBelow | InsertAt::LineAbove => None,
            }
        };
        let pos = match pos {
            Some(pos) => pos,
            None => edit::open_line(host, cursor, at == InsertAt::LineAbove),
        };
        self.switch_mode(host, Mode::Insert);
        host.set_cursor(pos);
    }

    /// `~`: toggle the case of `count` graphemes and step past them.
    fn toggle_case_forward<H: TextHost + ?Sized>(&mut self, host: &mut H, count: u32) {
        let cursor = self.cursor(host);
        let len = BufferView::new(&*host).line_len(cursor.line);
        if len == 0 {
            return;
        }
        let end = Position::new(cursor.line, cursor.col.saturating_add(count).min(len));
        operator::apply(
            host,
            Operator::ToggleCase,
            Range::exclusive(cursor, end),
            cursor,
            &mut self.register,
            &self.config.indent_unit,
        );
        let pos = BufferView::new(&*host).clamp_cursor(end);
        host.set_cursor(pos);
    }

    /// The host cursor, clamped to the buffer.
    pub(crate) fn cursor<H: TextHost + ?Sized>(&self, host: &H) -> Position {
        host.clamp(host.cursor())
    }

    /// Change mode, dropping any count or pending sequence. Leaving visual
    /// mode discards the selection; entering command mode pulls the cursor
    /// back onto a grapheme.
    pub(crate) fn switch_mode<H: TextHost + ?Sized>(&mut self, host: &mut H, to: Mode) {
        let from = self.mode;
        self.count.clear();
        self.pending = None;
        if from == Mode::Visual && to != Mode::Visual {
            self.selection = None;
            host.set_selection(None);
        }
        if to == Mode::Command {
            let pos = BufferView::new(&*host).clamp_cursor(host.cursor());
            if pos != host.cursor() {
                host.set_cursor(pos);
            }
        }
        if from != to {
            self.mode = to;
            debug!(from = from.as_str(), to = to.as_str(), "mode changed");
            self.events.push(Event::ModeChanged { from, to });
        }
    }
}

fn digit(key: &KeyEvent) -> Option<u32> {
    key.typed_char().and_then(|c| c.to_digit(10))
}
