#![allow(dead_code)]

pub mod mock_buffer;

use mock_buffer::MockBuffer;
use vimkeys::{Engine, Event, KeyEvent, Mode, Outcome, Position, TextHost};

/// An engine wired to a mock host, fed from key strings.
///
/// In key strings `\x1b` is Escape and `\n` is Enter. Keys the engine does
/// not consume are typed into the buffer, as a text widget would.
pub struct Harness {
    pub engine: Engine,
    pub buf: MockBuffer,
    pub events: Vec<Event>,
}

impl Harness {
    /// Command mode, cursor at `(line, col)`.
    pub fn new(text: &str, line: u32, col: u32) -> Self {
        let engine = Engine::builder().mode(Mode::Command).build().unwrap();
        Self::with_engine(engine, text, line, col)
    }

    pub fn with_engine(engine: Engine, text: &str, line: u32, col: u32) -> Self {
        Self {
            engine,
            buf: MockBuffer::with_cursor(text, line, col),
            events: Vec::new(),
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> Outcome {
        self.buf.begin_group();
        let outcome = self.engine.handle_key(&mut self.buf, key);
        self.events.extend(outcome.events.iter().cloned());
        if !outcome.consumed
            && let Some(text) = typed_text(key)
        {
            let at = self.buf.cursor();
            self.buf.insert(at, &text);
            let next = if text == "\n" {
                Position::new(at.line + 1, 0)
            } else {
                Position::new(at.line, at.col + 1)
            };
            self.buf.set_cursor(next);
        }
        outcome
    }

    pub fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            let key = match c {
                '\x1b' => KeyEvent::esc(),
                '\n' => KeyEvent::enter(),
                c => KeyEvent::char(c),
            };
            self.key(key);
        }
    }

    pub fn text(&self) -> String {
        self.buf.text()
    }

    pub fn cursor(&self) -> Position {
        self.buf.cursor()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn register(&self) -> &str {
        self.engine.register().content()
    }
}

fn typed_text(key: KeyEvent) -> Option<String> {
    match key.code {
        vimkeys::KeyCode::Enter => Some("\n".to_string()),
        _ => key.typed_char().map(String::from),
    }
}
