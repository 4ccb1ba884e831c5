//! The single yank register.
//!
//! Every yank, delete and change overwrites it; paste reads it without
//! clearing. Paste behaves differently for the two kinds:
//!
//! - **Char-wise**: `p` inserts after the cursor, `P` at the cursor.
//! - **Line-wise**: `p` opens the lines below the current one, `P` above.

/// How the register content was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    Char,
    /// Content is whole lines, each terminated by `\n`.
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    content: String,
    kind: RegisterKind,
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

impl Register {
    /// An empty register.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            kind: RegisterKind::Char,
        }
    }

    /// Replace the content.
    pub fn store(&mut self, content: String, kind: RegisterKind) {
        self.content = content;
        self.kind = kind;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> RegisterKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
