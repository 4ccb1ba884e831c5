//! A Vim-style modal key interpreter for single- or multi-line text inputs.
//!
//! The [`Engine`] turns key presses into edits on a host widget that
//! implements [`TextHost`]. It keeps the modal state (mode, count, pending
//! operator, yank register, marks, visual selection); the host keeps the
//! text, the cursor and the undo history.
//!
//! ```text
//! Insert --Esc--> Command --v/V--> Visual
//!   ^               |  ^             |
//!   +--i a o c s ---+  +--Esc / op---+
//! ```

pub mod config;
pub mod count;
mod edit;
pub mod engine;
pub mod error;
pub mod key;
pub mod keymap;
pub mod marks;
pub mod motion;
pub mod operator;
pub mod register;
pub mod text_object;
pub mod traits;
pub mod types;
pub mod view;
mod visual;
pub mod word;

pub use crate::config::EngineConfig;
pub use crate::count::{Count, MAX_COUNT};
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot, Event, Outcome};
pub use crate::error::{Error, Result};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers};
pub use crate::marks::Marks;
pub use crate::motion::{FindChar, FindKind, Motion, MotionKind, MotionTarget};
pub use crate::operator::{Awaiting, Operator, PendingState};
pub use crate::register::{Register, RegisterKind};
pub use crate::text_object::{Scope, TextObjectKind};
pub use crate::traits::TextHost;
pub use crate::types::{Mode, Position, Range, Selection, Span, VisualKind};
