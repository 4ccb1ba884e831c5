use crate::error::{Error, Result};
use crate::key::{KeyCode, KeyEvent};
use crate::types::Mode;

/// Settings fixed when the engine is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Mode the engine starts in.
    pub initial_mode: Mode,
    /// Key that submits the buffer from insert mode. `None` lets every key
    /// (Enter included) through to the host.
    pub submit_key: Option<KeyEvent>,
    /// Clear the buffer after emitting [`Event::Submitted`](crate::Event::Submitted).
    pub clear_on_submit: bool,
    /// Text inserted by `>` and removed by `<`.
    pub indent_unit: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Insert,
            submit_key: Some(KeyEvent::enter()),
            clear_on_submit: true,
            indent_unit: "    ".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.submit_key, Some(key) if key.code == KeyCode::Esc) {
            return Err(Error::SubmitKeyIsEscape);
        }
        if self.indent_unit.is_empty() || !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Err(Error::InvalidIndentUnit(self.indent_unit.clone()));
        }
        Ok(())
    }
}
