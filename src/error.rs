use thiserror::Error;

/// Errors from the fallible parts of the public API.
///
/// Key handling itself never fails; these cover configuration and direct
/// manipulation of engine state by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("escape cannot be used as the submit key")]
    SubmitKeyIsEscape,

    #[error("indent unit must be non-empty spaces or tabs, got {0:?}")]
    InvalidIndentUnit(String),

    #[error("invalid mark name {0:?}, expected an ASCII letter")]
    InvalidMarkName(char),
}

pub type Result<T> = std::result::Result<T, Error>;
