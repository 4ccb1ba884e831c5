use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::Position;

/// Named positions set with `m{a-zA-Z}`.
///
/// Marks are not adjusted when the buffer changes; a stale mark is clamped
/// when it is jumped to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Marks {
    marks: BTreeMap<char, Position>,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_name(name: char) -> bool {
        name.is_ascii_alphabetic()
    }

    pub fn set(&mut self, name: char, pos: Position) -> Result<()> {
        if !Self::is_valid_name(name) {
            return Err(Error::InvalidMarkName(name));
        }
        self.marks.insert(name, pos);
        Ok(())
    }

    pub fn get(&self, name: char) -> Option<Position> {
        self.marks.get(&name).copied()
    }

    pub fn delete(&mut self, name: char) -> Option<Position> {
        self.marks.remove(&name)
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Position)> + '_ {
        self.marks.iter().map(|(name, pos)| (*name, *pos))
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
