//! Count prefixes (`5j`, `3dd`, `2d3w`).

/// Counts are capped so repeated commands stay bounded.
pub const MAX_COUNT: u32 = 99_999;

/// Buffers digits typed before a command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    current: Option<u32>,
}

impl Count {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a digit. Returns `false` for a `0` with nothing buffered, which
    /// is the line-start command rather than part of a count.
    pub fn accept_digit(&mut self, d: u32) -> bool {
        debug_assert!(d < 10);
        if d == 0 && self.current.is_none() {
            return false;
        }
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d)
            .min(MAX_COUNT);
        self.current = Some(next);
        true
    }

    /// The buffered count, or 1 when none was typed. Resets the buffer.
    pub fn consume(&mut self) -> u32 {
        self.take().unwrap_or(1).max(1)
    }

    /// The buffered count if one was typed. Resets the buffer.
    pub fn take(&mut self) -> Option<u32> {
        self.current.take()
    }

    pub fn peek(&self) -> Option<u32> {
        self.current
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Combine the counts before and after an operator: `2d3w` deletes six words.
///
/// `None` only when neither count was typed.
pub fn multiply(count1: Option<u32>, count2: Option<u32>) -> Option<u32> {
    match (count1, count2) {
        (None, None) => None,
        (a, b) => {
            let product = a.unwrap_or(1).saturating_mul(b.unwrap_or(1));
            Some(product.clamp(1, MAX_COUNT))
        }
    }
}
