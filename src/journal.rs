//! Plain text audit buffer recording every deduction made on a board.

use core::fmt;

/// Accumulates one human-readable line per cell change or blacklist entry.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<String>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Journal::default()
    }

    /// Appends one trace line.
    pub(crate) fn record(&mut self, line: String) {
        self.entries.push(line);
    }

    /// Discards all recorded lines.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Recorded lines, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True if nothing has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.entries {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
