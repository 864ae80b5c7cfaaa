//! Source windows.
//!
//! A [`SourceWindow`] cuts a bounded, line-numbered excerpt out of a file's
//! text around a target line. With the default size of 11 the excerpt holds
//! 5 lines before the target, the target and 5 lines after. Near the end of
//! the file the missing trailing lines are made up with extra leading ones.
//!
//! ```
//! use stacklens_core::window::SourceWindow;
//!
//! let text = (1..=30).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
//! let chunks = SourceWindow::default().slice(&text, 15).unwrap();
//!
//! assert_eq!(chunks.len(), 11);
//! assert_eq!(chunks.first().unwrap().line_number, 10);
//! assert_eq!(chunks.last().unwrap().line_number, 20);
//! ```

use std::ops::Range;

use crate::frame::Chunk;

/// Number of lines in a window under the default configuration.
pub const DEFAULT_WINDOW_SIZE: usize = 11;

/// Computes line windows of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    size: usize,
}

impl Default for SourceWindow {
    fn default() -> Self {
        Self {
            size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl SourceWindow {
    /// Create a window of `size` lines. A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Total number of lines in a full window.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of context lines wanted on each side of the target line.
    pub fn half(&self) -> usize {
        (self.size - 1).div_ceil(2)
    }

    /// Compute the 0-based line range to show for a target `line` (1-based)
    /// in a file of `line_count` lines.
    ///
    /// Returns `None` for an empty file.
    pub fn range(&self, line_count: usize, line: u32) -> Option<Range<usize>> {
        if line_count == 0 {
            return None;
        }

        let count = line_count as i64;
        let size = self.size as i64;
        let half = self.half() as i64;
        let line = i64::from(line);

        let mut start = (line - half - 1).max(0);

        // Fewer trailing lines than wanted: borrow leading context so the
        // window still ends on the last line.
        if count - line < half {
            start = start.min(count - size).max(0);
        }

        let end = (start + size).min(count);
        (start < end).then(|| start as usize..end as usize)
    }

    /// Slice `contents` around `line` into numbered chunks.
    ///
    /// Returns `None` when the text has no lines, never an empty vector.
    pub fn slice(&self, contents: &str, line: u32) -> Option<Vec<Chunk>> {
        let lines: Vec<&str> = contents.lines().collect();
        let range = self.range(lines.len(), line)?;

        Some(
            lines[range.clone()]
                .iter()
                .zip(range.start + 1..)
                .map(|(text, number)| Chunk::new(*text, number as u32))
                .collect(),
        )
    }
}
