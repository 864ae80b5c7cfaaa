//! Configuration types for the Stacklens error parser.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`ParserConfig`] - Construction-time settings of an
//!   [`ErrorParser`](crate::ErrorParser).
//!
//! # Example
//!
//! ```
//! # use stacklens::config::ParserConfig;
//! let config = ParserConfig::default().with_offset(2);
//! assert_eq!(config.offset(), 2);
//! assert_eq!(config.window_size(), 11);
//! ```

use serde::Deserialize;

use stacklens_core::window::{DEFAULT_WINDOW_SIZE, SourceWindow};

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given parser configuration.
    pub fn new(parser: ParserConfig) -> Self {
        Self { parser }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the parser configuration for modification.
    pub fn parser_mut(&mut self) -> &mut ParserConfig {
        &mut self.parser
    }
}

/// Construction-time settings of an error parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Number of leading frames to drop.
    #[serde(default)]
    offset: usize,

    /// Number of source lines shown around a frame's line.
    #[serde(default = "default_window_size")]
    window_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl ParserConfig {
    /// Set the number of leading frames to drop.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the number of source lines in a window.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Returns the number of leading frames to drop.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of source lines in a window.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the [`SourceWindow`] described by this configuration.
    pub fn window(&self) -> SourceWindow {
        SourceWindow::new(self.window_size)
    }
}
