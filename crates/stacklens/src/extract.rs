//! Raw frame extraction.
//!
//! The [`FrameExtractor`] seam turns a normalized error into raw frames. The
//! default [`StackTraceExtractor`] parses the error's stack string.
//! Syntax errors get one extra frame in front, taken from the location their
//! stack reports on its first line.

use log::debug;

use stacklens_core::{frame::RawFrame, thrown::ThrownError};
use stacklens_parser::{parse_stack, syntax_error_location};

/// Turns a normalized error into raw frames, top of the stack first.
pub trait FrameExtractor: Send + Sync {
    fn extract(&self, error: &ThrownError) -> Vec<RawFrame>;
}

/// Parses V8 and Gecko style stack strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct StackTraceExtractor;

impl FrameExtractor for StackTraceExtractor {
    fn extract(&self, error: &ThrownError) -> Vec<RawFrame> {
        error.stack().map(parse_stack).unwrap_or_default()
    }
}

/// Extract all frames of `error`, including the syntax error location.
pub(crate) fn extract_frames(error: &ThrownError, extractor: &dyn FrameExtractor) -> Vec<RawFrame> {
    let mut frames = Vec::new();

    if error.is_syntax_error() {
        if let Some(frame) = error.stack().and_then(syntax_error_location) {
            debug!(file_name:? = frame.file_name, line:? = frame.line_number; "Found syntax error location");
            frames.push(frame);
        }
    }

    frames.extend(extractor.extract(error));
    frames
}
