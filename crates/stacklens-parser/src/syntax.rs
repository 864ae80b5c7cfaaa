//! Location extraction for syntax errors.
//!
//! An error raised while parsing source text has no executed frames, so the
//! usual stack parser finds nothing. The runtime instead reports the
//! offending `file:line` as the very first line of the stack.

use log::trace;
use stacklens_core::frame::RawFrame;
use winnow::Parser as _;

use crate::location::position;

/// Derive a frame from the first line of a syntax error's stack.
///
/// Everything up to the last `:` is the file identifier, the rest must be a
/// positive line number. Returns `None` when either part is missing.
///
/// ```
/// use stacklens_parser::syntax_error_location;
///
/// let frame = syntax_error_location("/tmp/bad.js:7\n  let x = ;\n\nSyntaxError: Unexpected token ';'").unwrap();
/// assert_eq!(frame.file_name.as_deref(), Some("/tmp/bad.js"));
/// assert_eq!(frame.line_number, Some(7));
///
/// assert!(syntax_error_location("SyntaxError: Unexpected token").is_none());
/// ```
pub fn syntax_error_location(stack: &str) -> Option<RawFrame> {
    let first_line = stack.lines().next()?;
    let (file_name, line) = first_line.rsplit_once(':')?;

    let Ok(line_number) = position.parse(line.trim()) else {
        trace!(first_line; "First stack line has no line number");
        return None;
    };

    if file_name.is_empty() || line_number == 0 {
        return None;
    }

    Some(RawFrame {
        file_name: Some(file_name.to_string()),
        line_number: Some(line_number),
        raw: Some(first_line.to_string()),
        ..RawFrame::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_location() {
        let frame = syntax_error_location("/tmp/bad.js:7").expect("frame");
        assert_eq!(frame.file_name.as_deref(), Some("/tmp/bad.js"));
        assert_eq!(frame.line_number, Some(7));
        assert_eq!(frame.column_number, None);
        assert_eq!(frame.raw.as_deref(), Some("/tmp/bad.js:7"));
    }

    #[test]
    fn test_drive_letter_path() {
        let frame = syntax_error_location(r"C:\app\bad.js:12").expect("frame");
        assert_eq!(frame.file_name.as_deref(), Some(r"C:\app\bad.js"));
        assert_eq!(frame.line_number, Some(12));
    }

    #[test]
    fn test_only_first_line_is_used() {
        assert!(syntax_error_location("SyntaxError: oops\n/tmp/bad.js:7").is_none());
    }

    #[test]
    fn test_rejects_bad_line_numbers() {
        assert!(syntax_error_location("/tmp/bad.js:seven").is_none());
        assert!(syntax_error_location("/tmp/bad.js:0").is_none());
        assert!(syntax_error_location("/tmp/bad.js:-3").is_none());
        assert!(syntax_error_location("/tmp/bad.js").is_none());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(syntax_error_location(":7").is_none());
        assert!(syntax_error_location("").is_none());
    }
}
