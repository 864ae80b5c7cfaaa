//! Parsing of frame locations such as `/srv/app.js:3:7`.
//!
//! Locations are split from the right because file identifiers may contain
//! colons of their own: URLs with ports, drive letters, `node:` schemes.

use winnow::{
    Parser as _,
    ascii::digit1,
    error::ModalResult,
};

/// A location split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location<'a> {
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// Parse a line or column number.
pub(crate) fn position(input: &mut &str) -> ModalResult<u32> {
    digit1.parse_to().parse_next(input)
}

/// Split `file:line:col` or `file:line` into its parts.
///
/// Returns `None` when the location carries no line number.
pub(crate) fn line_column(location: &str) -> Option<(&str, u32, Option<u32>)> {
    let (head, last) = location.rsplit_once(':')?;
    let last = position.parse(last.trim()).ok()?;

    match head.rsplit_once(':') {
        Some((file, line)) => match position.parse(line) {
            Ok(line) => Some((file, line, Some(last))),
            Err(_) => Some((head, last, None)),
        },
        None => Some((head, last, None)),
    }
}

/// Parse a V8 location.
///
/// Locations without a line number keep their file only when it looks like
/// one: the `native` sentinel or anything path-like. Placeholders such as
/// `<anonymous>` or `index 0` yield no file.
pub(crate) fn v8_location(location: &str) -> Location<'_> {
    let location = location.trim();

    if let Some((file, line, column)) = line_column(location) {
        return Location {
            file: (!file.is_empty()).then_some(file),
            line: Some(line),
            column,
        };
    }

    let path_like = location == "native" || location.contains('/') || location.contains('\\');
    Location {
        file: path_like.then_some(location),
        line: None,
        column: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_full() {
        assert_eq!(line_column("/srv/app.js:3:7"), Some(("/srv/app.js", 3, Some(7))));
    }

    #[test]
    fn test_line_column_line_only() {
        assert_eq!(line_column("/tmp/bad.js:7"), Some(("/tmp/bad.js", 7, None)));
    }

    #[test]
    fn test_line_column_keeps_inner_colons() {
        assert_eq!(
            line_column("http://localhost:8080/main.js:10:2"),
            Some(("http://localhost:8080/main.js", 10, Some(2)))
        );
        assert_eq!(
            line_column("C:/projects/app.js:4"),
            Some(("C:/projects/app.js", 4, None))
        );
        assert_eq!(
            line_column("node:internal/modules/cjs/loader:1254:14"),
            Some(("node:internal/modules/cjs/loader", 1254, Some(14)))
        );
    }

    #[test]
    fn test_line_column_rejects_missing_numbers() {
        assert_eq!(line_column("native"), None);
        assert_eq!(line_column("/srv/app.js:x"), None);
        assert_eq!(line_column("/srv/app.js:"), None);
    }

    #[test]
    fn test_v8_location_placeholders() {
        assert_eq!(
            v8_location("native"),
            Location {
                file: Some("native"),
                line: None,
                column: None
            }
        );
        assert_eq!(v8_location("<anonymous>").file, None);
        assert_eq!(v8_location("index 0").file, None);
    }
}
