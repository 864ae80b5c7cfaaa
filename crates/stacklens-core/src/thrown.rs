//! Thrown values and the canonical error shape.
//!
//! Callers hand the pipeline a [`ThrownValue`]: either an already-canonical
//! [`ThrownError`] or an arbitrary JSON value of unknown shape. Everything
//! downstream of normalization works with [`ThrownError`] only.

use std::{error::Error as StdError, fmt};

use serde::Serialize;
use serde_json::Value;

/// Name given to errors that do not carry one.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// Name that marks an error raised while parsing source text.
pub const SYNTAX_ERROR_NAME: &str = "SyntaxError";

/// A value as it was thrown, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ThrownValue {
    /// An error that already has the canonical shape.
    Error(ThrownError),
    /// Any other value.
    Value(Value),
}

impl From<ThrownError> for ThrownValue {
    fn from(error: ThrownError) -> Self {
        Self::Error(error)
    }
}

impl From<Value> for ThrownValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ThrownValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for ThrownValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

/// The canonical error representation.
///
/// Carries at least a message; a stack string is present for every error the
/// normalizer produces.
///
/// # Example
///
/// ```
/// use stacklens_core::thrown::ThrownError;
///
/// let error = ThrownError::new("boom")
///     .with_stack("Error: boom\n    at main (/srv/app.js:3:7)")
///     .with_code("E_BOOM");
///
/// assert_eq!(error.name(), "Error");
/// assert_eq!(error.code(), Some("E_BOOM"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrownError {
    name: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<ThrownValue>>,
}

impl ThrownError {
    /// Create an error named `Error` with the given message and nothing else.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_ERROR_NAME.to_string(),
            message: message.into(),
            stack: None,
            code: None,
            hint: None,
            cause: None,
        }
    }

    /// Build an error from a raw stack-trace string.
    ///
    /// The header is looked for before the first frame line of either the
    /// V8 (`at ...`) or Gecko (`fn@file:line`) dialect. A `Name: message`
    /// first line is the header. Later lines only count when their name ends
    /// in `Error`, as with syntax errors that print the offending location
    /// and code excerpt first. Stacks without a header keep the default name
    /// and use their first non-empty line as the message. The whole text is
    /// kept as the stack.
    ///
    /// ```
    /// use stacklens_core::thrown::ThrownError;
    ///
    /// let error = ThrownError::from_stack("TypeError: x is not a function\n    at run (/a.js:1:1)");
    /// assert_eq!(error.name(), "TypeError");
    /// assert_eq!(error.message(), "x is not a function");
    /// ```
    pub fn from_stack(stack: impl Into<String>) -> Self {
        let stack = stack.into();
        let preamble = || {
            stack
                .lines()
                .map(str::trim)
                .take_while(|line| !is_frame_line(line))
                .filter(|line| !line.is_empty())
        };

        let header = preamble()
            .enumerate()
            .find_map(|(index, line)| match line.split_once(": ") {
                Some((name, message))
                    if is_error_name(name) && (index == 0 || name.ends_with("Error")) =>
                {
                    Some((name.to_string(), message.to_string()))
                }
                _ => None,
            });

        let (name, message) = header.unwrap_or_else(|| {
            let first = preamble().next().unwrap_or_default();
            (DEFAULT_ERROR_NAME.to_string(), first.to_string())
        });

        Self::new(message).with_name(name).with_stack(stack)
    }

    /// Build an error from a Rust error, carrying its `source()` chain as
    /// nested causes.
    pub fn from_std_error(error: &(dyn StdError + 'static)) -> Self {
        let mut converted = Self::new(error.to_string());
        if let Some(source) = error.source() {
            converted.cause = Some(Box::new(ThrownValue::Error(Self::from_std_error(source))));
        }
        converted
    }

    /// Set the error name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the stack-trace string.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the hint shown alongside the error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the cause of this error.
    pub fn with_cause(mut self, cause: impl Into<ThrownValue>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn cause(&self) -> Option<&ThrownValue> {
        self.cause.as_deref()
    }

    /// Returns `true` if this error was raised while parsing source text.
    pub fn is_syntax_error(&self) -> bool {
        self.name == SYNTAX_ERROR_NAME
    }
}

impl fmt::Display for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl StdError for ThrownError {}

/// Returns `true` for a trimmed line that is a V8 or Gecko stack frame.
fn is_frame_line(line: &str) -> bool {
    if line.starts_with("at ") {
        return true;
    }
    match line.split_once('@') {
        Some((function, location)) if !function.contains(": ") => location
            .rsplit_once(':')
            .is_some_and(|(_, number)| !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())),
        _ => false,
    }
}

fn is_error_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct Outer(io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load settings")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_new_defaults() {
        let error = ThrownError::new("boom");
        assert_eq!(error.name(), "Error");
        assert_eq!(error.message(), "boom");
        assert!(error.stack().is_none());
        assert!(error.cause().is_none());
        assert!(!error.is_syntax_error());
    }

    #[test]
    fn test_from_stack_with_header() {
        let error = ThrownError::from_stack("RangeError: too far\n    at walk (/srv/a.js:9:2)");
        assert_eq!(error.name(), "RangeError");
        assert_eq!(error.message(), "too far");
        assert_eq!(
            error.stack(),
            Some("RangeError: too far\n    at walk (/srv/a.js:9:2)")
        );
    }

    #[test]
    fn test_from_stack_syntax_error_header_after_location() {
        let stack = "/tmp/bad.js:7\n  let x = ;\n          ^\n\nSyntaxError: Unexpected token ';'\n    at wrapSafe (node:internal/modules/cjs/loader:1378:20)";
        let error = ThrownError::from_stack(stack);
        assert_eq!(error.name(), "SyntaxError");
        assert_eq!(error.message(), "Unexpected token ';'");
        assert!(error.is_syntax_error());
    }

    #[test]
    fn test_from_stack_without_header() {
        let error = ThrownError::from_stack("something odd happened\n    at run (/a.js:1:1)");
        assert_eq!(error.name(), "Error");
        assert_eq!(error.message(), "something odd happened");
    }

    #[test]
    fn test_from_stack_gecko_frames_are_not_the_message() {
        let stack = "load@https://cdn.test/app.js:10:15\n@https://cdn.test/app.js:20:1";
        let error = ThrownError::from_stack(stack);
        assert_eq!(error.name(), "Error");
        assert_eq!(error.message(), "");
        assert_eq!(error.stack(), Some(stack));
    }

    #[test]
    fn test_from_stack_ignores_continuation_lines() {
        let error = ThrownError::from_stack(
            "something odd happened\nNote: retry later\n    at run (/a.js:1:1)",
        );
        assert_eq!(error.name(), "Error");
        assert_eq!(error.message(), "something odd happened");
    }

    #[test]
    fn test_from_stack_stops_at_first_frame() {
        let error = ThrownError::from_stack(
            "oops\n    at run (/a.js:1:1)\nRangeError: from a later log line",
        );
        assert_eq!(error.name(), "Error");
        assert_eq!(error.message(), "oops");
    }

    #[test]
    fn test_is_frame_line() {
        assert!(is_frame_line("at run (/a.js:1:1)"));
        assert!(is_frame_line("load@https://cdn.test/app.js:10:15"));
        assert!(!is_frame_line("Error: mail a@b.test:1:2 bounced"));
        assert!(!is_frame_line("contact me@example.com"));
        assert!(!is_frame_line("/tmp/bad.js:7"));
    }

    #[test]
    fn test_from_std_error_carries_source_chain() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "settings.toml missing");
        let error = ThrownError::from_std_error(&Outer(inner));

        assert_eq!(error.message(), "failed to load settings");
        match error.cause() {
            Some(ThrownValue::Error(cause)) => {
                assert_eq!(cause.message(), "settings.toml missing");
                assert!(cause.cause().is_none());
            }
            other => panic!("Expected error cause, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ThrownError::new("boom").to_string(), "Error: boom");
        assert_eq!(
            ThrownError::new("").with_name("AbortError").to_string(),
            "AbortError"
        );
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let error = ThrownError::new("boom").with_cause(json!({"id": 4}));
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            json!({"name": "Error", "message": "boom", "cause": {"id": 4}})
        );
    }
}
