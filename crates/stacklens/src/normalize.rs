//! Coercion of arbitrary thrown values into canonical errors.
//!
//! [`classify`] sorts a [`ThrownValue`] into one of three cases and
//! [`normalize`] turns each case into a [`ThrownError`]. Both are total.

use serde_json::{Map, Value};

use stacklens_core::thrown::{DEFAULT_ERROR_NAME, ThrownError, ThrownValue};

/// Hint attached to errors synthesized from values that were not errors.
pub const THROW_ERRORS_HINT: &str = "To get as much information as possible from your errors, \
    throw error objects that carry a message and a stack instead of plain values.";

/// The shape of a thrown value.
#[derive(Debug, Clone, PartialEq)]
pub enum Thrown {
    /// Already a canonical error.
    Canonical(ThrownError),
    /// A plain record with both a `message` and a `stack` field.
    ErrorLike(Map<String, Value>),
    /// Anything else.
    Opaque(Value),
}

/// Classify a thrown value by its structure.
pub fn classify(value: ThrownValue) -> Thrown {
    match value {
        ThrownValue::Error(error) => Thrown::Canonical(error),
        ThrownValue::Value(Value::Object(record))
            if record.contains_key("message") && record.contains_key("stack") =>
        {
            Thrown::ErrorLike(record)
        }
        ThrownValue::Value(value) => Thrown::Opaque(value),
    }
}

/// Coerce a thrown value into a canonical error.
///
/// ```
/// use serde_json::json;
/// use stacklens::normalize::{THROW_ERRORS_HINT, normalize};
///
/// let error = normalize(json!({"status": 404}).into());
/// assert_eq!(error.message(), r#"{"status":404}"#);
/// assert_eq!(error.hint(), Some(THROW_ERRORS_HINT));
/// ```
pub fn normalize(value: ThrownValue) -> ThrownError {
    match classify(value) {
        Thrown::Canonical(error) => error,
        Thrown::ErrorLike(record) => from_record(record),
        Thrown::Opaque(value) => synthesize(value),
    }
}

fn from_record(mut record: Map<String, Value>) -> ThrownError {
    let name = match record.remove("name") {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => DEFAULT_ERROR_NAME.to_string(),
    };
    let message = match record.remove("message") {
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let mut error = ThrownError::new(message).with_name(name);
    let stack = match record.remove("stack") {
        Some(Value::String(stack)) => stack,
        _ => error.to_string(),
    };
    error = error.with_stack(stack);

    match record.remove("code") {
        Some(Value::String(code)) => error = error.with_code(code),
        Some(Value::Number(code)) => error = error.with_code(code.to_string()),
        _ => {}
    }
    if let Some(Value::String(hint)) = record.remove("hint") {
        error = error.with_hint(hint);
    }
    match record.remove("cause") {
        None | Some(Value::Null) => {}
        Some(cause) => error = error.with_cause(cause),
    }

    error
}

fn synthesize(value: Value) -> ThrownError {
    let message = value.to_string();
    let stack = format!("{DEFAULT_ERROR_NAME}: {message}");

    ThrownError::new(message)
        .with_stack(stack)
        .with_hint(THROW_ERRORS_HINT)
        .with_cause(value)
}
