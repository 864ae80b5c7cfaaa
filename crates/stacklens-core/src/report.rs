//! The assembled error report.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    frame::StackFrame,
    thrown::{ThrownError, ThrownValue},
};

/// A normalized, structured error report.
///
/// Created fresh for every parse. Fields are public so post-processors can
/// mutate the report in place before it is handed back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedError {
    pub message: String,
    pub name: String,
    /// Frames in extraction order, after the offset was applied.
    pub frames: Vec<StackFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<ThrownValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip)]
    error: Arc<ThrownError>,
}

impl ParsedError {
    /// Assemble a report for `error` with the given frames.
    pub fn new(error: Arc<ThrownError>, frames: Vec<StackFrame>) -> Self {
        Self {
            message: error.message().to_string(),
            name: error.name().to_string(),
            frames,
            cause: error.cause().cloned(),
            hint: error.hint().map(str::to_string),
            code: error.code().map(str::to_string),
            stack: error.stack().map(str::to_string),
            error,
        }
    }

    /// The normalized error this report was built from.
    pub fn error(&self) -> &Arc<ThrownError> {
        &self.error
    }

    /// The first frame that belongs to the application's own code.
    pub fn first_app_frame(&self) -> Option<&StackFrame> {
        self.frames.iter().find(|frame| frame.is_app())
    }
}
