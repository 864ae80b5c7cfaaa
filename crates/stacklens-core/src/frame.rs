//! Stack frame types.
//!
//! A [`RawFrame`] is what a stack-string parser produces: location and
//! function details only. A [`StackFrame`] is the enhanced form placed in a
//! report, carrying the origin classification and an optional source excerpt.

use std::fmt;

use serde::Serialize;

/// One frame as extracted from a stack-trace string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// The frame's original text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Where the code behind a frame comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    /// Runtime internals.
    Native,
    /// Third-party dependency code.
    Module,
    /// The application's own code.
    App,
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Native => write!(f, "native"),
            FrameType::Module => write!(f, "module"),
            FrameType::App => write!(f, "app"),
        }
    }
}

/// How a frame's file identifier is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Fs,
    Http,
    Https,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Fs => write!(f, "fs"),
            FileType::Http => write!(f, "http"),
            FileType::Https => write!(f, "https"),
        }
    }
}

/// A single line of source text with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Line content without the line terminator.
    pub chunk: String,
    pub line_number: u32,
}

impl Chunk {
    pub fn new(chunk: impl Into<String>, line_number: u32) -> Self {
        Self {
            chunk: chunk.into(),
            line_number,
        }
    }
}

/// A frame in a parsed error report.
///
/// `frame_type` and `file_type` are only set when the frame has a file name.
/// `source` is only set for filesystem frames that are not native.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<FrameType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<Chunk>>,
}

impl StackFrame {
    /// Returns `true` if the frame belongs to the application's own code.
    pub fn is_app(&self) -> bool {
        self.frame_type == Some(FrameType::App)
    }

    /// Returns the chunk for the frame's own line, if the source window has it.
    pub fn source_line(&self) -> Option<&Chunk> {
        let line = self.line_number?;
        self.source
            .as_ref()?
            .iter()
            .find(|chunk| chunk.line_number == line)
    }
}

impl From<RawFrame> for StackFrame {
    fn from(raw: RawFrame) -> Self {
        Self {
            file_name: raw.file_name,
            line_number: raw.line_number,
            column_number: raw.column_number,
            function_name: raw.function_name,
            args: raw.args,
            raw: raw.raw,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_raw_frame_leaves_enhancements_empty() {
        let raw = RawFrame {
            file_name: Some("/srv/app.js".to_string()),
            line_number: Some(3),
            column_number: Some(7),
            function_name: Some("main".to_string()),
            args: None,
            raw: Some("at main (/srv/app.js:3:7)".to_string()),
        };

        let frame = StackFrame::from(raw);
        assert_eq!(frame.file_name.as_deref(), Some("/srv/app.js"));
        assert_eq!(frame.line_number, Some(3));
        assert!(frame.frame_type.is_none());
        assert!(frame.file_type.is_none());
        assert!(frame.source.is_none());
    }

    #[test]
    fn test_source_line() {
        let frame = StackFrame {
            line_number: Some(2),
            source: Some(vec![Chunk::new("a", 1), Chunk::new("b", 2)]),
            ..StackFrame::default()
        };
        assert_eq!(frame.source_line(), Some(&Chunk::new("b", 2)));

        let without_source = StackFrame {
            line_number: Some(2),
            ..StackFrame::default()
        };
        assert!(without_source.source_line().is_none());
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let frame = StackFrame {
            file_name: Some("https://cdn.test/a.js".to_string()),
            frame_type: Some(FrameType::App),
            file_type: Some(FileType::Https),
            ..StackFrame::default()
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"fileName": "https://cdn.test/a.js", "type": "app", "fileType": "https"})
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FrameType::Module.to_string(), "module");
        assert_eq!(FileType::Https.to_string(), "https");
    }
}
