//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the standard error types and
//! miette's rich diagnostic formatting used in the CLI.
//!
//! TOML syntax errors in a configuration file are rendered with the offending
//! span labeled in the file's text. Every other error is rendered with a
//! code and, where one helps, a hint.

use std::{fmt, ops::Range, path::Path};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use stacklens::StacklensError;

use crate::{CliError, config::ConfigError};

/// Adapter for a configuration file that failed to parse.
pub struct ConfigDiagnostic<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: NamedSource<String>,
}

impl<'a> ConfigDiagnostic<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(path: &Path, message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self {
            message,
            span,
            src: NamedSource::new(path.display().to_string(), src.to_string()),
        }
    }
}

impl fmt::Debug for ConfigDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for ConfigDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse TOML configuration")
    }
}

impl std::error::Error for ConfigDiagnostic<'_> {}

impl MietteDiagnostic for ConfigDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("stacklens::config::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.message))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for errors without source text to point into.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(ConfigError::Parse { .. }) => "stacklens::config::parse",
            CliError::Config(ConfigError::MissingFile(_)) => "stacklens::config::missing",
            CliError::Config(ConfigError::Read { .. }) => "stacklens::config::read",
            CliError::Config(ConfigError::Validation(_)) => "stacklens::config::invalid",
            CliError::Stacklens(StacklensError::PreProcessor { .. }) => "stacklens::pre_processor",
            CliError::Stacklens(StacklensError::PostProcessor { .. }) => {
                "stacklens::post_processor"
            }
            CliError::Io(_) => "stacklens::io",
            CliError::Json(_) => "stacklens::json",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                Some(Box::new("check the path passed to --config"))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A configuration error with source location information.
    Diagnostic(ConfigDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into an error miette can render.
///
/// Configuration parse errors that carry their file's text become a
/// [`Reportable::Diagnostic`]; everything else a [`Reportable::Error`].
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Config(ConfigError::Parse {
            path,
            src,
            message,
            span,
        }) => Reportable::Diagnostic(ConfigDiagnostic::new(path, message, span.as_ref(), src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
