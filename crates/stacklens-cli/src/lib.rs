//! CLI logic for the Stacklens error report tool.
//!
//! Reads a stack trace or a JSON thrown value, runs it through an
//! [`ErrorParser`] together with its cause chain, and writes the reports as
//! JSON.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::{
    fs,
    io::{self, Read as _, Write as _},
};

use log::{debug, info};
use serde_json::Value;

use stacklens::{
    ErrorParser,
    thrown::{ThrownError, ThrownValue},
};

/// Input path that selects standard input.
pub const STDIN_INPUT: &str = "-";

/// Run the Stacklens CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Pre- or post-processor failures
/// - Report serialization errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing error report"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mut parser_config = *app_config.parser();
    if let Some(offset) = args.offset {
        parser_config = parser_config.with_offset(offset);
    }
    debug!(parser_config:?; "Resolved parser configuration");

    let input = read_input(&args.input)?;
    let value = thrown_value(&input);

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let parser = ErrorParser::new(parser_config);
    let reports = runtime.block_on(parser.parse_chain(value))?;

    let json = if args.compact {
        serde_json::to_string(&reports)?
    } else {
        serde_json::to_string_pretty(&reports)?
    };

    match &args.output {
        Some(output) => {
            fs::write(output, format!("{json}\n"))?;
            info!(output_file = output, reports = reports.len(); "Report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> io::Result<String> {
    if input == STDIN_INPUT {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

/// Interpret input text as a thrown value.
///
/// Text that parses as JSON is the thrown value itself; any other text is a
/// stack trace.
fn thrown_value(input: &str) -> ThrownValue {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => value.into(),
        Err(_) => ThrownError::from_stack(input.trim_end()).into(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_input_is_a_value() {
        assert_eq!(
            thrown_value(r#"{"message": "bad", "stack": "Error: bad"}"#),
            ThrownValue::Value(json!({"message": "bad", "stack": "Error: bad"}))
        );
        assert_eq!(thrown_value("404\n"), ThrownValue::Value(json!(404)));
    }

    #[test]
    fn test_text_input_is_a_stack() {
        let input = "TypeError: x is not a function\n    at run (/srv/app.js:4:2)\n";
        match thrown_value(input) {
            ThrownValue::Error(error) => {
                assert_eq!(error.name(), "TypeError");
                assert_eq!(error.message(), "x is not a function");
                assert_eq!(error.stack(), Some(input.trim_end()));
            }
            other => panic!("Expected error, got {other:?}"),
        }
    }
}
