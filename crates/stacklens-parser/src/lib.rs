//! # Stacklens Parser
//!
//! Turns stack-trace strings into [`RawFrame`]s.
//!
//! Two entry points are provided:
//!
//! 1. [`parse_stack`] - parse every frame line of a V8 or Gecko/JavaScriptCore
//!    style stack trace
//! 2. [`syntax_error_location`] - pull the single `file:line` pair that
//!    syntax errors report on the first line of their stack
//!
//! ## Usage
//!
//! ```
//! use stacklens_parser::parse_stack;
//!
//! let stack = "Error: boom\n    at main (/srv/app.js:3:7)\n    at node:internal/main/run_main_module:28:49";
//! let frames = parse_stack(stack);
//!
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].function_name.as_deref(), Some("main"));
//! assert_eq!(frames[0].file_name.as_deref(), Some("/srv/app.js"));
//! assert_eq!(frames[0].line_number, Some(3));
//! assert_eq!(frames[1].file_name.as_deref(), Some("node:internal/main/run_main_module"));
//! ```

mod location;
mod stack;
mod syntax;

pub use stacklens_core::frame::RawFrame;

pub use stack::parse_stack;
pub use syntax::syntax_error_location;
