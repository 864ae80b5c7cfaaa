//! Stack-trace string parsing.
//!
//! Two line formats are understood:
//!
//! - V8: `    at fn (file:line:col)` or `    at file:line:col`
//! - Gecko / JavaScriptCore: `fn@file:line:col` or `@file:line:col`
//!
//! A stack is treated as V8 when any of its lines is a V8 frame. Lines that
//! are not frames (the `Name: message` header, message continuations, code
//! excerpts) are skipped.

use log::{debug, trace};
use stacklens_core::frame::RawFrame;
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::preceded,
    error::{ContextError, ErrMode, ModalResult},
    token::{rest, take_till},
};

use crate::location::{line_column, position, v8_location};

const ASYNC_PREFIX: &str = "async ";

const EVAL_LINE_MARKER: &str = " line ";

/// Parse all frames of a stack-trace string, top of the stack first.
pub fn parse_stack(stack: &str) -> Vec<RawFrame> {
    let v8_frames = parse_lines(stack, v8_frame);
    if !v8_frames.is_empty() {
        debug!(frames = v8_frames.len(); "Parsed V8 stack");
        return v8_frames;
    }

    let gecko_frames = parse_lines(stack, gecko_frame);
    debug!(frames = gecko_frames.len(); "Parsed Gecko stack");
    gecko_frames
}

fn parse_lines(stack: &str, mut frame: impl FnMut(&mut &str) -> ModalResult<RawFrame>) -> Vec<RawFrame> {
    stack
        .lines()
        .filter_map(|line| match frame.parse(line) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                trace!(line; "Skipping non-frame line");
                None
            }
        })
        .collect()
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse a V8 frame line: `at <body>`.
fn v8_frame(input: &mut &str) -> ModalResult<RawFrame> {
    let line = *input;
    let body = preceded((space0, "at", space1), rest).parse_next(input)?;
    let body = body.trim_end();
    if body.is_empty() {
        return Err(backtrack());
    }

    let (function, location) = split_v8_body(body);
    let location = v8_location(location);
    if function.is_none() && location.file.is_none() {
        // `at <anonymous>`, or prose that happens to start with "at".
        return Err(backtrack());
    }

    Ok(RawFrame {
        file_name: location.file.map(str::to_string),
        line_number: location.line,
        column_number: location.column,
        function_name: function.map(str::to_string),
        args: None,
        raw: Some(line.trim().to_string()),
    })
}

/// Split a V8 frame body into its function name and location.
///
/// `fn (location)` puts the location in the trailing parenthesized group.
/// `eval` frames nest their origin as `eval at fn (location), <anonymous>:1:1`;
/// the innermost location is the one that points at real source.
fn split_v8_body(body: &str) -> (Option<&str>, &str) {
    let Some(open) = location_open_paren(body) else {
        // `at async file:///srv/app.mjs:5:1` names no function but keeps the prefix.
        return match body.strip_prefix(ASYNC_PREFIX) {
            Some(location) => (Some(ASYNC_PREFIX.trim_end()), location.trim_start()),
            None => (None, body),
        };
    };

    let function = body[..open].trim();
    let mut location = &body[open + 1..body.len() - 1];

    if location.starts_with("eval at ") {
        if let Some(inner_open) = location.rfind('(') {
            let inner = &location[inner_open + 1..];
            location = inner.split(')').next().unwrap_or(inner);
        }
    }

    ((!function.is_empty()).then_some(function), location)
}

/// Find the `(` that opens the trailing location group.
///
/// The location follows the function name as ` (`, so the first such
/// occurrence wins even when the location itself holds unbalanced parens.
fn location_open_paren(body: &str) -> Option<usize> {
    if !body.ends_with(')') {
        return None;
    }
    body.find(" (")
        .map(|index| index + 1)
        .or_else(|| matching_open_paren(body))
}

/// Find the `(` matching a trailing `)`.
fn matching_open_paren(body: &str) -> Option<usize> {
    if !body.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    for (index, c) in body.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a Gecko / JavaScriptCore frame line: `fn@location`.
fn gecko_frame(input: &mut &str) -> ModalResult<RawFrame> {
    let line = *input;
    let (function, _, location) = (take_till(0.., '@'), '@', rest).parse_next(input)?;

    let function = function.trim();
    if function.contains(": ") {
        // A `Name: message` header that happens to contain an `@`.
        return Err(backtrack());
    }

    // Firefox marks eval'd code as `file line 12 > eval:1:3`, where 12 is the
    // line of the calling script.
    let is_eval = location.contains(" > ");
    let (file, line_number, column) = match location.find(EVAL_LINE_MARKER) {
        Some(index) if is_eval => {
            let host_line = location[index + EVAL_LINE_MARKER.len()..]
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .and_then(|digits| position.parse(digits).ok());
            (&location[..index], host_line, None)
        }
        _ => {
            let location = location.trim();
            line_column(location)
                .map(|(file, line, column)| (file, Some(line), column))
                .unwrap_or((location, None, None))
        }
    };

    if line_number.is_none() && !is_eval {
        return Err(backtrack());
    }

    Ok(RawFrame {
        file_name: (!file.is_empty()).then(|| file.to_string()),
        line_number,
        column_number: column,
        function_name: (!function.is_empty()).then(|| function.to_string()),
        args: None,
        raw: Some(line.trim().to_string()),
    })
}
