//! Frame classification.
//!
//! Pure functions over a file identifier: [`normalize_file_name`] turns the
//! identifier a stack parser reported into the canonical form, [`frame_type`]
//! tells where the code comes from and [`file_type`] tells how it is reached.
//!
//! # Example
//!
//! ```
//! use stacklens_core::classify::{file_type, frame_type, normalize_file_name};
//! use stacklens_core::frame::{FileType, FrameType};
//!
//! let name = normalize_file_name(r"C:\app\node_modules\pg\lib\client.js");
//! assert_eq!(name, "C:/app/node_modules/pg/lib/client.js");
//! assert_eq!(frame_type(&name), FrameType::Module);
//! assert_eq!(file_type(&name), FileType::Fs);
//! ```

use log::trace;
use url::Url;

use crate::frame::{FileType, FrameType};

/// Substrings that mark runtime-internal code.
pub const NATIVE_MARKERS: &[&str] = &["node:", "internal/"];

/// Identifier reported for frames that have no file at all.
pub const NATIVE_SENTINEL: &str = "native";

/// Directory that holds third-party dependencies.
pub const MODULE_MARKER: &str = "node_modules/";

/// Windows extended-length path prefix. Such paths are passed through as-is.
pub const EXTENDED_LENGTH_PREFIX: &str = r"\\?\";

const FILE_URL_SCHEME: &str = "file:";

/// Normalize a frame's file identifier.
///
/// `file:` URLs are resolved to filesystem paths and backslashes are turned
/// into forward slashes, except for extended-length paths.
pub fn normalize_file_name(file_name: &str) -> String {
    let path = if file_name.starts_with(FILE_URL_SCHEME) {
        file_url_to_path(file_name)
    } else {
        file_name.to_string()
    };

    if path.starts_with(EXTENDED_LENGTH_PREFIX) {
        path
    } else {
        path.replace('\\', "/")
    }
}

/// Classify where the code behind `file_name` comes from.
pub fn frame_type(file_name: &str) -> FrameType {
    if file_name == NATIVE_SENTINEL
        || NATIVE_MARKERS
            .iter()
            .any(|marker| file_name.contains(marker))
    {
        FrameType::Native
    } else if file_name.contains(MODULE_MARKER) {
        FrameType::Module
    } else {
        FrameType::App
    }
}

/// Classify how `file_name` is reached.
pub fn file_type(file_name: &str) -> FileType {
    if file_name.starts_with("http://") {
        FileType::Http
    } else if file_name.starts_with("https://") {
        FileType::Https
    } else {
        FileType::Fs
    }
}

fn file_url_to_path(file_url: &str) -> String {
    match Url::parse(file_url).ok().and_then(|url| url.to_file_path().ok()) {
        Some(path) => path.to_string_lossy().into_owned(),
        None => {
            trace!(file_url; "Could not resolve file URL, stripping scheme");
            file_url
                .trim_start_matches(FILE_URL_SCHEME)
                .trim_start_matches("//")
                .to_string()
        }
    }
}
