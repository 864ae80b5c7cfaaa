//! Per-parser source cache.
//!
//! [`SourceCache`] maps a normalized file identifier to the text its loader
//! returned, or to the fact that no text is available. Entries are never
//! evicted. The key is the identifier, not the content: two identifiers with
//! identical content are loaded and stored independently.

use std::{collections::HashMap, fmt, sync::Arc};

use log::{debug, trace};
use parking_lot::Mutex;

use stacklens_core::{frame::Chunk, window::SourceWindow};

use crate::loader::{FsLoader, SourceLoader};

/// Memoizes loaded source text and slices windows out of it.
pub struct SourceCache {
    loader: Arc<dyn SourceLoader>,
    window: SourceWindow,
    entries: Mutex<HashMap<String, Option<Arc<str>>>>,
}

impl SourceCache {
    /// Create an empty cache that reads from the filesystem.
    pub fn new(window: SourceWindow) -> Self {
        Self::with_loader(window, Arc::new(FsLoader))
    }

    /// Create an empty cache backed by `loader`.
    pub fn with_loader(window: SourceWindow, loader: Arc<dyn SourceLoader>) -> Self {
        Self {
            loader,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the loader. Entries loaded so far are kept.
    pub fn set_loader(&mut self, loader: Arc<dyn SourceLoader>) {
        self.loader = loader;
    }

    /// Returns the text for `file_name`, loading it on first request.
    ///
    /// Two overlapping first requests for the same identifier may both
    /// invoke the loader; the last result stored wins.
    pub async fn contents(&self, file_name: &str) -> Option<Arc<str>> {
        let cached = self.entries.lock().get(file_name).cloned();
        if let Some(entry) = cached {
            trace!(file_name; "Source cache hit");
            return entry;
        }

        let loaded = match self.loader.load(file_name).await {
            Ok(Some(contents)) => Some(Arc::from(contents)),
            Ok(None) => {
                debug!(file_name; "Source loader returned no content");
                None
            }
            Err(err) => {
                debug!(file_name, error:% = err; "Failed to load source");
                None
            }
        };

        self.entries
            .lock()
            .insert(file_name.to_string(), loaded.clone());
        loaded
    }

    /// Returns the source window around `line` of `file_name`.
    ///
    /// `None` when the file has no content.
    pub async fn chunks(&self, file_name: &str, line: u32) -> Option<Vec<Chunk>> {
        let contents = self.contents(file_name).await?;
        self.window.slice(&contents, line)
    }

    /// Number of identifiers looked up so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` if `file_name` has been looked up, with or without
    /// content.
    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.lock().contains_key(file_name)
    }
}

impl fmt::Debug for SourceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCache")
            .field("window", &self.window)
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}
