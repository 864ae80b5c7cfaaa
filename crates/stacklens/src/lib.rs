//! Stacklens - Normalize thrown values into structured error reports.
//!
//! An [`ErrorParser`] takes any thrown value, coerces it into a canonical
//! error, extracts and classifies its stack frames and attaches a window of
//! source text to every frame that points at application or dependency code
//! on the local filesystem.

pub mod config;
pub mod normalize;

mod cache;
mod error;
mod extract;
mod loader;
mod offset;

pub use stacklens_core::{classify, frame, report, thrown, window};

pub use cache::SourceCache;
pub use error::StacklensError;
pub use extract::{FrameExtractor, StackTraceExtractor};
pub use loader::{FnLoader, FsLoader, SourceLoader};
pub use offset::apply_offset;

use std::{error::Error as StdError, fmt, future::Future, pin::Pin, sync::Arc};

use log::{debug, info, trace};

use stacklens_core::{
    frame::{FileType, FrameType, RawFrame, StackFrame},
    report::ParsedError,
    thrown::{ThrownError, ThrownValue},
};

use config::ParserConfig;

/// Error type accepted from caller-supplied extension points.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A boxed future as returned by loaders and post-processors.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Upper bound on the number of reports [`ErrorParser::parse_chain`] returns.
pub const MAX_CAUSE_DEPTH: usize = 16;

type PreProcessor = Box<dyn Fn(ThrownValue) -> Result<ThrownValue, BoxError> + Send + Sync>;

type PostProcessor = Box<
    dyn for<'a> Fn(&'a mut ParsedError, &'a ThrownError) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync,
>;

/// Turns thrown values into [`ParsedError`] reports.
///
/// Each parser owns its own [`SourceCache`], so source text is loaded at
/// most once per file identifier for the lifetime of the parser.
///
/// # Examples
///
/// ```rust,no_run
/// use stacklens::{ErrorParser, config::ParserConfig, thrown::ThrownError};
///
/// # async fn run() -> Result<(), stacklens::StacklensError> {
/// let mut parser = ErrorParser::new(ParserConfig::default().with_offset(1));
/// parser
///     .use_parser(|value| Ok(value))
///     .use_transformer(|report, _error| {
///         Box::pin(async move {
///             report.frames.retain(|frame| frame.is_app());
///             Ok(())
///         })
///     });
///
/// let error = ThrownError::from_stack("Error: boom\n    at main (/srv/app.js:3:7)");
/// let report = parser.parse(error).await?;
/// println!("{}", report.message);
/// # Ok(())
/// # }
/// ```
pub struct ErrorParser {
    config: ParserConfig,
    cache: SourceCache,
    extractor: Box<dyn FrameExtractor>,
    parsers: Vec<PreProcessor>,
    transformers: Vec<PostProcessor>,
}

impl ErrorParser {
    /// Create a parser that reads sources from the filesystem.
    ///
    /// # Arguments
    ///
    /// * `config` - Frame offset and source window settings
    pub fn new(config: ParserConfig) -> Self {
        Self {
            cache: SourceCache::new(config.window()),
            config,
            extractor: Box::new(StackTraceExtractor),
            parsers: Vec::new(),
            transformers: Vec::new(),
        }
    }

    /// Register a synchronous pre-processor.
    ///
    /// Pre-processors run in registration order on the raw value, before it
    /// is normalized.
    pub fn use_parser<F>(&mut self, parser: F) -> &mut Self
    where
        F: Fn(ThrownValue) -> Result<ThrownValue, BoxError> + Send + Sync + 'static,
    {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Register an asynchronous post-processor.
    ///
    /// Post-processors are awaited one at a time in registration order and
    /// may mutate the report in place.
    pub fn use_transformer<F>(&mut self, transformer: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut ParsedError, &'a ThrownError) -> BoxFuture<'a, Result<(), BoxError>>
            + Send
            + Sync
            + 'static,
    {
        self.transformers.push(Box::new(transformer));
        self
    }

    /// Load source text with `loader` instead of reading the filesystem.
    ///
    /// Sources already cached stay cached.
    pub fn define_source_loader<F, Fut>(&mut self, loader: F) -> &mut Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<String>, BoxError>> + Send + 'static,
    {
        self.set_source_loader(Arc::new(FnLoader::new(loader)))
    }

    /// Load source text with a [`SourceLoader`] implementation.
    pub fn set_source_loader(&mut self, loader: Arc<dyn SourceLoader>) -> &mut Self {
        self.cache.set_loader(loader);
        self
    }

    /// Replace the stack-string parser.
    pub fn set_frame_extractor(&mut self, extractor: impl FrameExtractor + 'static) -> &mut Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The source cache owned by this parser.
    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Parse a thrown value into a report.
    ///
    /// Fails only when a pre- or post-processor fails; any shape of `value`
    /// produces a report.
    pub async fn parse(&self, value: impl Into<ThrownValue>) -> Result<ParsedError, StacklensError> {
        let mut value = value.into();
        for (index, parser) in self.parsers.iter().enumerate() {
            trace!(index; "Running pre-processor");
            value = parser(value).map_err(|source| StacklensError::PreProcessor { index, source })?;
        }

        let error = Arc::new(normalize::normalize(value));
        debug!(name = error.name(), message = error.message(); "Normalized thrown value");

        let raw_frames = extract::extract_frames(&error, self.extractor.as_ref());
        let extracted = raw_frames.len();
        let raw_frames = apply_offset(raw_frames, self.config.offset());
        debug!(extracted, kept = raw_frames.len(); "Extracted frames");

        let mut frames = Vec::with_capacity(raw_frames.len());
        for raw in raw_frames {
            frames.push(self.enhance_frame(raw).await);
        }

        let mut report = ParsedError::new(Arc::clone(&error), frames);
        for (index, transformer) in self.transformers.iter().enumerate() {
            trace!(index; "Running post-processor");
            transformer(&mut report, error.as_ref())
                .await
                .map_err(|source| StacklensError::PostProcessor { index, source })?;
        }

        info!(name = report.name, frames = report.frames.len(); "Parsed error");
        Ok(report)
    }

    /// Parse a value and then each of its causes, outermost first.
    ///
    /// Stops after [`MAX_CAUSE_DEPTH`] reports, or when a cause is the value
    /// it was found on, which is the case for values synthesized from
    /// non-error input.
    pub async fn parse_chain(
        &self,
        value: impl Into<ThrownValue>,
    ) -> Result<Vec<ParsedError>, StacklensError> {
        let mut reports = Vec::new();
        let mut next = Some(value.into());

        while let Some(value) = next.take() {
            if reports.len() == MAX_CAUSE_DEPTH {
                debug!(depth = MAX_CAUSE_DEPTH; "Cause chain truncated");
                break;
            }
            let report = self.parse(value.clone()).await?;
            next = report.cause.clone().filter(|cause| *cause != value);
            reports.push(report);
        }

        Ok(reports)
    }

    async fn enhance_frame(&self, raw: RawFrame) -> StackFrame {
        let mut frame = StackFrame::from(raw);
        let Some(file_name) = frame.file_name.as_deref().map(classify::normalize_file_name) else {
            return frame;
        };

        let frame_type = classify::frame_type(&file_name);
        let file_type = classify::file_type(&file_name);

        if file_type == FileType::Fs && frame_type != FrameType::Native {
            if let Some(line) = frame.line_number {
                frame.source = self.cache.chunks(&file_name, line).await;
            }
        }

        frame.file_name = Some(file_name);
        frame.frame_type = Some(frame_type);
        frame.file_type = Some(file_type);
        frame
    }
}

impl Default for ErrorParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl fmt::Debug for ErrorParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorParser")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("parsers", &self.parsers.len())
            .field("transformers", &self.transformers.len())
            .finish_non_exhaustive()
    }
}
