//! Source loaders.
//!
//! A [`SourceLoader`] supplies the text behind a frame's file identifier.
//! [`FsLoader`] reads it from the local filesystem; any closure returning a
//! future can stand in through [`FnLoader`], for example one that fetches
//! remote content.

use std::{fmt, future::Future};

use crate::{BoxError, BoxFuture};

/// Supplies source text for a file identifier.
///
/// `Ok(None)` means the loader knows there is no content. Errors are caught
/// by the [`SourceCache`](crate::cache::SourceCache) and treated the same way.
pub trait SourceLoader: Send + Sync {
    fn load<'a>(&'a self, file_name: &'a str) -> BoxFuture<'a, Result<Option<String>, BoxError>>;
}

/// Reads the file identifier as a path on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load<'a>(&'a self, file_name: &'a str) -> BoxFuture<'a, Result<Option<String>, BoxError>> {
        Box::pin(async move {
            let contents = tokio::fs::read_to_string(file_name).await?;
            Ok(Some(contents))
        })
    }
}

/// Adapts a closure into a [`SourceLoader`].
pub struct FnLoader<F> {
    load: F,
}

impl<F> FnLoader<F> {
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").finish_non_exhaustive()
    }
}

impl<F, Fut> SourceLoader for FnLoader<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, BoxError>> + Send + 'static,
{
    fn load<'a>(&'a self, file_name: &'a str) -> BoxFuture<'a, Result<Option<String>, BoxError>> {
        Box::pin((self.load)(file_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[tokio::test]
    async fn test_fs_loader_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\nsecond").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let contents = FsLoader.load(&path).await.unwrap();
        assert_eq!(contents.as_deref(), Some("first\nsecond"));
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js").to_string_lossy().to_string();

        assert!(FsLoader.load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_fn_loader() {
        let loader = FnLoader::new(|file_name: String| async move {
            Ok::<_, BoxError>(Some(format!("// {file_name}")))
        });

        let contents = loader.load("/srv/app.js").await.unwrap();
        assert_eq!(contents.as_deref(), Some("// /srv/app.js"));
    }
}
