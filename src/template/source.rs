use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Abstraction over where raw template text comes from.
///
/// Lets the engine be exercised in tests without a file system.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Load the raw UTF-8 text for `name`, or `None` when no such template
    /// exists. Errors are reserved for genuine read failures.
    async fn load(&self, name: &str) -> Result<Option<String>, std::io::Error>;

    /// Human-readable location for `name`, used in diagnostics.
    fn location(&self, name: &str) -> String;
}

/// File-system source resolving `name` to `<root>/<name>.html`.
pub struct FileTemplateSource {
    root: PathBuf,
}

impl FileTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.html"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn load(&self, name: &str) -> Result<Option<String>, std::io::Error> {
        match tokio::fs::read_to_string(self.resolve(name)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn location(&self, name: &str) -> String {
        self.resolve(name).display().to_string()
    }
}
