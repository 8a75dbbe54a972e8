use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactsLoadError {
    #[error("failed to read analysis document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("analysis document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("analysis document unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the raw analysis document. Only transport and syntax failures are
/// errors; content problems are handled during normalization.
pub trait FactsSource: Send + Sync {
    fn fetch(&self) -> Result<Value, FactsLoadError>;
}

/// Reads the document from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileFactsSource {
    path: PathBuf,
}

impl FileFactsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactsSource for FileFactsSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| FactsLoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let document = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), "loaded analysis document");
        Ok(document)
    }
}

/// In-memory document, used by tests and the offline report.
#[derive(Debug, Clone, Default)]
pub struct StaticFactsSource {
    document: Option<Value>,
}

impl StaticFactsSource {
    pub fn new(document: Value) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// Parses `raw` eagerly so syntax errors surface at construction.
    pub fn from_json(raw: &str) -> Result<Self, FactsLoadError> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// A source whose every fetch fails.
    pub fn unavailable() -> Self {
        Self { document: None }
    }
}

impl FactsSource for StaticFactsSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        self.document
            .clone()
            .ok_or_else(|| FactsLoadError::Unavailable("no document configured".to_string()))
    }
}
