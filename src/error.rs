//! Error types for chartdoc operations.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for chartdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tag `{tag}` does not form a valid pattern")]
    Pattern {
        tag: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("{} could not be resolved:{}", dependency_count(.0), bullet_list(.0))]
    Dependencies(Vec<DependencyFailure>),

    #[error("values and metadata are out of sync:{}", bullet_list(.0))]
    Check(Vec<CheckIssue>),
}

/// A dependency whose index lookup failed.
#[derive(Debug, thiserror::Error)]
#[error("{dependency} ({url}): {reason}")]
pub struct DependencyFailure {
    pub dependency: String,
    pub url: String,
    #[source]
    pub reason: FetchError,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("index is not valid YAML: {0}")]
    InvalidIndex(#[from] serde_yaml::Error),

    #[error("index has no entry for `{0}`")]
    MissingEntry(String),

    #[error("index entry for `{0}` has no home URL")]
    MissingHome(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

/// A mismatch between the real values tree and the declared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckIssue {
    /// A value exists in the file but no tag documents it
    MissingMetadata(String),
    /// A tag documents a key that has no value in the file
    MissingValue(String),
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckIssue::MissingMetadata(key) => write!(f, "missing metadata for key: {key}"),
            CheckIssue::MissingValue(key) => write!(f, "missing value for metadata: {key}"),
        }
    }
}

fn dependency_count(failures: &[DependencyFailure]) -> String {
    match failures.len() {
        1 => "1 dependency".to_string(),
        n => format!("{n} dependencies"),
    }
}

fn bullet_list<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("\n  - {item}")).collect()
}
