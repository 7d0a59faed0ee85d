//! Error types for specifier resolution and package retrieval.

use std::path::PathBuf;

use thiserror::Error;

/// Outcome of a specifier that matched neither the registry nor the
/// source-control grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unrecognized package specifier: {specifier}")]
    NoMatch { specifier: String },
}

/// Failure reported by a retrieval strategy.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport-level failure (DNS, TLS, timeout, broken body).
    #[error("failed to download {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a success status.
    #[error("download failed with HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The artifact exceeded the configured size cap.
    #[error("artifact from {url} is too large: {size} bytes (max: {max})")]
    TooLarge { url: String, size: u64, max: u64 },

    /// The artifact could not be unpacked.
    #[error("failed to unpack archive: {0}")]
    Archive(String),

    /// A git invocation failed (missing reference, auth, network).
    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },

    /// The strategy was handed a descriptor of the other origin.
    #[error("package '{name}' has no {expected} location")]
    MissingLocation { name: String, expected: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RetrievalError {
    pub(crate) fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    pub(crate) fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<git2::Error> for RetrievalError {
    fn from(err: git2::Error) -> Self {
        Self::git("rev-parse", err.message())
    }
}

/// Failure of the dispatch step, carrying enough context to retry by hand.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to retrieve package '{name}' into {}", .destination.display())]
    Retrieval {
        name: String,
        destination: PathBuf,
        #[source]
        source: RetrievalError,
    },
}

impl DownloadError {
    /// The strategy failure, unmodified.
    pub fn retrieval_error(&self) -> &RetrievalError {
        match self {
            Self::Retrieval { source, .. } => source,
        }
    }

    pub fn destination(&self) -> &std::path::Path {
        match self {
            Self::Retrieval { destination, .. } => destination,
        }
    }
}

/// Any outcome of a full resolve-and-download call that is not success.
#[derive(Debug, Error)]
pub enum PickleError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}
