//! Download dispatch.
//!
//! The [`Dispatcher`] picks a retrieval strategy from the kind of specifier
//! that matched and hands it the destination `<root>/<package name>`.
//! Strategies sit behind the [`Fetcher`] trait:
//! - [`DistFetcher`]: HTTP download of `distUrl`, unpacked in place
//! - [`GitFetcher`]: clone of `sourceUrl` checked out at `sourceReference`

pub mod archive;
mod dist;
mod git;

use std::path::{Path, PathBuf};

use crate::config::PickleConfig;
use crate::error::{DownloadError, RetrievalError};
use crate::package::PackageDescriptor;
use crate::specifier::{SpecifierKind, SpecifierMatch};

pub use dist::DistFetcher;
pub use git::GitFetcher;

/// A retrieval strategy.
///
/// Implementations own retries, timeouts and cleanup; the dispatcher
/// performs none of them.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Path,
    ) -> Result<(), RetrievalError>;
}

/// Routes a built descriptor to the strategy for its specifier kind.
pub struct Dispatcher {
    dist: Box<dyn Fetcher>,
    source: Box<dyn Fetcher>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DistFetcher::default(), GitFetcher::default())
    }
}

impl Dispatcher {
    pub fn new(dist: impl Fetcher + 'static, source: impl Fetcher + 'static) -> Self {
        Self {
            dist: Box::new(dist),
            source: Box::new(source),
        }
    }

    pub fn from_config(config: &PickleConfig) -> Self {
        Self::new(
            DistFetcher::from_config(&config.download),
            GitFetcher::from_config(&config.git),
        )
    }

    /// `<root>/<name>`; callers pass the root only.
    pub fn destination_for(destination_root: &Path, descriptor: &PackageDescriptor) -> PathBuf {
        destination_root.join(descriptor.name())
    }

    /// Retrieve the package described by `descriptor` under `destination_root`.
    ///
    /// Returns the directory the package was written to. A strategy failure
    /// is passed through unmodified, wrapped with the package name and
    /// destination.
    pub fn dispatch(
        &self,
        specifier: &SpecifierMatch,
        descriptor: &PackageDescriptor,
        destination_root: &Path,
    ) -> Result<PathBuf, DownloadError> {
        debug_assert_eq!(specifier.package(), descriptor.name());

        let destination = Self::destination_for(destination_root, descriptor);
        let kind = specifier.kind();
        let fetcher = match kind {
            SpecifierKind::Registry => &self.dist,
            SpecifierKind::SourceControl => &self.source,
        };

        tracing::info!(
            name = descriptor.name(),
            version = descriptor.pretty_version(),
            destination = %destination.display(),
            strategy = kind.as_str(),
            "downloading package"
        );

        match fetcher.fetch(descriptor, &destination) {
            Ok(()) => {
                tracing::info!(name = descriptor.name(), "download complete");
                Ok(destination)
            }
            Err(source) => {
                tracing::warn!(name = descriptor.name(), error = %source, "download failed");
                Err(DownloadError::Retrieval {
                    name: descriptor.name().to_string(),
                    destination,
                    source,
                })
            }
        }
    }
}
