//! Pickle Core Library
//!
//! Resolves PHP extension package specifiers (PECL names or repository
//! URLs) into package descriptors and retrieves them into a target
//! directory.

pub mod config;
pub mod download;
pub mod error;
pub mod package;
pub mod resolver;
pub mod specifier;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, PickleConfig};

    // Specifiers
    pub use crate::specifier::{SpecifierKind, SpecifierMatch};

    // Packages
    pub use crate::package::{
        ConfigureOption, DescriptorBuilder, OptionKind, PackageDescriptor, PackageOrigin,
        SourceType, Stability,
    };

    // Download
    pub use crate::download::{DistFetcher, Dispatcher, Fetcher, GitFetcher};

    // Errors
    pub use crate::error::{DownloadError, PickleError, ResolveError, RetrievalError};

    // Resolver
    pub use crate::resolver::{Downloaded, PackageResolver, Resolution};
}
