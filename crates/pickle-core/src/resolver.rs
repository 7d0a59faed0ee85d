//! One-call resolve-and-download.
//!
//! Wires the parser, builder and dispatcher together. Each call handles a
//! single specifier from start to finish and shares no mutable state, so
//! independent specifiers may be processed on separate threads as long as
//! their package names differ.

use std::path::{Path, PathBuf};

use crate::config::PickleConfig;
use crate::download::{Dispatcher, Fetcher};
use crate::error::{PickleError, ResolveError};
use crate::package::{DescriptorBuilder, PackageDescriptor};
use crate::specifier::SpecifierMatch;

/// A specifier that matched, together with its descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub specifier: SpecifierMatch,
    pub descriptor: PackageDescriptor,
}

/// A package written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub descriptor: PackageDescriptor,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct PackageResolver {
    builder: DescriptorBuilder,
    dispatcher: Dispatcher,
}

impl PackageResolver {
    pub fn new(builder: DescriptorBuilder, dispatcher: Dispatcher) -> Self {
        Self {
            builder,
            dispatcher,
        }
    }

    pub fn from_config(config: &PickleConfig) -> Self {
        Self::new(
            DescriptorBuilder::new(&config.registry.base_url),
            Dispatcher::from_config(config),
        )
    }

    /// Resolver with custom strategies, keeping the configured registry base.
    pub fn with_fetchers(
        config: &PickleConfig,
        dist: impl Fetcher + 'static,
        source: impl Fetcher + 'static,
    ) -> Self {
        Self::new(
            DescriptorBuilder::new(&config.registry.base_url),
            Dispatcher::new(dist, source),
        )
    }

    pub fn builder(&self) -> &DescriptorBuilder {
        &self.builder
    }

    /// Parse and build, without touching the network or filesystem.
    pub fn resolve(&self, specifier: &str) -> Result<Resolution, ResolveError> {
        let matched = match SpecifierMatch::try_parse(specifier) {
            Ok(matched) => matched,
            Err(err) => {
                tracing::debug!(specifier, "specifier matched no grammar");
                return Err(err);
            }
        };
        tracing::debug!(
            specifier,
            kind = matched.kind().as_str(),
            package = matched.package(),
            "specifier parsed"
        );

        let descriptor = self.builder.build(&matched);
        Ok(Resolution {
            specifier: matched,
            descriptor,
        })
    }

    /// Resolve `specifier` and retrieve it into `<destination_root>/<name>`.
    ///
    /// Nothing is downloaded when the specifier matches no grammar.
    pub fn download(
        &self,
        specifier: &str,
        destination_root: &Path,
    ) -> Result<Downloaded, PickleError> {
        let Resolution {
            specifier,
            descriptor,
        } = self.resolve(specifier)?;
        let path = self
            .dispatcher
            .dispatch(&specifier, &descriptor, destination_root)?;
        Ok(Downloaded { descriptor, path })
    }
}
