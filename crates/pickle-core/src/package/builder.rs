//! Builds package descriptors from parsed specifiers.

use crate::specifier::{RegistryMatch, SourceControlMatch, SpecifierMatch};

use super::{PackageDescriptor, Stability};

/// Root of the PECL artifact repository.
pub const DEFAULT_REGISTRY_BASE: &str = "http://pecl.php.net/get";

/// Reference checked out when a repository URL carries no fragment.
pub const DEFAULT_REFERENCE: &str = "master";

/// Version token of a registry package without an explicit version.
pub const LATEST_VERSION: &str = "latest";

/// Turns a [`SpecifierMatch`] into a [`PackageDescriptor`].
///
/// Building is pure: the same match always yields an equal descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorBuilder {
    registry_base: String,
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_BASE)
    }
}

impl DescriptorBuilder {
    /// Create a builder resolving registry packages against `registry_base`.
    pub fn new(registry_base: impl Into<String>) -> Self {
        let base: String = registry_base.into();
        Self {
            registry_base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn registry_base(&self) -> &str {
        &self.registry_base
    }

    pub fn build(&self, specifier: &SpecifierMatch) -> PackageDescriptor {
        match specifier {
            SpecifierMatch::Registry(m) => self.build_registry(m),
            SpecifierMatch::SourceControl(m) => Self::build_source_control(m),
        }
    }

    /// `<base>/<name>[-<stability>][/<version>]`
    fn build_registry(&self, m: &RegistryMatch) -> PackageDescriptor {
        let mut dist_url = format!("{}/{}", self.registry_base, m.package);
        if let Some(stability) = m.stability {
            dist_url.push('-');
            dist_url.push_str(stability.as_str());
        }

        let stability = m.stability.unwrap_or_default();
        let (version, pretty_version) = match &m.version {
            Some(version) => {
                dist_url.push('/');
                dist_url.push_str(version);
                (version.clone(), version.clone())
            }
            None => (LATEST_VERSION.to_string(), format!("latest-{}", stability)),
        };

        PackageDescriptor::dist(&m.package, version, pretty_version, stability, dist_url)
    }

    fn build_source_control(m: &SourceControlMatch) -> PackageDescriptor {
        let reference = m.reference.as_deref().unwrap_or(DEFAULT_REFERENCE);
        PackageDescriptor::git(&m.package, m.repository_url(), reference)
    }
}
