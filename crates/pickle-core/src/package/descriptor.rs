//! Canonical package descriptor.

use serde::Serialize;

use super::Stability;

/// Source-control system of a checkout location. Only git is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Git,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Git => "git",
        }
    }
}

/// Where a package's bytes come from: a distribution archive or a
/// source-control checkout, never both.
///
/// Serialize-only: an untagged decode could not reject input carrying both
/// locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PackageOrigin {
    #[serde(rename_all = "camelCase")]
    Dist { dist_url: String },
    #[serde(rename_all = "camelCase")]
    Source {
        source_url: String,
        source_type: SourceType,
        source_reference: String,
    },
}

/// Fully resolved identity of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    name: String,
    version: String,
    pretty_version: String,
    stability: Stability,
    #[serde(flatten)]
    origin: PackageOrigin,
}

impl PackageDescriptor {
    /// Descriptor of a registry package downloaded from `dist_url`.
    pub fn dist(
        name: impl Into<String>,
        version: impl Into<String>,
        pretty_version: impl Into<String>,
        stability: Stability,
        dist_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            pretty_version: pretty_version.into(),
            stability,
            origin: PackageOrigin::Dist {
                dist_url: dist_url.into(),
            },
        }
    }

    /// Descriptor of a git checkout of `source_url` at `reference`.
    ///
    /// The reference doubles as version and pretty version.
    pub fn git(
        name: impl Into<String>,
        source_url: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        let reference = reference.into();
        Self {
            name: name.into(),
            version: reference.clone(),
            pretty_version: reference.clone(),
            stability: Stability::infer_from_reference(&reference),
            origin: PackageOrigin::Source {
                source_url: source_url.into(),
                source_type: SourceType::Git,
                source_reference: reference,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn pretty_version(&self) -> &str {
        &self.pretty_version
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    pub fn origin(&self) -> &PackageOrigin {
        &self.origin
    }

    pub fn dist_url(&self) -> Option<&str> {
        match &self.origin {
            PackageOrigin::Dist { dist_url } => Some(dist_url),
            PackageOrigin::Source { .. } => None,
        }
    }

    pub fn source_url(&self) -> Option<&str> {
        match &self.origin {
            PackageOrigin::Source { source_url, .. } => Some(source_url),
            PackageOrigin::Dist { .. } => None,
        }
    }

    pub fn source_type(&self) -> Option<SourceType> {
        match &self.origin {
            PackageOrigin::Source { source_type, .. } => Some(*source_type),
            PackageOrigin::Dist { .. } => None,
        }
    }

    pub fn source_reference(&self) -> Option<&str> {
        match &self.origin {
            PackageOrigin::Source {
                source_reference, ..
            } => Some(source_reference),
            PackageOrigin::Dist { .. } => None,
        }
    }
}
