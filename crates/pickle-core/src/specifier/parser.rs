//! Specifier parser: matches input against the grammar and extracts fields.

use regex::Captures;

use crate::error::ResolveError;
use crate::package::Stability;

use super::grammar::{REGISTRY_RE, SOURCE_CONTROL_RE};

/// Which grammar a specifier matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    Registry,
    SourceControl,
}

impl SpecifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::SourceControl => "source-control",
        }
    }
}

/// Captures of a registry-form specifier such as `pecl/apcu@5.1.23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMatch {
    pub package: String,
    pub stability: Option<Stability>,
    pub version: Option<String>,
}

/// Captures of a source-control specifier such as
/// `https://github.com/krakjoe/apcu.git#v5.1.23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceControlMatch {
    /// The input URL, fragment included.
    pub url: String,
    pub package: String,
    pub reference: Option<String>,
}

impl SourceControlMatch {
    /// The repository URL with any `#fragment` stripped.
    pub fn repository_url(&self) -> &str {
        self.url
            .split_once('#')
            .map_or(self.url.as_str(), |(repo, _)| repo)
    }
}

/// A specifier that matched one of the two grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierMatch {
    Registry(RegistryMatch),
    SourceControl(SourceControlMatch),
}

impl SpecifierMatch {
    /// Parse a specifier string.
    ///
    /// The registry grammar is tried first, then the source-control grammar.
    /// Returns `None` when neither matches.
    pub fn parse(specifier: &str) -> Option<Self> {
        if let Some(caps) = REGISTRY_RE.captures(specifier) {
            return Some(Self::Registry(RegistryMatch {
                package: caps["package"].to_string(),
                stability: non_empty(&caps, "stability").and_then(|s| s.parse().ok()),
                version: non_empty(&caps, "version").map(str::to_string),
            }));
        }

        if let Some(caps) = SOURCE_CONTROL_RE.captures(specifier) {
            return Some(Self::SourceControl(SourceControlMatch {
                url: specifier.to_string(),
                package: caps["package"].to_string(),
                reference: non_empty(&caps, "reference").map(str::to_string),
            }));
        }

        None
    }

    /// Like [`SpecifierMatch::parse`], reporting the offending input on failure.
    pub fn try_parse(specifier: &str) -> Result<Self, ResolveError> {
        Self::parse(specifier).ok_or_else(|| ResolveError::NoMatch {
            specifier: specifier.to_string(),
        })
    }

    pub fn kind(&self) -> SpecifierKind {
        match self {
            Self::Registry(_) => SpecifierKind::Registry,
            Self::SourceControl(_) => SpecifierKind::SourceControl,
        }
    }

    pub fn package(&self) -> &str {
        match self {
            Self::Registry(m) => &m.package,
            Self::SourceControl(m) => &m.package,
        }
    }

    pub fn is_registry(&self) -> bool {
        matches!(self, Self::Registry(_))
    }

    pub fn is_source_control(&self) -> bool {
        matches!(self, Self::SourceControl(_))
    }
}

/// Optional groups that participate with an empty match count as absent.
fn non_empty<'h>(caps: &Captures<'h>, group: &str) -> Option<&'h str> {
    caps.name(group)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}
