//! Release stability channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stability channel of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Alpha,
    Beta,
    #[default]
    Stable,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Stable => "stable",
        }
    }

    /// Guess the channel of a source-control reference such as
    /// `v2.0.0-beta1` or `release/ALPHA`. Anything else counts as stable.
    pub fn infer_from_reference(reference: &str) -> Self {
        let lowered = reference.to_ascii_lowercase();
        if lowered.contains("alpha") {
            Self::Alpha
        } else if lowered.contains("beta") {
            Self::Beta
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "stable" => Ok(Self::Stable),
            other => anyhow::bail!("Unknown stability: {}", other),
        }
    }
}
