//! The two accepted textual forms of a package specifier.
//!
//! Both patterns are anchored on both ends. The registry pattern cannot
//! match anything containing `:`, so a URL never falls into it and the
//! two forms are disjoint for well-formed input.

use std::sync::LazyLock;

use regex::Regex;

/// Short registry name with optional `pecl/` namespace and an optional
/// `-<stability>` or `@<version>` suffix.
///
/// The date-like version (`YYYYMMDD`) is deliberately loose: months and
/// days are only checked by their first digit, so `20241339` is accepted.
pub(crate) const REGISTRY_PATTERN: &str = r"(?x)
    ^
    (?:pecl/)?
    (?P<package>[[:word:]]+)
    (?:
        -(?P<stability>alpha|beta|stable)
        |
        @(?P<version>
            [0-9]+(?:\.[0-9]+){1,2}
            |
            [1-2][0-9]{3}[0-1][0-9][0-3][0-9]
        )
    )?
    $
";

/// Repository URL with a `git`, `http` or `https` scheme, whose last path
/// segment names the package, optionally suffixed with `.git` and an
/// optional `#<reference>` fragment.
pub(crate) const SOURCE_CONTROL_PATTERN: &str = r"(?x)
    ^
    (?:git|https?)://.*?/
    (?P<package>[[:word:]]+)
    (?:\.git)?
    (?:\#(?P<reference>.*))?
    $
";

pub(crate) static REGISTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REGISTRY_PATTERN).expect("registry pattern is valid"));

pub(crate) static SOURCE_CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SOURCE_CONTROL_PATTERN).expect("source-control pattern is valid")
});
