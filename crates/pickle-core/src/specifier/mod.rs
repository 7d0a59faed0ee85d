//! Package specifier parsing.
//!
//! A specifier names a package either by registry name:
//! - `apcu`
//! - `pecl/apcu`
//! - `apcu-beta`
//! - `apcu@5.1.23` or `apcu@20240101`
//!
//! or by repository URL:
//! - `https://github.com/krakjoe/apcu`
//! - `git://example.com/apcu.git#v5.1.23`

mod grammar;
mod parser;

pub use parser::{RegistryMatch, SourceControlMatch, SpecifierKind, SpecifierMatch};
