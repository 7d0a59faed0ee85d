//! Package descriptors and how they are built from specifiers.

mod builder;
mod descriptor;
pub mod options;
mod stability;

pub use builder::{DEFAULT_REFERENCE, DEFAULT_REGISTRY_BASE, DescriptorBuilder, LATEST_VERSION};
pub use descriptor::{PackageDescriptor, PackageOrigin, SourceType};
pub use options::{ConfigureOption, OptionKind, read_configure_options};
pub use stability::Stability;
