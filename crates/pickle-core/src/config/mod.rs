//! Configuration loading for pickle.toml
//!
//! The file lives at `<config dir>/pickle/pickle.toml` by default and every
//! key is optional.

mod schema;
mod store;

pub use schema::{DownloadSection, GitSection, PickleConfig, RegistrySection};
pub use store::{CONFIG_FILE_NAME, ConfigStore};
