#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ContactArgs};
pub use toml_config::{ContactConfig, NotifierKind, SiteConfig};
