pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::SiteConfig;
pub use core::{ContactHandler, ContentRepository};
pub use utils::error::{Result, SiteError};
