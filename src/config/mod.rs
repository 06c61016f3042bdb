pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, SourceConfig};
pub use loader::load_config;
