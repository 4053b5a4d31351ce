// Export our modules for use in binaries and tests
pub mod config;
pub mod fetch;
pub mod headless;

pub use config::{AppConfig, Source};
