//! Configuration management.
//!
//! JSON configuration loaded from well-known locations with built-in
//! defaults and environment overrides. The gateway must come up even
//! with no config file present at all.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::Config;
