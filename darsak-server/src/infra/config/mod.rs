//! Configuration: an optional `darsak.toml`, a `.env` file, and process
//! environment variables, layered in that order (later wins).

pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions,
};
pub use models::{
    AuthConfig, Config, ConfigMetadata, ConfigWarnings, CorsConfig,
    DatabaseConfig, ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
