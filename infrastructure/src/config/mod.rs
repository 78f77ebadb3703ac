//! Configuration file loading for quorum-desk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Bare `VERBOSITY` environment variable (maps to `backend.verbosity`)
//! 2. `QUORUM_DESK_*` environment variables (`__` separates sections)
//! 3. `--config <path>` specified file
//! 4. Project root: `./quorum-desk.toml` or `./.quorum-desk.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/quorum-desk/config.toml`
//! 6. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileBackendConfig, FileConfig, FileEngineConfig, FileLoggingConfig, FileProviderConfig,
    FileProvidersConfig, FileServerConfig, ProviderKind, default_base_url, default_model,
};
pub use loader::ConfigLoader;
