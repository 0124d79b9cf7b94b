//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! faucet.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FaucetServiceConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and validates
//!     → FaucetRegistry::apply_config toggles faucets
//! ```

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, FaucetEntry, FaucetServiceConfig, LogFormat, ObservabilityConfig, ServerConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
