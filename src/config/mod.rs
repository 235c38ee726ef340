//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SESSION_REFLECTOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use session_reflector::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reflecting sessions from {}", config.auth.supabase_url);
//! ```

mod auth;
mod error;
mod logging;
mod reflector;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use reflector::{FetchFailurePolicy, ReflectorConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Authentication provider configuration (Supabase)
    pub auth: AuthConfig,

    /// Session reflector behavior (render target, failure policy)
    #[serde(default)]
    pub reflector: ReflectorConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SESSION_REFLECTOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SESSION_REFLECTOR__AUTH__SUPABASE_URL=...` -> `auth.supabase_url = ...`
    /// - `SESSION_REFLECTOR__AUTH__ACCESS_TOKEN=...` -> `auth.access_token = ...`
    /// - `SESSION_REFLECTOR__REFLECTOR__RENDER_TARGET=server` -> `reflector.render_target = server`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SESSION_REFLECTOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
