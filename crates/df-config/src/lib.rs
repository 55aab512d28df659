//! # df-config
//!
//! Layered configuration loading for datafactory using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DFX_*` prefix, `__` as separator)
//! 2. Project-level `.dfx/config.toml`
//! 3. User-level `~/.config/dfx/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `DFX_SAMPLES__MOVIES` -> `samples.movies`.
//!
//! # Usage
//!
//! ```no_run
//! use df_config::DfxConfig;
//!
//! let config = DfxConfig::load_with_dotenv().expect("config");
//! println!("movies: {}", config.samples.movies.display());
//! ```

mod error;
mod samples;

pub use error::ConfigError;
pub use samples::SampleConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DfxConfig {
    #[serde(default)]
    pub samples: SampleConfig,
}

impl DfxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be merged or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.samples.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be merged or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".dfx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DFX_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dfx").join("config.toml"))
    }
}
