//! Process configuration, resolved once at startup and passed down
//! explicitly.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

impl Settings {
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
        }
    }

    /// Layers, lowest priority first: built-in default, optional
    /// `todo.toml` in the working directory, `API_BASE_URL` environment
    /// variable.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .add_source(
                File::with_name("todo.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().try_parsing(false))
            .build()?
            .try_deserialize()
    }
}
