//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional config file (any format
//! the `config` crate recognises by extension), then environment variables named
//! `<PREFIX>__<FIELD>`, e.g. `SCHEDULE_ADMIN__BASE_URL`.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment prefix used by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "SCHEDULE_ADMIN";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/admin";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the admin API, e.g. `https://clinic.example/api/admin`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load from defaults, an optional file, and `SCHEDULE_ADMIN__*` variables.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the file is missing or unreadable, or a
    /// value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`ClientConfig::load`] with a custom environment prefix.
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let loaded = builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }
}
