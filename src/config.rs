//! Configuration types.
//!
//! The endpoint URL of a published LUIS app embeds the subscription key, so it
//! is held as a [`SecretString`] and never logged.

use std::sync::{Arc, OnceLock, RwLock};

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Environment variable read by [`LuisConfig::from_env`].
pub const ENDPOINT_ENV_VAR: &str = "LUIS_ENDPOINT";

/// LUIS connection settings.
#[derive(Debug, Clone)]
pub struct LuisConfig {
    /// Endpoint prefix, e.g.
    /// `https://<region>.api.cognitive.microsoft.com/luis/v2.0/apps/<app>?subscription-key=<key>&q=`.
    /// The query text is appended verbatim.
    pub endpoint: SecretString,
}

impl LuisConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: SecretString::from(endpoint.into()),
        }
    }

    /// Build config from environment variables.
    /// Returns `None` if `LUIS_ENDPOINT` is not set.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR).ok()?;
        Some(Self::new(endpoint))
    }

    /// Like [`from_env`](Self::from_env), but a missing variable is an error.
    pub fn require_env() -> Result<Self, ConfigError> {
        Self::from_env().ok_or_else(|| ConfigError::MissingEnvVar(ENDPOINT_ENV_VAR.to_string()))
    }
}

impl Default for LuisConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Holder for the endpoint used by subsequent analyses. Last writer wins.
#[derive(Debug, Default)]
pub struct ConfigStore {
    config: RwLock<LuisConfig>,
}

impl ConfigStore {
    pub fn new(config: LuisConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Process-wide store, empty until someone calls [`configure`](Self::configure).
    pub fn global() -> Arc<ConfigStore> {
        static GLOBAL: OnceLock<Arc<ConfigStore>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(Default::default))
    }

    /// Replace the current settings.
    pub fn configure(&self, config: LuisConfig) {
        // Poisoning can't leave a half-written config.
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        *guard = config;
    }

    pub(crate) fn endpoint(&self) -> String {
        let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
        guard.endpoint.expose_secret().to_string()
    }
}
