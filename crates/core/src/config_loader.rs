use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Prefix for environment overrides, e.g. `DEPTH_ARB_ENGINE__MAX_SEARCH_SIZE`.
pub const ENV_PREFIX: &str = "DEPTH_ARB_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from `config/Config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Loads configuration by merging defaults, a TOML file, a sibling JSON file, and environment variables.
    ///
    /// Missing files are skipped, so an absent config yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let config: AppConfig = Self::figment(path).extract()?;

        tracing::debug!(
            path = %path.display(),
            max_search_size = config.engine.max_search_size,
            max_concurrency = config.scanner.max_concurrency,
            "Loaded configuration"
        );

        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Json::file(path.with_extension("json")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
