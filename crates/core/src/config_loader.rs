use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by layering built-in defaults, TOML,
    /// JSON, and `APP_`-prefixed environment variables. Later layers win.
    ///
    /// Nested keys use a double underscore, e.g. `APP_SCAN__MAX_CONCURRENCY=8`.
    /// A bare `PORT` variable overrides the server port.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Same as [`ConfigLoader::load`] but reads the TOML layer from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        Self::load_layered(path, None)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::load_layered("config/Config.toml", Some(profile))
    }

    /// Reads the TOML layer from `path` and, when `profile` is set, layers
    /// `Config.<profile>.toml` from the same directory on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_layered(path: &str, profile: Option<&str>) -> Result<AppConfig> {
        let mut figment = Self::base(path);
        if let Some(profile) = profile {
            let dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
            figment = figment.merge(Toml::file(dir.join(format!("Config.{profile}.toml"))));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .extract()?;

        tracing::debug!("Loaded configuration from {} (profile: {:?})", path, profile);
        Ok(config)
    }

    /// Defaults, then the TOML file, then a JSON file with the same stem
    /// (`config/Config.toml` pairs with `config/Config.json`).
    fn base(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Json::file(Path::new(path).with_extension("json")))
    }
}
