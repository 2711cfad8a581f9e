mod basic;
mod database;

pub use basic::BasicConfig;
pub use database::DatabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use razas_dbpool::{ConfigError, Profile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Connection settings shared by all profiles (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "RAZAS_";

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, and `RAZAS_*` env vars.
    ///
    /// Nested keys use a double underscore: `RAZAS_BASIC__LISTEN_PORT=9000`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn default_profile(&self) -> Result<Profile, ConfigError> {
        self.basic.default_profile.parse()
    }
}
