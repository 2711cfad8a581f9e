//! Profile name → validated [`ConnectionConfig`], memoized for the process lifetime.

use crate::config::{ConnectionConfig, EmbeddedConfig, EngineKind, NetworkConfig};
use crate::error::ConfigError;
use crate::profile::{ConfigKey, Profile, ProfileKind};
use crate::source::{ConfigSource, EnvSource};
use moka::sync::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct ConfigResolver<S = EnvSource> {
    source: S,
    memo: Cache<Profile, Arc<ConnectionConfig>>,
}

impl<S: ConfigSource> ConfigResolver<S> {
    pub fn new(source: S) -> Self {
        let memo = Cache::builder()
            .max_capacity(Profile::COUNT as u64)
            .build();
        Self { source, memo }
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<ConnectionConfig>, ConfigError> {
        let profile: Profile = name.parse()?;
        self.resolve_profile(profile)
    }

    /// Only successful resolutions are remembered; a failed one is retried on the next call.
    pub fn resolve_profile(&self, profile: Profile) -> Result<Arc<ConnectionConfig>, ConfigError> {
        self.memo
            .try_get_with(profile, || self.load(profile).map(Arc::new))
            .map_err(|err| err.as_ref().clone())
    }

    fn load(&self, profile: Profile) -> Result<ConnectionConfig, ConfigError> {
        debug!(profile = %profile, prefix = profile.prefix(), "Resolving database profile");

        let embedded = match profile.kind() {
            ProfileKind::Network => false,
            ProfileKind::Embedded => true,
            ProfileKind::ByProvider => {
                let provider = self.read(profile, ConfigKey::Provider).ok_or_else(|| {
                    ConfigError::IncompleteConfig {
                        profile: profile.name().to_string(),
                        missing: vec![profile.env_key(ConfigKey::Provider)],
                    }
                })?;
                EngineKind::from_provider(&provider).is_some_and(EngineKind::is_embedded)
            }
        };

        if embedded {
            let [provider, path] = self.read_all(profile, ConfigKey::EMBEDDED)?;
            Ok(ConnectionConfig::Embedded(EmbeddedConfig {
                provider,
                path: PathBuf::from(path),
            }))
        } else {
            let [provider, host, port, user, password, database] =
                self.read_all(profile, ConfigKey::NETWORK)?;
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    profile: profile.name().to_string(),
                    key: profile.env_key(ConfigKey::Port),
                    value: port.clone(),
                })?;
            Ok(ConnectionConfig::Network(NetworkConfig {
                provider,
                host,
                port,
                user,
                password,
                database,
            }))
        }
    }

    /// Reads every key, reporting all missing ones at once.
    fn read_all<const N: usize>(
        &self,
        profile: Profile,
        keys: [ConfigKey; N],
    ) -> Result<[String; N], ConfigError> {
        let values = keys.map(|key| self.read(profile, key));

        let missing: Vec<String> = keys
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| profile.env_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::IncompleteConfig {
                profile: profile.name().to_string(),
                missing,
            });
        }

        Ok(values.map(Option::unwrap_or_default))
    }

    fn read(&self, profile: Profile, key: ConfigKey) -> Option<String> {
        self.source
            .get(&profile.env_key(key))
            .filter(|v| !v.trim().is_empty())
    }
}
