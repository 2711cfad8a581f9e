//! Named database profiles and a per-profile connection cache.
//!
//! - [`ConfigResolver`] turns a profile name into a validated [`ConnectionConfig`]
//! - [`ConnectTarget`] renders the engine-specific connection string
//! - [`ConnectionPool`] opens, probes, caches and tears down one handle per profile
//!   through a [`Connector`]

pub mod config;
pub mod connector;
pub mod error;
pub mod pool;
pub mod profile;
pub mod resolver;
pub mod source;
pub mod target;

pub use config::{ConnectionConfig, EmbeddedConfig, EngineKind, NetworkConfig};
pub use connector::Connector;
pub use error::{BoxError, ConfigError, ConnectionError};
pub use pool::{ConnectionPool, EntryInfo, TeardownReport};
pub use profile::{ConfigKey, Profile, ProfileKind};
pub use resolver::ConfigResolver;
pub use source::{ConfigSource, EnvSource, MapSource};
pub use target::ConnectTarget;
