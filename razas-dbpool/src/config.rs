use std::fmt;
use std::path::PathBuf;

/// Database engines a connection string can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    MySql,
    Postgres,
    Sqlite,
}

impl EngineKind {
    /// Case-insensitive lookup of a `PROVIDER` value.
    pub fn from_provider(provider: &str) -> Option<Self> {
        match provider.trim().to_ascii_lowercase().as_str() {
            "mysql" => Some(EngineKind::MySql),
            "postgresql" | "postgres" => Some(EngineKind::Postgres),
            "sqlite" => Some(EngineKind::Sqlite),
            _ => None,
        }
    }

    pub fn scheme(self) -> &'static str {
        match self {
            EngineKind::MySql => "mysql",
            EngineKind::Postgres => "postgresql",
            EngineKind::Sqlite => "sqlite",
        }
    }

    pub fn is_embedded(self) -> bool {
        matches!(self, EngineKind::Sqlite)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Validated settings for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    Network(NetworkConfig),
    Embedded(EmbeddedConfig),
}

impl ConnectionConfig {
    pub fn provider(&self) -> &str {
        match self {
            ConnectionConfig::Network(c) => &c.provider,
            ConnectionConfig::Embedded(c) => &c.provider,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub provider: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("provider", &self.provider)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedConfig {
    pub provider: String,
    pub path: PathBuf,
}
