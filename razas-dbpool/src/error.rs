use thiserror::Error as ThisError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    #[error("unknown database profile '{name}'; available: {}", available.join(", "))]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("incomplete configuration for '{profile}'; missing: {}", missing.join(", "))]
    IncompleteConfig {
        profile: String,
        missing: Vec<String>,
    },

    #[error("invalid value for {key} in '{profile}': '{value}'")]
    InvalidValue {
        profile: String,
        key: String,
        value: String,
    },
}

#[derive(Debug, ThisError)]
pub enum ConnectionError {
    #[error("invalid database configuration: {0}")]
    ConfigInvalid(#[from] ConfigError),

    #[error("unsupported database engine '{provider}' for '{profile}'")]
    UnsupportedEngine { profile: String, provider: String },

    #[error("could not connect to '{profile}': {source}")]
    ConnectFailed { profile: String, source: BoxError },

    #[error("could not close connection for '{profile}': {source}")]
    CloseFailed { profile: String, source: BoxError },
}

impl ConnectionError {
    /// True when the caller asked for something that does not exist,
    /// as opposed to the server being misconfigured or the store being down.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConnectionError::ConfigInvalid(ConfigError::UnknownProfile { .. })
        )
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ConnectionError::ConnectFailed { .. })
    }
}
