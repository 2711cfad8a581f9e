use serde::{Deserialize, Serialize};

/// Settings shared by every profile's connection.
///
/// Credentials are not here: each profile reads its own `{PREFIX}_*` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Upper bound of pooled connections behind one profile handle.
    /// TOML: `database.max_connections`. Default: `5`.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Create missing tables when a profile handle is opened.
    /// TOML: `database.apply_schema`. Default: `true`.
    #[serde(default = "default_apply_schema")]
    pub apply_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            apply_schema: default_apply_schema(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_apply_schema() -> bool {
    true
}
