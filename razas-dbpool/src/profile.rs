use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Closed set of database targets known at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Profile {
    DesarrolloMysql,
    ProduccionMysql,
    DesarrolloPostgresql,
    ProduccionPostgresql,
    ClienteASqlite,
    ClienteBSqlite,
    Test,
}

/// Which group of settings a profile requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Host, port, user, password and database name.
    Network,
    /// A file path.
    Embedded,
    /// Decided by the `PROVIDER` value: `sqlite` means embedded, anything else network.
    ByProvider,
}

/// A single configuration key suffix, appended to the profile prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Provider,
    Host,
    Port,
    User,
    Password,
    Name,
    Path,
}

impl ConfigKey {
    pub const NETWORK: [ConfigKey; 6] = [
        ConfigKey::Provider,
        ConfigKey::Host,
        ConfigKey::Port,
        ConfigKey::User,
        ConfigKey::Password,
        ConfigKey::Name,
    ];

    pub const EMBEDDED: [ConfigKey; 2] = [ConfigKey::Provider, ConfigKey::Path];

    pub fn suffix(self) -> &'static str {
        match self {
            ConfigKey::Provider => "PROVIDER",
            ConfigKey::Host => "HOST",
            ConfigKey::Port => "PORT",
            ConfigKey::User => "USER",
            ConfigKey::Password => "PASSWORD",
            ConfigKey::Name => "NAME",
            ConfigKey::Path => "PATH",
        }
    }
}

struct ProfileDef {
    name: &'static str,
    prefix: &'static str,
    kind: ProfileKind,
}

// Indexed by `Profile as usize`; keep in declaration order.
const PROFILE_DEFS: [ProfileDef; Profile::COUNT] = [
    ProfileDef {
        name: "desarrollo_mysql",
        prefix: "DEV_MYSQL_DB",
        kind: ProfileKind::Network,
    },
    ProfileDef {
        name: "produccion_mysql",
        prefix: "PROD_MYSQL_DB",
        kind: ProfileKind::Network,
    },
    ProfileDef {
        name: "desarrollo_postgresql",
        prefix: "DEV_POSTGRES_DB",
        kind: ProfileKind::Network,
    },
    ProfileDef {
        name: "produccion_postgresql",
        prefix: "PROD_POSTGRES_DB",
        kind: ProfileKind::Network,
    },
    ProfileDef {
        name: "clienteA_sqlite",
        prefix: "CLIENTEA_SQLITE_DB",
        kind: ProfileKind::Embedded,
    },
    ProfileDef {
        name: "clienteB_sqlite",
        prefix: "CLIENTEB_SQLITE_DB",
        kind: ProfileKind::Embedded,
    },
    ProfileDef {
        name: "test",
        prefix: "TEST_DB",
        kind: ProfileKind::ByProvider,
    },
];

impl Profile {
    pub const COUNT: usize = 7;

    pub const ALL: [Profile; Profile::COUNT] = [
        Profile::DesarrolloMysql,
        Profile::ProduccionMysql,
        Profile::DesarrolloPostgresql,
        Profile::ProduccionPostgresql,
        Profile::ClienteASqlite,
        Profile::ClienteBSqlite,
        Profile::Test,
    ];

    /// Profile used when a request does not pick one.
    pub const DEFAULT: Profile = Profile::DesarrolloMysql;

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    fn def(self) -> &'static ProfileDef {
        &PROFILE_DEFS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn prefix(self) -> &'static str {
        self.def().prefix
    }

    pub fn kind(self) -> ProfileKind {
        self.def().kind
    }

    /// Full environment key for `key`, e.g. `DEV_MYSQL_DB_PASSWORD`.
    pub fn env_key(self, key: ConfigKey) -> String {
        format!("{}_{}", self.prefix(), key.suffix())
    }

    pub fn names() -> Vec<String> {
        Profile::ALL.iter().map(|p| p.name().to_string()).collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: s.to_string(),
                available: Profile::names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for profile in Profile::ALL {
            assert_eq!(profile.name().parse::<Profile>(), Ok(profile));
        }
    }

    #[test]
    fn unknown_name_lists_every_profile() {
        let err = "does-not-exist".parse::<Profile>().unwrap_err();
        match err {
            ConfigError::UnknownProfile { name, available } => {
                assert_eq!(name, "does-not-exist");
                assert_eq!(available.len(), Profile::COUNT);
                assert!(available.contains(&"clienteA_sqlite".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn env_keys_use_profile_prefix() {
        assert_eq!(
            Profile::DesarrolloMysql.env_key(ConfigKey::Password),
            "DEV_MYSQL_DB_PASSWORD"
        );
        assert_eq!(Profile::Test.env_key(ConfigKey::Path), "TEST_DB_PATH");
    }
}
