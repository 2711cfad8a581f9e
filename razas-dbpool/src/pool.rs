//! Per-profile connection cache.
//!
//! Layout:
//! - `entries`: profile → live handle, behind a sync lock never held across `.await`
//! - `gates`: one async mutex per profile, held while a handle is evicted or established,
//!   so concurrent first use of a profile opens a single handle

use crate::config::{ConnectionConfig, EngineKind};
use crate::connector::Connector;
use crate::error::{ConfigError, ConnectionError};
use crate::profile::Profile;
use crate::resolver::ConfigResolver;
use crate::source::{ConfigSource, EnvSource};
use crate::target::ConnectTarget;
use ahash::AHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

struct PoolEntry<H> {
    handle: H,
    config: Arc<ConnectionConfig>,
    target: ConnectTarget,
    established_at: Instant,
    generation: u64,
}

/// Diagnostics for one cached connection.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub profile: Profile,
    pub engine: EngineKind,
    pub target: String,
    pub config: Arc<ConnectionConfig>,
    pub age: Duration,
}

/// Outcome of [`ConnectionPool::release_all`].
#[derive(Debug, Default)]
pub struct TeardownReport {
    pub closed: Vec<Profile>,
    pub failures: Vec<ConnectionError>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ConnectionPool<C: Connector, S = EnvSource> {
    connector: C,
    resolver: ConfigResolver<S>,
    entries: RwLock<AHashMap<Profile, PoolEntry<C::Handle>>>,
    gates: [Mutex<()>; Profile::COUNT],
    generation: AtomicU64,
}

impl<C: Connector> ConnectionPool<C, EnvSource> {
    /// Pool reading profile settings from the process environment.
    pub fn from_env(connector: C) -> Self {
        Self::new(connector, EnvSource)
    }
}

impl<C: Connector, S: ConfigSource> ConnectionPool<C, S> {
    pub fn new(connector: C, source: S) -> Self {
        Self {
            connector,
            resolver: ConfigResolver::new(source),
            entries: RwLock::new(AHashMap::new()),
            gates: std::array::from_fn(|_| Mutex::new(())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn resolver(&self) -> &ConfigResolver<S> {
        &self.resolver
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Returns a live handle for `name`, reusing the cached one when it still answers.
    pub async fn acquire(&self, name: &str) -> Result<C::Handle, ConnectionError> {
        let profile = parse_profile(name)?;
        self.acquire_profile(profile).await
    }

    pub async fn acquire_profile(&self, profile: Profile) -> Result<C::Handle, ConnectionError> {
        let observed = self.cached(profile);
        if let Some((_, handle)) = &observed {
            match self.connector.probe(handle).await {
                Ok(()) => return Ok(handle.clone()),
                Err(e) => warn!(profile = %profile, error = %e, "Cached connection failed liveness probe"),
            }
        }

        let _gate = self.gates[profile.index()].lock().await;

        if let Some((generation, handle)) = self.cached(profile) {
            let refreshed_meanwhile = observed.as_ref().map(|(g, _)| *g) != Some(generation);
            if refreshed_meanwhile {
                match self.connector.probe(&handle).await {
                    Ok(()) => return Ok(handle),
                    Err(e) => warn!(profile = %profile, error = %e, "Cached connection failed liveness probe"),
                }
            }
            if let Some(stale) = self.take_entry(profile) {
                if let Err(e) = self.connector.close(stale.handle).await {
                    warn!(profile = %profile, error = %e, "Failed to close stale connection");
                }
            }
        }

        self.establish(profile).await
    }

    async fn establish(&self, profile: Profile) -> Result<C::Handle, ConnectionError> {
        let config = self
            .resolver
            .resolve_profile(profile)
            .map_err(|e| log_failure(profile, e.into()))?;
        let target =
            ConnectTarget::build(profile, &config).map_err(|e| log_failure(profile, e))?;

        let handle = self.connector.open(&target).await.map_err(|source| {
            log_failure(
                profile,
                ConnectionError::ConnectFailed {
                    profile: profile.name().to_string(),
                    source,
                },
            )
        })?;

        if let Err(source) = self.connector.probe(&handle).await {
            if let Err(e) = self.connector.close(handle).await {
                warn!(profile = %profile, error = %e, "Failed to close unusable connection");
            }
            return Err(log_failure(
                profile,
                ConnectionError::ConnectFailed {
                    profile: profile.name().to_string(),
                    source,
                },
            ));
        }

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            profile = %profile,
            engine = %target.engine,
            target = %target.redacted(),
            "Database connection established"
        );
        let entry = PoolEntry {
            handle: handle.clone(),
            config,
            target,
            established_at: Instant::now(),
            generation,
        };
        // Callers hold the profile gate and have already evicted any previous entry.
        let replaced = self.write_entries().insert(profile, entry);
        debug_assert!(replaced.is_none(), "establish ran with a cached entry");

        Ok(handle)
    }

    /// Closes and forgets the handle for `name`. Releasing an idle profile is a no-op.
    pub async fn release(&self, name: &str) -> Result<(), ConnectionError> {
        let profile = parse_profile(name)?;
        self.release_profile(profile).await
    }

    pub async fn release_profile(&self, profile: Profile) -> Result<(), ConnectionError> {
        let _gate = self.gates[profile.index()].lock().await;
        let Some(entry) = self.take_entry(profile) else {
            return Ok(());
        };

        match self.connector.close(entry.handle).await {
            Ok(()) => {
                info!(profile = %profile, "Database connection released");
                Ok(())
            }
            Err(source) => Err(log_failure(
                profile,
                ConnectionError::CloseFailed {
                    profile: profile.name().to_string(),
                    source,
                },
            )),
        }
    }

    /// Closes every cached handle. Close failures are logged and collected, never returned early.
    pub async fn release_all(&self) -> TeardownReport {
        let mut report = TeardownReport::default();

        for profile in Profile::ALL {
            let _gate = self.gates[profile.index()].lock().await;
            let Some(entry) = self.take_entry(profile) else {
                continue;
            };
            match self.connector.close(entry.handle).await {
                Ok(()) => report.closed.push(profile),
                Err(source) => {
                    error!(profile = %profile, error = %source, "Failed to close database connection");
                    report.failures.push(ConnectionError::CloseFailed {
                        profile: profile.name().to_string(),
                        source,
                    });
                }
            }
        }

        info!(
            closed = report.closed.len(),
            failed = report.failures.len(),
            "All database connections released"
        );
        report
    }

    pub fn list_profiles(&self) -> Vec<&'static str> {
        Profile::ALL.iter().map(|p| p.name()).collect()
    }

    /// Profiles with a cached handle, in declaration order.
    pub fn list_active(&self) -> Vec<Profile> {
        let entries = self.read_entries();
        Profile::ALL
            .into_iter()
            .filter(|p| entries.contains_key(p))
            .collect()
    }

    pub fn describe_active(&self) -> Vec<EntryInfo> {
        let entries = self.read_entries();
        Profile::ALL
            .into_iter()
            .filter_map(|profile| {
                entries.get(&profile).map(|entry| EntryInfo {
                    profile,
                    engine: entry.target.engine,
                    target: entry.target.redacted(),
                    config: entry.config.clone(),
                    age: entry.established_at.elapsed(),
                })
            })
            .collect()
    }

    fn cached(&self, profile: Profile) -> Option<(u64, C::Handle)> {
        self.read_entries()
            .get(&profile)
            .map(|entry| (entry.generation, entry.handle.clone()))
    }

    fn take_entry(&self, profile: Profile) -> Option<PoolEntry<C::Handle>> {
        self.write_entries().remove(&profile)
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, AHashMap<Profile, PoolEntry<C::Handle>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, AHashMap<Profile, PoolEntry<C::Handle>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_profile(name: &str) -> Result<Profile, ConnectionError> {
    name.parse::<Profile>().map_err(|e: ConfigError| {
        warn!(profile = name, error = %e, "Rejected unknown database profile");
        ConnectionError::from(e)
    })
}

fn log_failure(profile: Profile, err: ConnectionError) -> ConnectionError {
    error!(profile = %profile, error = %err, "Database connection failed");
    err
}
