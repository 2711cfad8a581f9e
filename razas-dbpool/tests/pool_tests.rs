use async_trait::async_trait;
use razas_dbpool::{
    BoxError, ConfigError, ConnectTarget, ConnectionError, ConnectionPool, Connector, MapSource,
    Profile,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct StubConn {
    profile: Profile,
    alive: AtomicBool,
}

type StubHandle = Arc<StubConn>;

#[derive(Default)]
struct StubState {
    opens: AtomicUsize,
    probes: AtomicUsize,
    closes: AtomicUsize,
    refuse_open: AtomicBool,
    /// Newly opened handles fail their first probe.
    dead_on_open: AtomicBool,
    failing_close: Mutex<HashSet<Profile>>,
    open_delay: Mutex<Option<Duration>>,
}

#[derive(Clone, Default)]
struct StubConnector {
    state: Arc<StubState>,
}

impl StubConnector {
    fn opens(&self) -> usize {
        self.state.opens.load(Ordering::SeqCst)
    }

    fn probes(&self) -> usize {
        self.state.probes.load(Ordering::SeqCst)
    }

    fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for StubConnector {
    type Handle = StubHandle;

    async fn open(&self, target: &ConnectTarget) -> Result<Self::Handle, BoxError> {
        self.state.opens.fetch_add(1, Ordering::SeqCst);
        let delay = *self.state.open_delay.lock().expect("lock");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.state.refuse_open.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(Arc::new(StubConn {
            profile: target.profile,
            alive: AtomicBool::new(!self.state.dead_on_open.load(Ordering::SeqCst)),
        }))
    }

    async fn probe(&self, handle: &Self::Handle) -> Result<(), BoxError> {
        self.state.probes.fetch_add(1, Ordering::SeqCst);
        if handle.alive.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err("connection reset by peer".into())
        }
    }

    async fn close(&self, handle: Self::Handle) -> Result<(), BoxError> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        handle.alive.store(false, Ordering::SeqCst);
        let failing = self
            .state
            .failing_close
            .lock()
            .expect("lock")
            .contains(&handle.profile);
        if failing {
            Err("close failed".into())
        } else {
            Ok(())
        }
    }
}

fn sqlite_source() -> MapSource {
    MapSource::new()
        .with("CLIENTEA_SQLITE_DB_PROVIDER", "sqlite")
        .with("CLIENTEA_SQLITE_DB_PATH", "/tmp/clientea.db")
        .with("CLIENTEB_SQLITE_DB_PROVIDER", "sqlite")
        .with("CLIENTEB_SQLITE_DB_PATH", "/tmp/clienteb.db")
        .with("TEST_DB_PROVIDER", "sqlite")
        .with("TEST_DB_PATH", "./t.db")
}

fn pool() -> (ConnectionPool<StubConnector, MapSource>, StubConnector) {
    let connector = StubConnector::default();
    (ConnectionPool::new(connector.clone(), sqlite_source()), connector)
}

#[tokio::test]
async fn unknown_profile_never_reaches_connector() {
    let (pool, connector) = pool();

    let err = pool.acquire("does-not-exist").await.unwrap_err();
    assert!(err.is_client_error());
    match err {
        ConnectionError::ConfigInvalid(ConfigError::UnknownProfile { name, available }) => {
            assert_eq!(name, "does-not-exist");
            assert_eq!(available, Profile::names());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(connector.opens(), 0);
    assert_eq!(connector.probes(), 0);
}

#[tokio::test]
async fn healthy_handle_is_reused() {
    let (pool, connector) = pool();

    let first = pool.acquire("test").await.expect("first acquire");
    let second = pool.acquire("test").await.expect("second acquire");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(connector.opens(), 1);
    assert_eq!(pool.list_active(), vec![Profile::Test]);
}

#[tokio::test]
async fn stale_handle_is_replaced() {
    let (pool, connector) = pool();

    let first = pool.acquire("clienteA_sqlite").await.expect("first acquire");
    first.alive.store(false, Ordering::SeqCst);

    let second = pool.acquire("clienteA_sqlite").await.expect("reacquire");
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(connector.opens(), 2);
    assert_eq!(connector.closes(), 1);

    let third = pool.acquire("clienteA_sqlite").await.expect("healthy again");
    assert!(Arc::ptr_eq(&second, &third));
    assert_eq!(connector.opens(), 2);
}

#[tokio::test]
async fn failed_open_is_not_cached() {
    let (pool, connector) = pool();
    connector.state.refuse_open.store(true, Ordering::SeqCst);

    let err = pool.acquire("test").await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(pool.list_active().is_empty());

    connector.state.refuse_open.store(false, Ordering::SeqCst);
    pool.acquire("test").await.expect("recovers once the store is back");
    assert_eq!(connector.opens(), 2);
}

#[tokio::test]
async fn handle_failing_first_probe_is_closed_and_not_cached() {
    let (pool, connector) = pool();
    connector.state.dead_on_open.store(true, Ordering::SeqCst);

    let err = pool.acquire("test").await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(matches!(err, ConnectionError::ConnectFailed { ref profile, .. } if profile == "test"));
    assert_eq!(connector.opens(), 1);
    assert_eq!(connector.probes(), 1);
    assert_eq!(connector.closes(), 1);
    assert!(pool.list_active().is_empty());

    connector.state.dead_on_open.store(false, Ordering::SeqCst);
    pool.acquire("test").await.expect("next acquire opens a fresh handle");
    assert_eq!(connector.opens(), 2);
    assert_eq!(pool.list_active(), vec![Profile::Test]);
}

#[tokio::test]
async fn incomplete_profile_fails_before_connecting() {
    let (pool, connector) = pool();

    let err = pool.acquire("produccion_postgresql").await.unwrap_err();
    match err {
        ConnectionError::ConfigInvalid(ConfigError::IncompleteConfig { profile, missing }) => {
            assert_eq!(profile, "produccion_postgresql");
            assert_eq!(missing.len(), 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(connector.opens(), 0);
}

#[tokio::test]
async fn unknown_provider_is_unsupported_engine() {
    let source = MapSource::new()
        .with("PROD_MYSQL_DB_PROVIDER", "oracle")
        .with("PROD_MYSQL_DB_HOST", "db.internal")
        .with("PROD_MYSQL_DB_PORT", "1521")
        .with("PROD_MYSQL_DB_USER", "app")
        .with("PROD_MYSQL_DB_PASSWORD", "secret")
        .with("PROD_MYSQL_DB_NAME", "razas");
    let connector = StubConnector::default();
    let pool = ConnectionPool::new(connector.clone(), source);

    let err = pool.acquire("produccion_mysql").await.unwrap_err();
    assert!(matches!(err, ConnectionError::UnsupportedEngine { .. }));
    assert_eq!(connector.opens(), 0);
}

#[tokio::test]
async fn release_is_idempotent() {
    let (pool, connector) = pool();

    pool.release("test").await.expect("release of idle profile");
    pool.acquire("test").await.expect("acquire");
    pool.release("test").await.expect("release");
    pool.release("test").await.expect("second release");

    assert!(pool.list_active().is_empty());
    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn release_all_survives_close_failures() {
    let (pool, connector) = pool();
    connector
        .state
        .failing_close
        .lock()
        .expect("lock")
        .insert(Profile::ClienteBSqlite);

    for name in ["clienteA_sqlite", "clienteB_sqlite", "test"] {
        pool.acquire(name).await.expect("acquire");
    }
    assert_eq!(pool.list_active().len(), 3);

    let report = pool.release_all().await;

    assert!(pool.list_active().is_empty());
    assert_eq!(report.closed, vec![Profile::ClienteASqlite, Profile::Test]);
    assert_eq!(report.failures.len(), 1);
    assert!(!report.is_clean());
    assert!(matches!(
        &report.failures[0],
        ConnectionError::CloseFailed { profile, .. } if profile == "clienteB_sqlite"
    ));
}

#[tokio::test]
async fn concurrent_first_use_opens_once() {
    let (pool, connector) = pool();
    *connector.state.open_delay.lock().expect("lock") = Some(Duration::from_millis(50));
    let pool = Arc::new(pool);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { pool.acquire("clienteA_sqlite").await })
        })
        .collect();

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.expect("task panicked").expect("acquire"));
    }

    assert_eq!(connector.opens(), 1);
    assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn diagnostics_describe_cached_entries() {
    let (pool, _connector) = pool();
    pool.acquire("clienteB_sqlite").await.expect("acquire");

    let active = pool.describe_active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].profile, Profile::ClienteBSqlite);
    assert_eq!(active[0].target, "sqlite:/tmp/clienteb.db?mode=rwc");
    assert_eq!(pool.list_profiles().len(), Profile::COUNT);
}
