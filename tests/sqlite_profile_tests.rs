use razas::config::DatabaseConfig;
use razas::db::{DbPool, SqlxConnector};
use razas::service::ProductoService;
use razas_dbpool::{ConfigError, ConfigSource, ConnectionError, MapSource, Profile};
use razas_schema::ProductoCreate;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "razas-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    path
}

fn sqlite_pool(path: &Path) -> DbPool {
    sqlite_pool_with(path, &DatabaseConfig::default())
}

fn sqlite_pool_with(path: &Path, cfg: &DatabaseConfig) -> DbPool {
    let source: Arc<dyn ConfigSource> = Arc::new(
        MapSource::new()
            .with("TEST_DB_PROVIDER", "sqlite")
            .with("TEST_DB_PATH", path.display().to_string()),
    );
    DbPool::new(SqlxConnector::new(cfg), source)
}

#[tokio::test]
async fn test_profile_on_sqlite_round_trip() {
    let path = temp_db_path("e2e");
    let pool = sqlite_pool(&path);

    assert!(pool.list_active().is_empty());

    let handle = pool.acquire("test").await.expect("sqlite profile connects");
    let one: i64 = sqlx::query_scalar("SELECT 1")
        .fetch_one(handle.pool())
        .await
        .expect("handle answers queries");
    assert_eq!(one, 1);
    assert!(path.is_file(), "database file is created on first use");
    assert_eq!(pool.list_active(), vec![Profile::Test]);

    let info = pool.describe_active();
    assert_eq!(info.len(), 1);
    assert!(info[0].target.starts_with("sqlite:"));

    pool.release("test").await.expect("release succeeds");
    assert!(pool.list_active().is_empty());
    // Releasing twice is a no-op.
    pool.release("test").await.expect("second release is a no-op");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn reacquire_after_release_opens_a_fresh_handle() {
    let path = temp_db_path("reacquire");
    let pool = sqlite_pool(&path);

    let first = pool.acquire("test").await.expect("connects");
    pool.release("test").await.expect("release succeeds");
    assert!(first.pool().is_closed());

    let second = pool.acquire("test").await.expect("reconnects");
    assert!(!second.pool().is_closed());
    assert_eq!(pool.list_active(), vec![Profile::Test]);

    let report = pool.release_all().await;
    assert!(report.is_clean());
    assert_eq!(report.closed, vec![Profile::Test]);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn unconfigured_profile_reports_missing_keys() {
    let path = temp_db_path("unconfigured");
    let pool = sqlite_pool(&path);

    let err = pool
        .acquire("clienteA_sqlite")
        .await
        .expect_err("no CLIENTEA_SQLITE_DB_* keys are set");
    match err {
        ConnectionError::ConfigInvalid(ConfigError::IncompleteConfig { missing, .. }) => {
            assert_eq!(
                missing,
                vec!["CLIENTEA_SQLITE_DB_PROVIDER", "CLIENTEA_SQLITE_DB_PATH"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(pool.list_active().is_empty());
}

#[tokio::test]
async fn producto_insert_reports_row_id_on_sqlite() {
    let path = temp_db_path("producto-id");
    let pool = sqlite_pool(&path);
    let handle = pool.acquire("test").await.expect("connects");
    let service = ProductoService::new(&handle);

    let body = || ProductoCreate {
        codigo: Some("P1".to_string()),
        nombre: Some("Collar".to_string()),
        descripcion: Some("Collar de cuero".to_string()),
        cantidad: Some(3),
        precio: Some(12.5),
        impuesto: Some(0.19),
    };
    let first = service.create(body()).await.expect("first insert");
    let second = service.create(body()).await.expect("second insert");
    assert!(first.id > 0);
    assert_eq!(second.id, first.id + 1);
    assert_eq!(service.get(second.id).await.expect("stored").codigo, "P1");

    assert!(pool.release_all().await.is_clean());
    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn busy_handle_stays_cached_when_every_connection_is_checked_out() {
    let path = temp_db_path("busy");
    let cfg = DatabaseConfig {
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let pool = sqlite_pool_with(&path, &cfg);

    let first = pool.acquire("test").await.expect("connects");
    let held = first.pool().acquire().await.expect("checks out the only connection");

    let second = pool.acquire("test").await.expect("busy handle is still live");
    assert!(!first.pool().is_closed());
    assert!(!second.pool().is_closed());
    assert_eq!(pool.list_active(), vec![Profile::Test]);

    drop(held);
    let one: i64 = sqlx::query_scalar("SELECT 1")
        .fetch_one(second.pool())
        .await
        .expect("cached handle answers once the connection is returned");
    assert_eq!(one, 1);

    assert!(pool.release_all().await.is_clean());
    let _ = fs::remove_file(&path);
}
