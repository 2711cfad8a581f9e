use super::schema::{init_script, statements};
use crate::config::DatabaseConfig;
use async_trait::async_trait;
use razas_dbpool::{BoxError, ConfigSource, ConnectTarget, ConnectionPool, Connector, EngineKind};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// How long a probe waits for a free connection before looking at pool saturation.
const PROBE_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(500);

/// The profile cache as the HTTP layer sees it.
pub type DbPool = ConnectionPool<SqlxConnector, Arc<dyn ConfigSource>>;

/// An open sqlx pool plus the dialect it speaks.
#[derive(Debug, Clone)]
pub struct DbHandle {
    pool: AnyPool,
    engine: EngineKind,
}

impl DbHandle {
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// Adapts `?` placeholders to the engine. Postgres numbers them (`$1`, `$2`, ...).
    pub fn sql<'q>(&self, query: &'q str) -> Cow<'q, str> {
        match self.engine {
            EngineKind::Postgres => Cow::Owned(number_placeholders(query)),
            EngineKind::MySql | EngineKind::Sqlite => Cow::Borrowed(query),
        }
    }
}

fn number_placeholders(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 8);
    let mut n = 0;
    let mut quoted = false;
    for c in query.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                out.push(c);
            }
            '?' if !quoted => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
            }
            _ => out.push(c),
        }
    }
    out
}

/// Opens one sqlx `Any` pool per profile.
#[derive(Debug, Clone)]
pub struct SqlxConnector {
    max_connections: u32,
    apply_schema: bool,
}

impl SqlxConnector {
    pub fn new(cfg: &DatabaseConfig) -> Self {
        sqlx::any::install_default_drivers();
        Self {
            max_connections: cfg.max_connections.max(1),
            apply_schema: cfg.apply_schema,
        }
    }

    fn is_saturated(&self, handle: &DbHandle) -> bool {
        handle.pool.size() >= self.max_connections && handle.pool.num_idle() == 0
    }
}

#[async_trait]
impl Connector for SqlxConnector {
    type Handle = DbHandle;

    async fn open(&self, target: &ConnectTarget) -> Result<DbHandle, BoxError> {
        let pool = AnyPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(target.url())
            .await?;
        let handle = DbHandle {
            pool,
            engine: target.engine,
        };

        if self.apply_schema {
            if let Err(e) = apply_schema(&handle).await {
                handle.pool.close().await;
                return Err(e.into());
            }
        }
        Ok(handle)
    }

    async fn probe(&self, handle: &DbHandle) -> Result<(), BoxError> {
        let mut conn = match timeout(PROBE_ACQUIRE_TIMEOUT, handle.pool.acquire()).await {
            Ok(conn) => conn?,
            // Every connection is checked out and serving queries.
            Err(_) if self.is_saturated(handle) => {
                debug!(engine = %handle.engine, "pool saturated, skipping liveness probe");
                return Ok(());
            }
            Err(_) => return Err("timed out acquiring a connection for the liveness probe".into()),
        };
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    async fn close(&self, handle: DbHandle) -> Result<(), BoxError> {
        handle.pool.close().await;
        Ok(())
    }
}

async fn apply_schema(handle: &DbHandle) -> Result<(), sqlx::Error> {
    for stmt in statements(init_script(handle.engine)) {
        sqlx::query(stmt).execute(&handle.pool).await?;
    }
    debug!(engine = %handle.engine, "schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_placeholders_are_numbered() {
        assert_eq!(
            number_placeholders("UPDATE raza SET descripcion = ? WHERE cod_raza = ?"),
            "UPDATE raza SET descripcion = $1 WHERE cod_raza = $2"
        );
    }

    #[test]
    fn quoted_question_marks_are_kept() {
        assert_eq!(
            number_placeholders("SELECT '?' AS q WHERE a = ?"),
            "SELECT '?' AS q WHERE a = $1"
        );
    }
}
