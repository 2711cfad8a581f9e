use mimalloc::MiMalloc;
use razas::config::Config;
use razas::db::{DbPool, SqlxConnector};
use razas::server::{RazasState, razas_router};
use razas_dbpool::{ConfigSource, EnvSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let default_profile = cfg.default_profile()?;
    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        default_profile = %default_profile,
        max_connections = cfg.database.max_connections,
        apply_schema = cfg.database.apply_schema,
    );

    let source: Arc<dyn ConfigSource> = Arc::new(EnvSource);
    let pool: Arc<DbPool> = Arc::new(DbPool::new(SqlxConnector::new(&cfg.database), source));

    let state = RazasState::new(pool.clone(), default_profile);
    let app = razas_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let report = pool.release_all().await;
    if report.is_clean() {
        info!(closed = report.closed.len(), "Server has shut down gracefully.");
    } else {
        for failure in &report.failures {
            error!(error = %failure, "connection did not close cleanly");
        }
        warn!(
            closed = report.closed.len(),
            failed = report.failures.len(),
            "Server shut down with connection teardown failures."
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
