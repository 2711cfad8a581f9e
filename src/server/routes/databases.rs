use crate::server::router::RazasState;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

pub fn router() -> Router<RazasState> {
    Router::new()
        .route("/databases", get(list_databases))
        .route("/databases/active", get(active_databases))
}

#[derive(Debug, Serialize)]
pub struct DatabasesResponse {
    pub default: &'static str,
    pub profiles: Vec<&'static str>,
    pub active: Vec<&'static str>,
}

/// One cached connection. `target` never carries the password.
#[derive(Debug, Serialize)]
pub struct ActiveDatabase {
    pub profile: &'static str,
    pub engine: String,
    pub provider: String,
    pub target: String,
    pub age_secs: u64,
}

async fn list_databases(State(state): State<RazasState>) -> Json<DatabasesResponse> {
    Json(DatabasesResponse {
        default: state.default_profile.name(),
        profiles: state.pool.list_profiles(),
        active: state
            .pool
            .list_active()
            .into_iter()
            .map(|p| p.name())
            .collect(),
    })
}

async fn active_databases(State(state): State<RazasState>) -> Json<Vec<ActiveDatabase>> {
    let active = state
        .pool
        .describe_active()
        .into_iter()
        .map(|info| ActiveDatabase {
            profile: info.profile.name(),
            engine: info.engine.to_string(),
            provider: info.config.provider().to_string(),
            target: info.target,
            age_secs: info.age.as_secs(),
        })
        .collect();
    Json(active)
}
