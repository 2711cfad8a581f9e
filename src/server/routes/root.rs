use crate::server::router::RazasState;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

pub fn router() -> Router<RazasState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}

async fn banner() -> Json<Value> {
    Json(json!({
        "message": "API de Gestión de Razas y Animales",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
