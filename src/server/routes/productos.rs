use crate::error::RazasError;
use crate::server::extract::DbConn;
use crate::server::router::RazasState;
use crate::service::ProductoService;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use razas_schema::{ApiEnvelope, ProductoCreate, ProductoUpdate, ValidationError};
use serde_json::{Value, json};
use tracing::error;

const INTERNAL_MESSAGE: &str = "Algo salió mal, contacta al administrador";

pub fn router() -> Router<RazasState> {
    Router::new()
        .route("/api/productos", get(list_productos).post(create_producto))
        .route(
            "/api/productos/{id}",
            get(get_producto)
                .put(update_producto)
                .delete(delete_producto),
        )
}

type Envelope = (StatusCode, Json<ApiEnvelope<Value>>);

fn respond(status: StatusCode, message: &str, data: Value) -> Envelope {
    (status, Json(ApiEnvelope::new(status.as_u16(), message, data)))
}

/// Productos answer with the `{message, status, data}` envelope on failure too,
/// including when the selected profile cannot be reached.
#[derive(Debug)]
pub struct ProductoFailure(RazasError);

impl From<RazasError> for ProductoFailure {
    fn from(err: RazasError) -> Self {
        ProductoFailure(err)
    }
}

impl IntoResponse for ProductoFailure {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message, data) = match &err {
            RazasError::Validation(ValidationError::MissingFields(fields)) => (
                StatusCode::BAD_REQUEST,
                "Faltan campos requeridos".to_string(),
                Some(json!({ "faltantes": fields })),
            ),
            RazasError::NotFound(message) | RazasError::Conflict(message) => {
                (err.status(), message.clone(), None)
            }
            RazasError::Validation(e) => (err.status(), e.to_string(), None),
            RazasError::Connection(e) if e.is_client_error() => (err.status(), e.to_string(), None),
            _ => {
                error!(error = %err, "producto request failed");
                (err.status(), INTERNAL_MESSAGE.to_string(), None)
            }
        };
        let body = ApiEnvelope {
            message,
            status: status.as_u16(),
            data,
        };
        (status, Json(body)).into_response()
    }
}

async fn list_productos(db: Result<DbConn, RazasError>) -> Result<Envelope, ProductoFailure> {
    let db = db?;
    let productos = ProductoService::new(&db.handle).list().await?;
    if productos.is_empty() {
        return Err(RazasError::not_found("No se encontraron productos").into());
    }
    Ok(respond(
        StatusCode::OK,
        "Productos encontrados",
        json!({ "productos": productos }),
    ))
}

async fn get_producto(
    db: Result<DbConn, RazasError>,
    Path(id): Path<i64>,
) -> Result<Envelope, ProductoFailure> {
    let db = db?;
    let producto = ProductoService::new(&db.handle).get(id).await?;
    Ok(respond(
        StatusCode::OK,
        "Producto encontrado",
        json!({ "producto": producto }),
    ))
}

async fn create_producto(
    db: Result<DbConn, RazasError>,
    Json(body): Json<ProductoCreate>,
) -> Result<Envelope, ProductoFailure> {
    let db = db?;
    let producto = ProductoService::new(&db.handle).create(body).await?;
    Ok(respond(
        StatusCode::CREATED,
        "Producto creado exitosamente",
        json!({ "producto": producto }),
    ))
}

async fn update_producto(
    db: Result<DbConn, RazasError>,
    Path(id): Path<i64>,
    Json(body): Json<ProductoUpdate>,
) -> Result<Envelope, ProductoFailure> {
    let db = db?;
    let producto = ProductoService::new(&db.handle).update(id, body).await?;
    Ok(respond(
        StatusCode::OK,
        "Producto actualizado exitosamente",
        json!({ "producto": producto }),
    ))
}

async fn delete_producto(
    db: Result<DbConn, RazasError>,
    Path(id): Path<i64>,
) -> Result<Envelope, ProductoFailure> {
    let db = db?;
    let producto = ProductoService::new(&db.handle).delete(id).await?;
    Ok(respond(
        StatusCode::OK,
        "Producto eliminado exitosamente",
        json!({ "producto": producto }),
    ))
}
