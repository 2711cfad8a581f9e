use axum::{Json, http::StatusCode, response::IntoResponse};
use razas_dbpool::{ConfigError, ConnectionError};
use razas_schema::ValidationError;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RazasError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl RazasError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        RazasError::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        RazasError::AlreadyExists(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RazasError::NotFound(_) => StatusCode::NOT_FOUND,
            RazasError::AlreadyExists(_) => StatusCode::CONFLICT,
            RazasError::Conflict(_) | RazasError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RazasError::Connection(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            RazasError::Connection(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            RazasError::Connection(_)
            | RazasError::DatabaseError(_)
            | RazasError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RazasError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_body = match self {
            RazasError::NotFound(message) => ApiErrorObject {
                code: "NOT_FOUND".to_string(),
                message,
                details: None,
            },
            RazasError::AlreadyExists(message) => ApiErrorObject {
                code: "ALREADY_EXISTS".to_string(),
                message,
                details: None,
            },
            RazasError::Conflict(message) => ApiErrorObject {
                code: "VALIDATION_ERROR".to_string(),
                message,
                details: None,
            },
            RazasError::Validation(err) => ApiErrorObject {
                code: "VALIDATION_ERROR".to_string(),
                message: err.to_string(),
                details: None,
            },

            RazasError::Connection(ConnectionError::ConfigInvalid(
                ConfigError::UnknownProfile { name, available },
            )) => ApiErrorObject {
                code: "UNKNOWN_PROFILE".to_string(),
                message: format!("Configuración '{name}' no encontrada."),
                details: Some(json!({ "available": available })),
            },
            RazasError::Connection(ConnectionError::ConnectFailed { profile, .. }) => {
                ApiErrorObject {
                    code: "DATABASE_UNAVAILABLE".to_string(),
                    message: format!("No se pudo conectar a {profile}."),
                    details: None,
                }
            }
            // Misconfiguration details stay in the server log.
            RazasError::Connection(_) => ApiErrorObject {
                code: "DATABASE_MISCONFIGURED".to_string(),
                message: "The selected database profile is not usable.".to_string(),
                details: None,
            },

            RazasError::DatabaseError(_) | RazasError::UnexpectedError(_) => ApiErrorObject {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
                details: None,
            },
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_map_by_class() {
        let unknown = RazasError::from(ConnectionError::from(ConfigError::UnknownProfile {
            name: "x".to_string(),
            available: vec![],
        }));
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let down = RazasError::from(ConnectionError::ConnectFailed {
            profile: "test".to_string(),
            source: "refused".into(),
        });
        assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);

        let incomplete = RazasError::from(ConnectionError::from(ConfigError::IncompleteConfig {
            profile: "test".to_string(),
            missing: vec!["TEST_DB_PROVIDER".to_string()],
        }));
        assert_eq!(incomplete.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
