use serde::{Deserialize, Serialize};

/// `{message, status, data}` wrapper used by the productos endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub message: String,
    pub status: u16,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status,
            data: Some(data),
        }
    }

    pub fn empty(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            data: None,
        }
    }
}
