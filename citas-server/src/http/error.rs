//! API error types with IntoResponse
//!
//! Every error becomes a JSON body `{"detail": "..."}` with the status
//! code of its class. The same storage failure maps differently depending
//! on the operation: a failed write is the caller's 400, a failed read is
//! our 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// Fixed detail for a missing appointment
pub const NOT_FOUND_DETAIL: &str = "Cita no encontrada";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (422), nothing touched storage
    Validation(ValidationError),

    /// No appointment with the requested id (404)
    NotFound,

    /// Insert or read-back failed and was rolled back (400)
    StorageWrite { cause: String },

    /// Insert succeeded but the row could not be read back (500)
    StorageConsistency { id: String },

    /// Reading appointments failed (500)
    StorageRead { context: &'static str, cause: String },

    /// No connection could be acquired (500)
    Unavailable { cause: String },
}

impl ApiError {
    /// Map a failure of the create path.
    pub fn write(e: DbError) -> Self {
        match e {
            DbError::Inconsistent { id, .. } => Self::StorageConsistency { id },
            other => Self::StorageWrite {
                cause: other.to_string(),
            },
        }
    }

    /// Map a failure of a read path; NotFound is kept apart from other errors.
    pub fn read(context: &'static str) -> impl FnOnce(DbError) -> Self {
        move |e| match e {
            DbError::NotFound { .. } => Self::NotFound,
            other => Self::StorageRead {
                context,
                cause: other.to_string(),
            },
        }
    }

    /// Map a failure to acquire a connection.
    pub fn unavailable(e: DbError) -> Self {
        Self::Unavailable {
            cause: e.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StorageWrite { .. } => StatusCode::BAD_REQUEST,
            Self::StorageConsistency { .. }
            | Self::StorageRead { .. }
            | Self::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message placed in the response body
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound => NOT_FOUND_DETAIL.to_string(),
            Self::StorageWrite { cause } => format!("Error al crear la cita: {}", cause),
            Self::StorageConsistency { .. } => "No se pudo crear la cita".to_string(),
            Self::StorageRead { context, cause } => format!("{}: {}", context, cause),
            Self::Unavailable { cause } => format!("Base de datos no disponible: {}", cause),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            Self::StorageWrite { .. } => tracing::warn!("Write rolled back: {}", detail),
            Self::StorageConsistency { id } => {
                tracing::error!(id = %id, "Inserted row missing on read-back")
            }
            Self::StorageRead { .. } | Self::Unavailable { .. } => {
                tracing::error!("Database error: {}", detail)
            }
            Self::Validation(_) | Self::NotFound => {
                tracing::debug!(status = status.as_u16(), "{}", detail)
            }
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
