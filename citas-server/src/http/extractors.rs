//! Custom Axum extractors
//!
//! Both reject with [`ApiError::Validation`] so bad input never reaches a
//! handler body (and never touches storage).

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{Validate, ValidationError};

/// JSON body that has been deserialized and validated
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: rejection.body_text(),
            })
        })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Extract an integer appointment id from path
pub struct AppointmentId(pub i64);

impl<S> FromRequestParts<S> for AppointmentId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::InvalidPath {
                    field: "id",
                    reason: rejection.body_text(),
                })
            })?;

        let id = raw.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidPath {
                field: "id",
                reason: format!("'{}' is not an integer", raw),
            })
        })?;

        Ok(Self(id))
    }
}
