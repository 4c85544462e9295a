//! Appointment endpoints under /api/citas

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::AppointmentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{AppointmentId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Appointment, AppointmentCreate};

/// POST /api/citas - create an appointment
async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<AppointmentCreate>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let mut conn = state.db.acquire().await.map_err(ApiError::unavailable)?;
    let appointment = AppointmentRepo::new(&mut conn)
        .create(&input)
        .await
        .map_err(ApiError::write)?;

    tracing::info!(id = appointment.id, date = %appointment.date, "Appointment created");
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/citas - list appointments, earliest first
async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let mut conn = state.db.acquire().await.map_err(ApiError::unavailable)?;
    let appointments = AppointmentRepo::new(&mut conn)
        .list()
        .await
        .map_err(ApiError::read("Error al leer las citas"))?;

    tracing::debug!(count = appointments.len(), "Listed appointments");
    Ok(Json(appointments))
}

/// GET /api/citas/{id} - get a single appointment
async fn get_appointment(
    State(state): State<Arc<AppState>>,
    AppointmentId(id): AppointmentId,
) -> Result<Json<Appointment>, ApiError> {
    let mut conn = state.db.acquire().await.map_err(ApiError::unavailable)?;
    let appointment = AppointmentRepo::new(&mut conn)
        .get(id)
        .await
        .map_err(ApiError::read("Error al buscar la cita"))?;

    Ok(Json(appointment))
}

/// Appointment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/citas",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/citas/{id}", get(get_appointment))
}
