//! Request handlers, one per route — grounded in
//! `tmf639_resource_inventory::handlers`'s handler shape, with error mapping
//! centralized in [`crate::error::ApiError`] instead of repeated per arm.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use reservation_core::{ClientId, ReservationId, ResourceId, ResourceState};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub resource_id: String,
    pub client_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    pub server_timestamp: chrono::DateTime<chrono::Utc>,
}

/// `POST /reservations`
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation confirmed"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Reservation rejected"),
        (status = 503, description = "Maintenance mode active"),
    )
)]
pub async fn create_reservation(
    state: web::Data<AppState>,
    body: web::Json<CreateReservationRequest>,
) -> Result<HttpResponse, ApiError> {
    let resource_id = ResourceId::parse(body.resource_id.clone())?;
    let client_id = ClientId::parse(body.client_id.clone())?;

    let outcome = state
        .commit
        .commit(resource_id, client_id, body.quantity)
        .await?;

    let payload = ReservationResponse {
        status: if outcome.success { "CONFIRMED" } else { "REJECTED" },
        reservation_id: outcome.success.then(|| outcome.reservation.id.to_string()),
        reason: outcome.reservation.rejection_reason.map(|r| r.as_db_str()),
        server_timestamp: outcome.reservation.server_timestamp,
    };

    Ok(if outcome.success {
        HttpResponse::Created().json(payload)
    } else {
        HttpResponse::Conflict().json(payload)
    })
}

/// `POST /reservations/{id}/cancel`
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    responses(
        (status = 200, description = "Reservation cancelled"),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation not in a cancellable state"),
    ),
    params(("id" = String, Path))
)]
pub async fn cancel_reservation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ReservationId::parse(&path.into_inner())?;
    let outcome = state.cancel.cancel(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "CANCELLED",
        "reservationId": outcome.reservation.id.to_string(),
        "capacityReleased": outcome.capacity_released,
        "serverTimestamp": outcome.reservation.server_timestamp,
    })))
}

/// `GET /reservations/{id}`
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    responses(
        (status = 200, description = "Reservation found"),
        (status = 404, description = "Reservation not found"),
    ),
    params(("id" = String, Path))
)]
pub async fn get_reservation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ReservationId::parse(&path.into_inner())?;
    let mut conn = state.store.pool().acquire().await.map_err(reservation_core::CoreError::from)?;
    let reservation = reservation_core::reservations::find_by_id(&mut conn, id).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/// `GET /availability/{resourceId}`
#[utoipa::path(
    get,
    path = "/availability/{resourceId}",
    responses(
        (status = 200, description = "Availability view"),
        (status = 404, description = "Resource not found"),
    ),
    params(("resourceId" = String, Path))
)]
pub async fn get_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId::parse(path.into_inner())?;
    let view = state.cache.get(state.store.pool(), &id).await?;

    let ttl_secs = state.config.cache_ttl_ms / 1000;
    Ok(HttpResponse::Ok()
        .append_header((
            "Cache-Control",
            format!(
                "public, max-age={}, stale-while-revalidate={}",
                ttl_secs,
                ttl_secs * 2
            ),
        ))
        .append_header(("ETag", format!("\"{}-{}\"", id, view.current_bookings)))
        .json(view))
}

/// `DELETE /availability/cache/{id}`
pub async fn invalidate_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId::parse(path.into_inner())?;
    state.cache.invalidate(&id);
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /availability/cache`
pub async fn invalidate_all_availability(state: web::Data<AppState>) -> HttpResponse {
    state.cache.invalidate_all();
    HttpResponse::NoContent().finish()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub capacity: i64,
}

/// `POST /resources` (admin)
pub async fn create_resource(
    state: web::Data<AppState>,
    body: web::Json<CreateResourceRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId::parse(body.id.clone())?;
    let (resource, _event) = state
        .admin
        .create_resource(id, body.resource_type.clone(), body.capacity)
        .await?;
    Ok(HttpResponse::Created().json(resource))
}

/// `POST /resources/{id}/open` (admin)
pub async fn open_resource(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId::parse(path.into_inner())?;
    state.admin.open_resource(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "state": ResourceState::Open })))
}

/// `POST /resources/{id}/close` (admin)
pub async fn close_resource(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId::parse(path.into_inner())?;
    state.admin.close_resource(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "state": ResourceState::Closed })))
}

/// `GET /health`
pub async fn health_check() -> HttpResponse {
    let check = reservation_utils::observability::HealthCheck::healthy(
        env!("CARGO_PKG_VERSION").to_string(),
    );
    HttpResponse::Ok().json(check)
}

/// `GET /ready` — checks database connectivity, matching
/// `server::main::readiness_check`.
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => HttpResponse::Ok().json(reservation_utils::observability::HealthCheck::healthy(
            env!("CARGO_PKG_VERSION").to_string(),
        )),
        Err(e) => {
            log::error!("readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(
                reservation_utils::observability::HealthCheck::unhealthy(
                    env!("CARGO_PKG_VERSION").to_string(),
                    "database",
                    e.to_string(),
                ),
            )
        }
    }
}

/// `GET /live`
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ALIVE" }))
}
