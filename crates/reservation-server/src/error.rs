//! Centralized error-to-HTTP mapping.
//!
//! One `ResponseError` impl so every handler gets consistent status-code
//! mapping for free, generalizing the per-arm `match` on the domain error
//! that `tmf639_resource_inventory::handlers` repeats in every handler.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use reservation_core::CoreError;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    code: &'static str,
    message: String,
}

/// Shape shared with `POST /reservations`'s 409 capacity-rejection body.
#[derive(Serialize)]
struct RejectedBody {
    status: &'static str,
    reason: &'static str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::ResourceNotFound(_) | CoreError::ReservationNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CoreError::InvalidState(_) | CoreError::ConcurrencyConflict(_) => StatusCode::CONFLICT,
            CoreError::InvalidQuantity(_) | CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoreError::MaintenanceMode => StatusCode::SERVICE_UNAVAILABLE,
            CoreError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Maintenance-mode rejections share the commit path's
        // {status:"REJECTED", reason:...} contract rather than the generic
        // error body, per spec.md §6.
        if let CoreError::MaintenanceMode = &self.0 {
            return HttpResponse::build(self.status_code()).json(RejectedBody {
                status: "REJECTED",
                reason: "MAINTENANCE_MODE",
            });
        }

        let code = match &self.0 {
            CoreError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            CoreError::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            CoreError::InvalidState(_) => "INVALID_STATE",
            CoreError::InvalidQuantity(_) => "INVALID_QUANTITY",
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            CoreError::MaintenanceMode => unreachable!("handled above"),
            CoreError::Timeout(_) => "TIMEOUT",
            CoreError::Database(_) => "INTERNAL_ERROR",
        };

        // Internal details are never leaked in 500 responses.
        let message = match &self.0 {
            CoreError::Database(_) => "an internal error occurred".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "ERROR",
            code,
            message,
        })
    }
}
