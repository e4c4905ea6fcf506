//! Domain entities and the branded enums that replace the teacher's
//! free-`String` status columns.

use crate::ids::{ClientId, ReservationId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `resources.state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceState {
    Open,
    Closed,
}

impl ResourceState {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ResourceState::Open => "OPEN",
            ResourceState::Closed => "CLOSED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(ResourceState::Open),
            "CLOSED" => Some(ResourceState::Closed),
            _ => None,
        }
    }
}

/// A bookable capacity pool.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    #[schema(value_type = String)]
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub capacity: i64,
    pub current_bookings: i64,
    pub state: ResourceState,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn remaining_capacity(&self, effective_bookings: i64) -> i64 {
        (self.capacity - effective_bookings).max(0)
    }
}

/// `reservations.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Rejected,
}

impl ReservationStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "CONFIRMED" => Some(ReservationStatus::Confirmed),
            "CANCELLED" => Some(ReservationStatus::Cancelled),
            "REJECTED" => Some(ReservationStatus::Rejected),
            _ => None,
        }
    }
}

/// Why a commit was rejected. Only ever present alongside
/// `status = REJECTED` — enforced by [`Reservation::rejection_reason`]
/// always being `None` for any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    ResourceFull,
    ResourceClosed,
    MaintenanceMode,
}

impl RejectionReason {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            RejectionReason::ResourceFull => "RESOURCE_FULL",
            RejectionReason::ResourceClosed => "RESOURCE_CLOSED",
            RejectionReason::MaintenanceMode => "MAINTENANCE_MODE",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "RESOURCE_FULL" => Some(RejectionReason::ResourceFull),
            "RESOURCE_CLOSED" => Some(RejectionReason::ResourceClosed),
            "MAINTENANCE_MODE" => Some(RejectionReason::MaintenanceMode),
            _ => None,
        }
    }
}

/// A record of a commit decision, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    #[schema(value_type = String)]
    pub id: ReservationId,
    #[schema(value_type = String)]
    pub resource_id: ResourceId,
    #[schema(value_type = String)]
    pub client_id: ClientId,
    pub quantity: i64,
    pub status: ReservationStatus,
    pub rejection_reason: Option<RejectionReason>,
    pub server_timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Read-optimized, cacheable projection of a [`Resource`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityView {
    #[schema(value_type = String)]
    pub resource_id: ResourceId,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub state: ResourceState,
    pub capacity: i64,
    pub current_bookings: i64,
    pub remaining_capacity: i64,
    pub is_available: bool,
    pub cached_at: DateTime<Utc>,
    pub is_cached: bool,
}

impl AvailabilityView {
    pub fn from_resource(resource: &Resource, is_cached: bool) -> Self {
        let remaining = resource.remaining_capacity(resource.current_bookings);
        Self {
            resource_id: resource.id.clone(),
            resource_type: resource.resource_type.clone(),
            state: resource.state,
            capacity: resource.capacity,
            current_bookings: resource.current_bookings,
            remaining_capacity: remaining,
            is_available: resource.state == ResourceState::Open && remaining > 0,
            cached_at: Utc::now(),
            is_cached,
        }
    }
}
