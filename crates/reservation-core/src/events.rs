//! Tagged event sum emitted by the commit/cancel services and admin
//! operations. A closed union, matched exhaustively by consumers instead of
//! an open class hierarchy.

use crate::ids::{ReservationId, ResourceId};
use crate::models::RejectionReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    Confirmed {
        reservation_id: ReservationId,
        resource_id: ResourceId,
        quantity: i64,
        server_timestamp: DateTime<Utc>,
    },
    Rejected {
        resource_id: ResourceId,
        reason: RejectionReason,
        server_timestamp: DateTime<Utc>,
    },
    Cancelled {
        reservation_id: ReservationId,
        resource_id: ResourceId,
        capacity_released: i64,
        server_timestamp: DateTime<Utc>,
    },
    ResourceCreated {
        resource_id: ResourceId,
        server_timestamp: DateTime<Utc>,
    },
    ResourceOpened {
        resource_id: ResourceId,
        server_timestamp: DateTime<Utc>,
    },
    ResourceClosed {
        resource_id: ResourceId,
        server_timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Stable wire-level tag, independent of the serde representation.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::Confirmed { .. } => "CONFIRMED",
            DomainEvent::Rejected { .. } => "REJECTED",
            DomainEvent::Cancelled { .. } => "CANCELLED",
            DomainEvent::ResourceCreated { .. } => "RESOURCE_CREATED",
            DomainEvent::ResourceOpened { .. } => "RESOURCE_OPENED",
            DomainEvent::ResourceClosed { .. } => "RESOURCE_CLOSED",
        }
    }
}
