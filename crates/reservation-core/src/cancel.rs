//! Cancel Service — symmetric release path: lock reservation, lock
//! resource, mark cancelled, decrement, invalidate.

use crate::availability::AvailabilityCache;
use crate::error::{CoreError, CoreResult};
use crate::events::DomainEvent;
use crate::ids::ReservationId;
use crate::models::{Reservation, ReservationStatus};
use crate::store::Store;
use crate::{reservations, resources};
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub reservation: Reservation,
    pub event: DomainEvent,
    pub capacity_released: i64,
}

pub struct CancelService {
    store: Store,
    cache: Arc<AvailabilityCache>,
}

impl CancelService {
    pub fn new(store: Store, cache: Arc<AvailabilityCache>) -> Self {
        Self { store, cache }
    }

    pub async fn cancel(&self, reservation_id: ReservationId) -> CoreResult<CancelOutcome> {
        let server_timestamp = Utc::now();

        let (reservation, resource_id) = self
            .store
            .with_transaction(|tx| Box::pin(async move {
                // Step 2.
                let mut reservation =
                    reservations::find_by_id_for_update(&mut *tx, reservation_id).await?;

                // Step 3: idempotency is not provided — double-cancel is an
                // error.
                if reservation.status != ReservationStatus::Confirmed {
                    return Err(CoreError::InvalidState(format!(
                        "reservation {} is not CONFIRMED",
                        reservation_id
                    )));
                }

                // Step 4.
                let mut resource =
                    resources::find_by_id_for_update(&mut *tx, &reservation.resource_id).await?;

                // Step 5.
                reservation.status = ReservationStatus::Cancelled;
                reservations::save(&mut *tx, &reservation).await?;

                // Step 6: clamp protects against drift; the commit-side
                // max(counter, actual) guard compensates for the other
                // direction.
                resource.current_bookings =
                    (resource.current_bookings - reservation.quantity).max(0);
                resource.version += 1;
                resource.updated_at = server_timestamp;

                // Step 7.
                resources::update_with_optimistic_lock(&mut *tx, &resource).await?;

                Ok((reservation, resource.id))
            }))
            .await?;

        // Step 8.
        self.cache.invalidate(&resource_id);

        Ok(CancelOutcome {
            event: DomainEvent::Cancelled {
                reservation_id: reservation.id,
                resource_id: reservation.resource_id.clone(),
                capacity_released: reservation.quantity,
                server_timestamp,
            },
            capacity_released: reservation.quantity,
            reservation,
        })
    }
}
