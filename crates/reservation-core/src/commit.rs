//! Commit Service — the serialized admission path.
//!
//! Implements the thirteen-step algorithm verbatim: lock the resource row,
//! validate state and capacity against the counter-drift guard, persist, and
//! invalidate the cache. The row lock acquired in step 3 is the only
//! serialization primitive; every other concurrent commit against the same
//! resource blocks there until this transaction commits.

use crate::availability::AvailabilityCache;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::events::DomainEvent;
use crate::ids::{ClientId, ReservationId, ResourceId};
use crate::maintenance::MaintenanceFlag;
use crate::models::{RejectionReason, Reservation, ReservationStatus, ResourceState};
use crate::store::Store;
use crate::{reservations, resources};
use chrono::Utc;

/// Outcome of a commit attempt. Capacity/state rejections are not faults —
/// they are legitimate business outcomes carried in `Ok`.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub success: bool,
    pub reservation: Reservation,
    pub event: DomainEvent,
}

pub struct CommitService {
    store: Store,
    cache: std::sync::Arc<AvailabilityCache>,
    maintenance: MaintenanceFlag,
    durable_rejections: bool,
}

impl CommitService {
    pub fn new(store: Store, cache: std::sync::Arc<AvailabilityCache>, config: &Config) -> Self {
        Self {
            store,
            cache,
            maintenance: MaintenanceFlag::new(config.maintenance_flag_ttl_ms),
            durable_rejections: config.durable_rejections,
        }
    }

    pub async fn commit(
        &self,
        resource_id: ResourceId,
        client_id: ClientId,
        quantity: i64,
    ) -> CoreResult<CommitOutcome> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(
                "quantity must be a positive integer".into(),
            ));
        }

        // Step 1: record the authoritative ordering timestamp before opening
        // the transaction.
        let server_timestamp = Utc::now();

        if self.maintenance.is_active(self.store.pool()).await? {
            return Err(CoreError::MaintenanceMode);
        }

        let resource_id_for_cache = resource_id.clone();

        // Steps 2-11: scoped transaction.
        let outcome = self
            .store
            .with_transaction(move |tx| {
                let resource_id = resource_id.clone();
                let client_id = client_id.clone();
                Box::pin(async move {
                    // Step 3.
                    let resource = resources::find_by_id_for_update(&mut *tx, &resource_id).await?;

                    // Step 4: counter-drift guard.
                    let actual =
                        reservations::sum_active_quantity_by_resource_id(&mut *tx, &resource_id).await?;
                    let effective_bookings = resource.current_bookings.max(actual);
                    if resource.current_bookings != actual {
                        log::warn!(
                            "counter drift on resource {}: cached={} actual={}",
                            resource_id,
                            resource.current_bookings,
                            actual
                        );
                    }

                    // Step 5.
                    if resource.state != ResourceState::Open {
                        return self
                            .reject(
                                &mut *tx,
                                &resource_id,
                                &client_id,
                                quantity,
                                RejectionReason::ResourceClosed,
                                server_timestamp,
                            )
                            .await;
                    }

                    // Step 6.
                    let remaining = resource.capacity - effective_bookings;
                    if quantity > remaining {
                        return self
                            .reject(
                                &mut *tx,
                                &resource_id,
                                &client_id,
                                quantity,
                                RejectionReason::ResourceFull,
                                server_timestamp,
                            )
                            .await;
                    }

                    // Steps 7-10.
                    let reservation = Reservation {
                        id: ReservationId::new(),
                        resource_id: resource_id.clone(),
                        client_id,
                        quantity,
                        status: ReservationStatus::Confirmed,
                        rejection_reason: None,
                        server_timestamp,
                        created_at: server_timestamp,
                    };
                    reservations::save(&mut *tx, &reservation).await?;

                    let mut updated = resource;
                    updated.current_bookings = effective_bookings + quantity;
                    updated.version += 1;
                    updated.updated_at = server_timestamp;
                    resources::update_with_optimistic_lock(&mut *tx, &updated).await?;

                    Ok(CommitOutcome {
                        success: true,
                        event: DomainEvent::Confirmed {
                            reservation_id: reservation.id,
                            resource_id: reservation.resource_id.clone(),
                            quantity: reservation.quantity,
                            server_timestamp,
                        },
                        reservation,
                    })
                })
            })
            .await?;

        // Best-effort rejection persistence: when the operator has opted
        // out of durable rejection history, the REJECTED row was skipped
        // inside the transaction above and is written here, after commit,
        // so the admission decision is never delayed by history-write
        // amplification.
        if !outcome.success && !self.durable_rejections {
            let pool = self.store.pool().clone();
            let reservation = outcome.reservation.clone();
            tokio::spawn(async move {
                let mut conn = match pool.acquire().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        log::warn!("best-effort rejection persistence: acquire failed: {}", e);
                        return;
                    }
                };
                if let Err(e) = reservations::save(&mut conn, &reservation).await {
                    log::warn!("best-effort rejection persistence failed: {}", e);
                }
            });
        }

        // Step 12.
        self.cache.invalidate(&resource_id_for_cache);

        // Step 13.
        Ok(outcome)
    }

    /// Persists a REJECTED reservation inside the caller's transaction (the
    /// durable default) and returns the failure outcome. Transaction commit
    /// still happens at the `with_transaction` call site.
    async fn reject(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        resource_id: &ResourceId,
        client_id: &ClientId,
        quantity: i64,
        reason: RejectionReason,
        server_timestamp: chrono::DateTime<Utc>,
    ) -> CoreResult<CommitOutcome> {
        let reservation = Reservation {
            id: ReservationId::new(),
            resource_id: resource_id.clone(),
            client_id: client_id.clone(),
            quantity,
            status: ReservationStatus::Rejected,
            rejection_reason: Some(reason),
            server_timestamp,
            created_at: server_timestamp,
        };

        if self.durable_rejections {
            reservations::save(&mut *tx, &reservation).await?;
        }

        Ok(CommitOutcome {
            success: false,
            event: DomainEvent::Rejected {
                resource_id: resource_id.clone(),
                reason,
                server_timestamp,
            },
            reservation,
        })
    }
}
