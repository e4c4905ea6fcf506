//! Admin operations: resource creation and explicit open/close.
//!
//! These go through `ResourceRepo::save` without the `FOR UPDATE` lock and
//! without the commit path's version discipline — concurrent admin changes
//! mid-commit can surface `ConcurrencyConflict`, which is retryable (spec.md
//! §5). Every admin mutation invalidates the availability cache, per that
//! same section's explicit requirement.

use crate::availability::AvailabilityCache;
use crate::error::{CoreError, CoreResult};
use crate::events::DomainEvent;
use crate::ids::ResourceId;
use crate::models::{Resource, ResourceState};
use crate::resources;
use crate::store::Store;
use chrono::Utc;
use std::sync::Arc;

pub struct AdminService {
    store: Store,
    cache: Arc<AvailabilityCache>,
}

impl AdminService {
    pub fn new(store: Store, cache: Arc<AvailabilityCache>) -> Self {
        Self { store, cache }
    }

    pub async fn create_resource(
        &self,
        id: ResourceId,
        resource_type: String,
        capacity: i64,
    ) -> CoreResult<(Resource, DomainEvent)> {
        if capacity < 1 {
            return Err(CoreError::InvalidInput(
                "capacity must be a positive integer".into(),
            ));
        }
        if resource_type.trim().is_empty() {
            return Err(CoreError::InvalidInput("type must not be empty".into()));
        }

        let now = Utc::now();
        let resource = Resource {
            id: id.clone(),
            resource_type,
            capacity,
            current_bookings: 0,
            state: ResourceState::Open,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.store.pool().acquire().await?;
        resources::save(&mut conn, &resource).await?;
        self.cache.invalidate(&id);

        Ok((
            resource,
            DomainEvent::ResourceCreated {
                resource_id: id,
                server_timestamp: now,
            },
        ))
    }

    pub async fn open_resource(&self, id: ResourceId) -> CoreResult<DomainEvent> {
        self.set_state(id, ResourceState::Open).await
    }

    pub async fn close_resource(&self, id: ResourceId) -> CoreResult<DomainEvent> {
        self.set_state(id, ResourceState::Closed).await
    }

    async fn set_state(&self, id: ResourceId, state: ResourceState) -> CoreResult<DomainEvent> {
        let now = Utc::now();
        let mut conn = self.store.pool().acquire().await?;
        let mut resource = resources::find_by_id(&mut conn, &id).await?;
        resource.state = state;
        resource.version += 1;
        resource.updated_at = now;
        resources::save(&mut conn, &resource).await?;
        self.cache.invalidate(&id);

        Ok(match state {
            ResourceState::Open => DomainEvent::ResourceOpened {
                resource_id: id,
                server_timestamp: now,
            },
            ResourceState::Closed => DomainEvent::ResourceClosed {
                resource_id: id,
                server_timestamp: now,
            },
        })
    }
}
