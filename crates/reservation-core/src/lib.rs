//! Concurrency-safe reservation commit/cancel engine.
//!
//! Admits or rejects bookings against finite-capacity resources, guaranteeing
//! confirmed quantities never exceed capacity; supports cancellation; and
//! fronts read traffic with a bounded LRU availability cache. The Postgres
//! row lock acquired by the Resource Repository's locking read is the only
//! serialization primitive — see [`commit`] and [`cancel`].

pub mod admin;
pub mod availability;
pub mod cancel;
pub mod commit;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod maintenance;
pub mod models;
pub mod reservations;
pub mod resources;
pub mod store;

pub use admin::AdminService;
pub use availability::AvailabilityCache;
pub use cancel::{CancelOutcome, CancelService};
pub use commit::{CommitOutcome, CommitService};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use events::DomainEvent;
pub use ids::{ClientId, ReservationId, ResourceId};
pub use models::{AvailabilityView, RejectionReason, Reservation, ReservationStatus, Resource, ResourceState};
pub use store::Store;
