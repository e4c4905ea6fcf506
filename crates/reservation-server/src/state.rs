//! Shared application state — the teacher workspace's "global service
//! container" is replaced with an explicit struct constructed once at
//! startup and handed to actix-web via `web::Data`, per spec.md §9's
//! "singletons → explicit context" design note.

use reservation_core::{AdminService, AvailabilityCache, CancelService, CommitService, Config, Store};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub cache: Arc<AvailabilityCache>,
    pub commit: CommitService,
    pub cancel: CancelService,
    pub admin: AdminService,
}

impl AppState {
    pub async fn new(config: Config) -> Self {
        let store = Store::connect(&config).await;
        let cache = Arc::new(AvailabilityCache::new(config.cache_max_size, config.cache_ttl_ms));
        let commit = CommitService::new(store.clone(), cache.clone(), &config);
        let cancel = CancelService::new(store.clone(), cache.clone());
        let admin = AdminService::new(store.clone(), cache.clone());

        Self {
            config,
            store,
            cache,
            commit,
            cancel,
            admin,
        }
    }
}
