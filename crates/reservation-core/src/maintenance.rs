//! Maintenance-mode flag cache.
//!
//! Resolves the Open Question in spec.md §9: the flag is read from
//! `system_settings` on every commit unless cached. This is a size-1
//! instance of the same TTL-caching idiom as [`crate::availability`], so it
//! reuses that reasoning rather than introducing a new caching mechanism.

use crate::error::CoreResult;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;

struct Cached {
    value: bool,
    expires_at: DateTime<Utc>,
}

pub struct MaintenanceFlag {
    cached: Mutex<Option<Cached>>,
    ttl: Duration,
}

impl MaintenanceFlag {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            cached: Mutex::new(None),
            ttl: Duration::from_millis(ttl_ms),
        }
    }

    /// Returns whether maintenance mode is active, reading through to
    /// `system_settings` at most once per TTL window.
    pub async fn is_active(&self, pool: &Pool<Postgres>) -> CoreResult<bool> {
        let now = Utc::now();

        if let Some(cached) = self.cached.lock().as_ref() {
            if cached.expires_at > now {
                return Ok(cached.value);
            }
        }

        let row = sqlx::query("SELECT value FROM system_settings WHERE key = 'maintenance_mode'")
            .fetch_optional(pool)
            .await?;

        let value = match row {
            Some(row) => {
                let raw: String = row.try_get("value")?;
                raw == "true"
            }
            None => false,
        };

        *self.cached.lock() = Some(Cached {
            value,
            expires_at: now + self.ttl,
        });

        Ok(value)
    }

    /// Forces the next `is_active` call to read through.
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_clears_the_cached_value() {
        let flag = MaintenanceFlag::new(2000);
        *flag.cached.lock() = Some(Cached {
            value: true,
            expires_at: Utc::now() + chrono::Duration::seconds(10),
        });
        flag.invalidate();
        assert!(flag.cached.lock().is_none());
    }
}
