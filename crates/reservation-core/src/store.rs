//! Durable, transactional storage: a thin wrapper around `sqlx::PgPool`.
//!
//! Grounded in `tmf620_catalog::db::init_db`'s retry-with-backoff connect
//! loop, generalized to read pool-shape knobs from [`crate::config::Config`]
//! instead of hardcoding them, and in `harman/src/db.rs`'s explicit
//! `tx.commit()`/`tx.rollback()` discipline for scoped transactions.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Transaction};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

#[derive(Clone)]
pub struct Store {
    pool: Pool<Postgres>,
    statement_timeout_ms: u64,
    lock_timeout_ms: u64,
}

impl Store {
    /// Builds a connection pool with retry-with-backoff, matching
    /// `tmf620_catalog::db::init_db`.
    pub async fn connect(config: &Config) -> Self {
        let mut retries = 5u32;
        let mut delay = 1u64;

        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout_seconds))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout_seconds))
                .max_lifetime(Duration::from_secs(
                    config.db_max_connection_lifetime_seconds,
                ))
                .connect(&config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    log::warn!(
                        "failed to connect to database ({} retries left): {}",
                        retries,
                        e
                    );
                    retries -= 1;
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                    delay *= 2;
                }
                Err(e) => panic!("failed to connect to database after retries: {}", e),
            }
        };

        Self {
            pool,
            statement_timeout_ms: config.db_statement_timeout_ms,
            lock_timeout_ms: config.db_lock_timeout_ms,
        }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Opens a transaction and applies the configured statement/lock-wait
    /// timeouts via `SET LOCAL`. Callers are responsible for
    /// `commit`/`rollback`.
    pub async fn begin(&self) -> CoreResult<Transaction<'_, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!(
            "SET LOCAL statement_timeout = {}",
            self.statement_timeout_ms
        ))
        .execute(&mut *tx)
        .await
        .map_err(map_timeout_error)?;
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = {}",
            self.lock_timeout_ms
        ))
        .execute(&mut *tx)
        .await
        .map_err(map_timeout_error)?;
        Ok(tx)
    }

    /// Scoped acquisition: runs `f` with a mutable borrow of the
    /// transaction, commits on `Ok`, rolls back on `Err`. Both exit paths are
    /// explicit in code rather than relied upon via `Transaction::drop`,
    /// matching `BookingRepository::create`'s explicit rollback-on-conflict.
    ///
    /// `f` returns a boxed, pinned future rather than a bare `impl Future`:
    /// callers build that future from an `async move` block that borrows the
    /// `&mut Transaction` argument for its own body (every repository call
    /// inside reborrows `tx`), so the future's lifetime is tied to the
    /// per-call reference, not to a single fixed type. A bare associated
    /// `Fut: Future` can't express that — no one concrete `Fut` satisfies
    /// the bound for every possible borrow lifetime — so the higher-ranked
    /// bound below is expressed with a trait object instead.
    pub async fn with_transaction<F, T>(&self, f: F) -> CoreResult<T>
    where
        F: for<'c> FnOnce(
            &'c mut Transaction<'_, Postgres>,
        ) -> Pin<Box<dyn Future<Output = CoreResult<T>> + Send + 'c>>,
    {
        let mut tx = self.begin().await?;
        match f(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }
}

fn map_timeout_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("57014") {
            return CoreError::Timeout("statement timeout exceeded".into());
        }
    }
    CoreError::Database(err)
}
