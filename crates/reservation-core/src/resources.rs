//! Resource Repository — CRUD for resources, lock-acquiring read, and
//! version-checked update.
//!
//! Query shape grounded in `resource-management::capacity`'s row-to-struct
//! helpers; the `SELECT ... FOR UPDATE` locking read is grounded in the
//! pack's `harman/src/db.rs` transactional row lock (adapted from
//! tokio-postgres to sqlx), since the teacher workspace never issues
//! `FOR UPDATE` itself.

use crate::error::{CoreError, CoreResult};
use crate::ids::ResourceId;
use crate::models::{Resource, ResourceState};
use chrono::Utc;
use sqlx::{PgConnection, Row};

fn row_to_resource(row: &sqlx::postgres::PgRow) -> CoreResult<Resource> {
    let state_str: String = row.try_get("state")?;
    let state = ResourceState::from_db_str(&state_str)
        .ok_or_else(|| CoreError::InvalidState(format!("unknown resource state: {}", state_str)))?;
    Ok(Resource {
        id: ResourceId::parse(row.try_get::<String, _>("id")?)?,
        resource_type: row.try_get("type_")?,
        capacity: row.try_get("capacity")?,
        current_bookings: row.try_get("current_bookings")?,
        state,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const SELECT_COLUMNS: &str =
    "id, type AS type_, capacity, current_bookings, version, state, created_at, updated_at";

/// Non-locking read.
pub async fn find_by_id(conn: &mut PgConnection, id: &ResourceId) -> CoreResult<Resource> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM resources WHERE id = $1",
        SELECT_COLUMNS
    ))
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => row_to_resource(&row),
        None => Err(CoreError::ResourceNotFound(id.to_string())),
    }
}

/// Lock-acquiring read inside the caller's transaction; blocks competing
/// acquirers until the transaction ends.
pub async fn find_by_id_for_update(
    conn: &mut PgConnection,
    id: &ResourceId,
) -> CoreResult<Resource> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM resources WHERE id = $1 FOR UPDATE",
        SELECT_COLUMNS
    ))
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => row_to_resource(&row),
        None => Err(CoreError::ResourceNotFound(id.to_string())),
    }
}

/// Insert or unconditional upsert — used only for creation and admin state
/// changes, never inside the locked commit/cancel path.
pub async fn save(conn: &mut PgConnection, resource: &Resource) -> CoreResult<()> {
    sqlx::query(
        "INSERT INTO resources (id, type, capacity, current_bookings, version, state, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (id) DO UPDATE SET
           type = EXCLUDED.type,
           capacity = EXCLUDED.capacity,
           current_bookings = EXCLUDED.current_bookings,
           version = EXCLUDED.version,
           state = EXCLUDED.state,
           updated_at = EXCLUDED.updated_at",
    )
    .bind(resource.id.as_str())
    .bind(&resource.resource_type)
    .bind(resource.capacity)
    .bind(resource.current_bookings)
    .bind(resource.version)
    .bind(resource.state.as_db_str())
    .bind(resource.created_at)
    .bind(resource.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Update conditional on the stored `version` equaling `resource.version - 1`.
/// On mismatch fails with `ConcurrencyConflict`; on a missing row fails with
/// `ResourceNotFound`.
pub async fn update_with_optimistic_lock(
    conn: &mut PgConnection,
    resource: &Resource,
) -> CoreResult<()> {
    let previous_version = resource.version - 1;
    let result = sqlx::query(
        "UPDATE resources
         SET current_bookings = $1, version = $2, state = $3, updated_at = $4
         WHERE id = $5 AND version = $6",
    )
    .bind(resource.current_bookings)
    .bind(resource.version)
    .bind(resource.state.as_db_str())
    .bind(Utc::now())
    .bind(resource.id.as_str())
    .bind(previous_version)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        let exists = sqlx::query("SELECT 1 FROM resources WHERE id = $1")
            .bind(resource.id.as_str())
            .fetch_optional(&mut *conn)
            .await?
            .is_some();

        return Err(if exists {
            CoreError::ConcurrencyConflict(resource.id.to_string())
        } else {
            CoreError::ResourceNotFound(resource.id.to_string())
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_columns_include_aliased_type() {
        assert!(SELECT_COLUMNS.contains("type AS type_"));
    }
}
