//! Reservation Repository — CRUD for reservations, lock-acquiring read, and
//! the confirmed-quantity aggregate the counter-drift guard depends on.
//!
//! Query shape grounded in `resource-management::reservation`'s
//! `get_active_reservations`/`row_to_reservation` conventions.

use crate::error::{CoreError, CoreResult};
use crate::ids::{ClientId, ReservationId, ResourceId};
use crate::models::{RejectionReason, Reservation, ReservationStatus};
use sqlx::{PgConnection, Row};

fn row_to_reservation(row: &sqlx::postgres::PgRow) -> CoreResult<Reservation> {
    let status_str: String = row.try_get("status")?;
    let status = ReservationStatus::from_db_str(&status_str).ok_or_else(|| {
        CoreError::InvalidState(format!("unknown reservation status: {}", status_str))
    })?;

    let rejection_reason = match row.try_get::<Option<String>, _>("rejection_reason")? {
        Some(s) => Some(
            RejectionReason::from_db_str(&s)
                .ok_or_else(|| CoreError::InvalidState(format!("unknown rejection reason: {}", s)))?,
        ),
        None => None,
    };

    Ok(Reservation {
        id: ReservationId::from(row.try_get::<uuid::Uuid, _>("id")?),
        resource_id: ResourceId::parse(row.try_get::<String, _>("resource_id")?)?,
        client_id: ClientId::parse(row.try_get::<String, _>("client_id")?)?,
        quantity: row.try_get("quantity")?,
        status,
        rejection_reason,
        server_timestamp: row.try_get("server_timestamp")?,
        created_at: row.try_get("created_at")?,
    })
}

const SELECT_COLUMNS: &str =
    "id, resource_id, client_id, quantity, status, rejection_reason, server_timestamp, created_at";

pub async fn save(conn: &mut PgConnection, reservation: &Reservation) -> CoreResult<()> {
    sqlx::query(
        "INSERT INTO reservations
           (id, resource_id, client_id, quantity, status, rejection_reason, server_timestamp, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (id) DO UPDATE SET
           status = EXCLUDED.status,
           rejection_reason = EXCLUDED.rejection_reason",
    )
    .bind(reservation.id.as_uuid())
    .bind(reservation.resource_id.as_str())
    .bind(reservation.client_id.as_str())
    .bind(reservation.quantity)
    .bind(reservation.status.as_db_str())
    .bind(reservation.rejection_reason.map(|r| r.as_db_str()))
    .bind(reservation.server_timestamp)
    .bind(reservation.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn find_by_id(conn: &mut PgConnection, id: ReservationId) -> CoreResult<Reservation> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM reservations WHERE id = $1",
        SELECT_COLUMNS
    ))
    .bind(id.as_uuid())
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => row_to_reservation(&row),
        None => Err(CoreError::ReservationNotFound(id.to_string())),
    }
}

pub async fn find_by_id_for_update(
    conn: &mut PgConnection,
    id: ReservationId,
) -> CoreResult<Reservation> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM reservations WHERE id = $1 FOR UPDATE",
        SELECT_COLUMNS
    ))
    .bind(id.as_uuid())
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => row_to_reservation(&row),
        None => Err(CoreError::ReservationNotFound(id.to_string())),
    }
}

/// `SUM(quantity)` over CONFIRMED rows for `resource_id`. Run against the
/// caller's own transaction connection so it observes that transaction's own
/// uncommitted writes.
pub async fn sum_active_quantity_by_resource_id(
    conn: &mut PgConnection,
    resource_id: &ResourceId,
) -> CoreResult<i64> {
    let row = sqlx::query(
        "SELECT COALESCE(SUM(quantity), 0) AS total FROM reservations
         WHERE resource_id = $1 AND status = 'CONFIRMED'",
    )
    .bind(resource_id.as_str())
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.try_get::<i64, _>("total")?)
}
