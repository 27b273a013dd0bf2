//! Repository for the `seating_tables` table.
//!
//! Tables are created together with their seats in one transaction so a
//! table never exists with fewer seats than its capacity.

use sqlx::PgPool;
use wedplan_core::seating::canvas::CanvasPoint;
use wedplan_core::seating::table_spec::NewTable;
use wedplan_core::types::{DbId, Degrees};

use crate::models::seat::Seat;
use crate::models::seating_table::{SeatingTable, UpdateSeatingTable};
use crate::repositories::seat_repo::SEAT_COLUMNS;

/// Column list for `seating_tables` queries.
const COLUMNS: &str = "\
    id, wedding_id, name, shape, position_x, position_y, width, height, \
    rotation, capacity, group_id, created_at, updated_at";

/// Provides data access for seating tables.
pub struct SeatingTableRepo;

impl SeatingTableRepo {
    /// Insert a table and its `capacity` seats (indices `0..capacity`).
    ///
    /// The caller validates `spec` first.
    pub async fn create_with_seats(
        pool: &PgPool,
        wedding_id: DbId,
        spec: &NewTable,
    ) -> Result<(SeatingTable, Vec<Seat>), sqlx::Error> {
        let (width, height) = spec.dimensions();
        let position = spec.position_or_default();

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO seating_tables \
                 (wedding_id, name, shape, position_x, position_y, width, height, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let table = sqlx::query_as::<_, SeatingTable>(&query)
            .bind(wedding_id)
            .bind(spec.name.trim())
            .bind(spec.shape.as_str())
            .bind(position.x)
            .bind(position.y)
            .bind(width)
            .bind(height)
            .bind(spec.capacity)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO seats (table_id, seat_index) \
             SELECT $1, idx FROM generate_series(0, $2 - 1) AS idx \
             RETURNING {SEAT_COLUMNS}"
        );
        let mut seats = sqlx::query_as::<_, Seat>(&query)
            .bind(table.id)
            .bind(table.capacity)
            .fetch_all(&mut *tx)
            .await?;
        seats.sort_by_key(|s| s.seat_index);

        tx.commit().await?;
        Ok((table, seats))
    }

    /// List tables of a wedding, optionally narrowed to one group.
    pub async fn list_by_wedding(
        pool: &PgPool,
        wedding_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<Vec<SeatingTable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seating_tables \
             WHERE wedding_id = $1 AND ($2::BIGINT IS NULL OR group_id = $2) \
             ORDER BY id"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(wedding_id)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seating_tables WHERE id = $1");
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update name and size.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateSeatingTable,
    ) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query = format!(
            "UPDATE seating_tables SET \
                 name   = COALESCE($2, name), \
                 width  = COALESCE($3, width), \
                 height = COALESCE($4, height) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.width)
            .bind(dto.height)
            .fetch_optional(pool)
            .await
    }

    /// Persist position and rotation together.
    pub async fn update_position(
        pool: &PgPool,
        id: DbId,
        position: CanvasPoint,
        rotation: Degrees,
    ) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query = format!(
            "UPDATE seating_tables SET position_x = $2, position_y = $3, rotation = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .bind(position.x)
            .bind(position.y)
            .bind(rotation)
            .fetch_optional(pool)
            .await
    }

    /// Assign the table to a group of the same wedding, or clear it.
    ///
    /// Returns `None` if the table does not exist or the group belongs to
    /// another wedding.
    pub async fn set_group(
        pool: &PgPool,
        id: DbId,
        group_id: Option<DbId>,
    ) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query = format!(
            "UPDATE seating_tables t SET group_id = $2 \
             WHERE t.id = $1 \
               AND ($2::BIGINT IS NULL OR EXISTS ( \
                   SELECT 1 FROM table_groups g \
                   WHERE g.id = $2 AND g.wedding_id = t.wedding_id)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a table; its seats go with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seating_tables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
