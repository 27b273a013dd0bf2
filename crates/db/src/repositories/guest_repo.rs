//! Repository for the `guests` table.

use sqlx::PgPool;
use wedplan_core::types::DbId;

use crate::models::guest::{CreateGuest, Guest, UpdateGuest};

/// Column list for `guests` queries.
const COLUMNS: &str = "\
    id, wedding_id, name, category, rsvp_status, dietary_restrictions, \
    plus_one, created_at, updated_at";

/// Provides CRUD operations for guests.
pub struct GuestRepo;

impl GuestRepo {
    pub async fn create(
        pool: &PgPool,
        wedding_id: DbId,
        dto: &CreateGuest,
    ) -> Result<Guest, sqlx::Error> {
        let query = format!(
            "INSERT INTO guests \
                 (wedding_id, name, category, rsvp_status, dietary_restrictions, plus_one) \
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, COALESCE($6, FALSE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(wedding_id)
            .bind(dto.name.trim())
            .bind(&dto.category)
            .bind(dto.rsvp_status.unwrap_or_default().as_str())
            .bind(&dto.dietary_restrictions)
            .bind(dto.plus_one)
            .fetch_one(pool)
            .await
    }

    /// List all guests of a wedding, ordered by name.
    pub async fn list_by_wedding(
        pool: &PgPool,
        wedding_id: DbId,
    ) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE wedding_id = $1 ORDER BY lower(name), id"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(wedding_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE id = $1");
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a guest.
    ///
    /// `dietary_restrictions` uses a provided-flag so `null` clears it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateGuest,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let dietary_provided = dto.dietary_restrictions.is_some();
        let dietary_value = dto.dietary_restrictions.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE guests SET \
                 name                 = COALESCE($2, name), \
                 category             = COALESCE($3, category), \
                 rsvp_status          = COALESCE($4, rsvp_status), \
                 dietary_restrictions = CASE WHEN $5 THEN $6 ELSE dietary_restrictions END, \
                 plus_one             = COALESCE($7, plus_one) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(&dto.category)
            .bind(dto.rsvp_status.map(|s| s.as_str()))
            .bind(dietary_provided)
            .bind(dietary_value)
            .bind(dto.plus_one)
            .fetch_optional(pool)
            .await
    }

    /// Delete a guest. Their seat, if any, becomes vacant.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
