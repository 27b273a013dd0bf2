//! Repository for the `weddings` table.

use sqlx::PgPool;
use wedplan_core::types::DbId;

use crate::models::wedding::{CreateWedding, UpdateWedding, Wedding};

/// Column list for `weddings` queries.
const COLUMNS: &str = "id, name, wedding_date, created_at, updated_at";

/// Provides CRUD operations for weddings.
pub struct WeddingRepo;

impl WeddingRepo {
    pub async fn create(pool: &PgPool, dto: &CreateWedding) -> Result<Wedding, sqlx::Error> {
        let query = format!(
            "INSERT INTO weddings (name, wedding_date) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(dto.name.trim())
            .bind(dto.wedding_date)
            .fetch_one(pool)
            .await
    }

    /// List all weddings, soonest first; undated ones last.
    pub async fn list(pool: &PgPool) -> Result<Vec<Wedding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weddings ORDER BY wedding_date ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, Wedding>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weddings WHERE id = $1");
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a wedding. Only provided fields change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateWedding,
    ) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!(
            "UPDATE weddings SET \
                 name = COALESCE($2, name), \
                 wedding_date = COALESCE($3, wedding_date) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.wedding_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a wedding and, by cascade, everything it owns.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weddings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
