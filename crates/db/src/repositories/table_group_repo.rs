//! Repository for the `table_groups` table.

use sqlx::PgPool;
use wedplan_core::group::DEFAULT_GROUP_COLOR;
use wedplan_core::types::DbId;

use crate::models::table_group::{CreateTableGroup, TableGroup, UpdateTableGroup};

/// Column list for `table_groups` queries.
const COLUMNS: &str = "id, wedding_id, name, color, group_type, created_at, updated_at";

/// Provides CRUD operations for table groups.
pub struct TableGroupRepo;

impl TableGroupRepo {
    pub async fn create(
        pool: &PgPool,
        wedding_id: DbId,
        dto: &CreateTableGroup,
    ) -> Result<TableGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO table_groups (wedding_id, name, color, group_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TableGroup>(&query)
            .bind(wedding_id)
            .bind(dto.name.trim())
            .bind(dto.color.as_deref().unwrap_or(DEFAULT_GROUP_COLOR))
            .bind(dto.group_type.unwrap_or_default().as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_wedding(
        pool: &PgPool,
        wedding_id: DbId,
    ) -> Result<Vec<TableGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM table_groups WHERE wedding_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, TableGroup>(&query)
            .bind(wedding_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TableGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM table_groups WHERE id = $1");
        sqlx::query_as::<_, TableGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a group. Only provided fields change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateTableGroup,
    ) -> Result<Option<TableGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE table_groups SET \
                 name       = COALESCE($2, name), \
                 color      = COALESCE($3, color), \
                 group_type = COALESCE($4, group_type) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TableGroup>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(&dto.color)
            .bind(dto.group_type.map(|t| t.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a group. Its tables become ungrouped.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM table_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
