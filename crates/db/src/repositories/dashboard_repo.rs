//! Repository for the `dashboards` table.

use sqlx::PgPool;
use vista_core::types::DbId;

use crate::models::dashboard::{CreateDashboard, Dashboard};

const COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

/// Provides CRUD operations for dashboards.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Insert a new dashboard, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDashboard) -> Result<Dashboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboards (owner_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a dashboard by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboards WHERE id = $1");
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a dashboard with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM dashboards WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete a dashboard (and, by cascade, its comments).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
