//! Repository for the `dashboard_comments` table.

use sqlx::PgPool;
use vista_core::comment::DeleteCascade;
use vista_core::types::DbId;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Column list for dashboard_comments queries.
const COLUMNS: &str = "id, dashboard_id, user_id, content, parent_id, created_at, updated_at";

/// Comment columns plus author display fields, for a `c` / `u` join.
const AUTHOR_COLUMNS: &str = "c.id, c.dashboard_id, c.user_id, c.content, c.parent_id, \
    c.created_at, c.updated_at, u.username, u.email, u.avatar_url";

/// Provides CRUD operations for dashboard comments.
pub struct CommentRepo;

impl CommentRepo {
    /// List all comments on a dashboard with author details, oldest first.
    pub async fn list_for_dashboard(
        pool: &PgPool,
        dashboard_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM dashboard_comments c
             INNER JOIN users u ON u.id = c.user_id
             WHERE c.dashboard_id = $1
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(dashboard_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboard_comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment only if it belongs to the given dashboard.
    pub async fn find_in_dashboard(
        pool: &PgPool,
        id: DbId,
        dashboard_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dashboard_comments
             WHERE id = $1 AND dashboard_id = $2"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(dashboard_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a comment and return it with author details.
    ///
    /// `content` must already be validated and trimmed.
    pub async fn create(
        pool: &PgPool,
        dashboard_id: DbId,
        user_id: DbId,
        content: &str,
        parent_id: Option<DbId>,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO dashboard_comments (dashboard_id, user_id, content, parent_id)
                VALUES ($1, $2, $3, $4)
                RETURNING {COLUMNS}
             )
             SELECT {AUTHOR_COLUMNS}
             FROM c
             INNER JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(dashboard_id)
            .bind(user_id)
            .bind(content)
            .bind(parent_id)
            .fetch_one(pool)
            .await
    }

    /// Replace a comment's content and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE dashboard_comments
                SET content = $2, updated_at = clock_timestamp()
                WHERE id = $1
                RETURNING {COLUMNS}
             )
             SELECT {AUTHOR_COLUMNS}
             FROM c
             INNER JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment and its replies according to `cascade`.
    ///
    /// Returns the number of rows removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        cascade: DeleteCascade,
    ) -> Result<u64, sqlx::Error> {
        match cascade {
            DeleteCascade::Direct => Self::delete_with_replies(pool, id).await,
            DeleteCascade::Recursive => Self::delete_thread(pool, id).await,
        }
    }

    /// Delete a comment and its direct replies. Deeper replies are kept.
    pub async fn delete_with_replies(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboard_comments WHERE id = $1 OR parent_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a comment and every reply below it at any depth.
    pub async fn delete_thread(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        // UNION (not UNION ALL) terminates even if parent links form a cycle.
        let result = sqlx::query(
            "WITH RECURSIVE thread AS (
                SELECT id FROM dashboard_comments WHERE id = $1
                UNION
                SELECT child.id
                FROM dashboard_comments child
                INNER JOIN thread t ON child.parent_id = t.id
             )
             DELETE FROM dashboard_comments WHERE id IN (SELECT id FROM thread)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
