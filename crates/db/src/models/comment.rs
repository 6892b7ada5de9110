//! Dashboard comment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vista_core::types::{DbId, Timestamp};

/// A row from the `dashboard_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub dashboard_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub dashboard_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Request body for creating a comment.
///
/// A missing `content` deserializes as empty so it is rejected by content
/// validation rather than by the JSON extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    #[serde(default)]
    pub content: String,
    pub parent_id: Option<DbId>,
}

/// Request body for editing a comment. Only the content is mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    #[serde(default)]
    pub content: String,
}
