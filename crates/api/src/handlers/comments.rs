//! Handlers for threaded dashboard comments.
//!
//! Provides endpoints for listing, creating, editing, and deleting comments
//! on a dashboard. Only a comment's author may edit or delete it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vista_core::comment::{ensure_comment_author, normalize_comment_content};
use vista_core::error::CoreError;
use vista_core::types::DbId;
use vista_db::models::comment::{Comment, CreateComment, UpdateComment};
use vista_db::repositories::{CommentRepo, DashboardRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::response::{CommentBody, CommentList, Message, SuccessResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Verify that a dashboard exists, returning an error if not found.
async fn ensure_dashboard_exists(pool: &sqlx::PgPool, dashboard_id: DbId) -> AppResult<()> {
    if !DashboardRepo::exists(pool, dashboard_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        }));
    }
    Ok(())
}

/// Verify that a parent comment exists on the same dashboard.
async fn ensure_parent_in_dashboard(
    pool: &sqlx::PgPool,
    parent_id: DbId,
    dashboard_id: DbId,
) -> AppResult<()> {
    CommentRepo::find_in_dashboard(pool, parent_id, dashboard_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Parent comment",
                id: parent_id,
            })
        })?;
    Ok(())
}

/// Load a comment, returning an error if not found.
async fn find_comment(pool: &sqlx::PgPool, comment_id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(pool, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: comment_id,
            })
        })
}

/* --------------------------------------------------------------------------
Comment handlers
-------------------------------------------------------------------------- */

/// GET /dashboards/{dashboard_id}/comments
///
/// List all comments on a dashboard with author details, oldest first.
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(dashboard_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let comments = CommentRepo::list_for_dashboard(&state.pool, dashboard_id).await?;
    Ok(Json(SuccessResponse::new(CommentList { comments })))
}

/// POST /dashboards/{dashboard_id}/comments
///
/// Create a comment, or a reply when `parentId` is given.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(dashboard_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let content = normalize_comment_content(&input.content)?;

    ensure_dashboard_exists(&state.pool, dashboard_id).await?;

    if let Some(parent_id) = input.parent_id {
        ensure_parent_in_dashboard(&state.pool, parent_id, dashboard_id).await?;
    }

    let comment = CommentRepo::create(
        &state.pool,
        dashboard_id,
        auth.user_id,
        &content,
        input.parent_id,
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        dashboard_id = %dashboard_id,
        comment_id = %comment.id,
        parent_id = ?comment.parent_id,
        "Comment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new(CommentBody { comment })),
    ))
}

/// PUT /dashboard-comments/{id}
///
/// Replace a comment's content. Author only.
pub async fn update_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    let content = normalize_comment_content(&input.content)?;

    let existing = find_comment(&state.pool, comment_id).await?;
    ensure_comment_author(existing.user_id, auth.user_id)?;

    let comment = CommentRepo::update_content(&state.pool, comment_id, &content)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: comment_id,
            })
        })?;

    tracing::info!(
        user_id = %auth.user_id,
        comment_id = %comment_id,
        "Comment updated"
    );

    Ok(Json(SuccessResponse::new(CommentBody { comment })))
}

/// DELETE /dashboard-comments/{id}
///
/// Delete a comment and its replies. Author only. How deep the reply
/// cascade goes is set by `COMMENT_DELETE_CASCADE`.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_comment(&state.pool, comment_id).await?;
    ensure_comment_author(existing.user_id, auth.user_id)?;

    let cascade = state.config.comment_delete_cascade;
    let removed = CommentRepo::delete(&state.pool, comment_id, cascade).await?;

    tracing::info!(
        user_id = %auth.user_id,
        comment_id = %comment_id,
        cascade = %cascade,
        removed,
        "Comment deleted"
    );

    Ok(Json(SuccessResponse::new(Message {
        message: "Comment deleted successfully".to_string(),
    })))
}
