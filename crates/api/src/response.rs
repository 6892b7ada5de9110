//! Shared response envelope types for API handlers.
//!
//! Successful responses are `{ "success": true, ... }` with the payload's
//! fields inlined next to the flag. Use [`SuccessResponse`] instead of
//! ad-hoc `serde_json::json!` bodies.

use serde::Serialize;
use vista_db::models::comment::CommentWithAuthor;

/// `{ "success": true, ...body }` response envelope.
///
/// `T` must serialize as a map (a struct with named fields).
///
/// ```ignore
/// Ok(Json(SuccessResponse::new(CommentList { comments })))
/// ```
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// `comments` payload for list endpoints.
#[derive(Debug, Serialize)]
pub struct CommentList {
    pub comments: Vec<CommentWithAuthor>,
}

/// `comment` payload for create/update endpoints.
#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub comment: CommentWithAuthor,
}

/// `message` payload for acknowledgements.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}
