//! HTTP client for the comment API, used to arrange state for browser tests.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vista_core::types::{DbId, Timestamp};

use crate::error::{E2eError, E2eResult};

/// A comment as returned by the API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiComment {
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

#[derive(Debug, Deserialize)]
struct CommentListResponse {
    comments: Vec<ApiComment>,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    comment: ApiComment,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentInput<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<DbId>,
}

/// Bearer-authenticated client for the `/api/v1` comment endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl ApiClient {
    /// * `api_url` - API root including `/api/v1`, e.g. `http://host:3000/api/v1`.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `GET /dashboards/{dashboard_id}/comments`
    pub async fn list_comments(&self, dashboard_id: DbId) -> E2eResult<Vec<ApiComment>> {
        let response = self
            .client
            .get(format!("{}/dashboards/{dashboard_id}/comments", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: CommentListResponse = Self::parse_response(response).await?;
        Ok(body.comments)
    }

    /// `POST /dashboards/{dashboard_id}/comments`
    pub async fn create_comment(
        &self,
        dashboard_id: DbId,
        content: &str,
        parent_id: Option<DbId>,
    ) -> E2eResult<ApiComment> {
        let response = self
            .client
            .post(format!("{}/dashboards/{dashboard_id}/comments", self.api_url))
            .bearer_auth(&self.token)
            .json(&CommentInput { content, parent_id })
            .send()
            .await?;

        let body: CommentResponse = Self::parse_response(response).await?;
        Ok(body.comment)
    }

    /// `PUT /dashboard-comments/{id}`
    pub async fn update_comment(&self, id: DbId, content: &str) -> E2eResult<ApiComment> {
        let response = self
            .client
            .put(format!("{}/dashboard-comments/{id}", self.api_url))
            .bearer_auth(&self.token)
            .json(&CommentInput {
                content,
                parent_id: None,
            })
            .send()
            .await?;

        let body: CommentResponse = Self::parse_response(response).await?;
        Ok(body.comment)
    }

    /// `DELETE /dashboard-comments/{id}`, returning the server's message.
    pub async fn delete_comment(&self, id: DbId) -> E2eResult<String> {
        let response = self
            .client
            .delete(format!("{}/dashboard-comments/{id}", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: MessageResponse = Self::parse_response(response).await?;
        Ok(body.message)
    }

    // ---- private helpers ----

    /// Return the response unchanged on 2xx, or [`E2eError::Api`] with the
    /// status and body text.
    async fn ensure_success(response: reqwest::Response) -> E2eResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(E2eError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> E2eResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
