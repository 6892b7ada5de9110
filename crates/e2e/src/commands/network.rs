//! Network mocking with aliased waits.

use std::time::Duration;

use reqwest::Method;

use crate::driver::{BrowserDriver, InterceptedRequest, RouteMock};
use crate::error::{E2eError, E2eResult};

/// Builder for a stubbed API response.
///
/// ```ignore
/// let alias = mock_api(driver, ApiMock::new(Method::GET, "/api/v1/dashboards/*/comments")
///     .body(json!({ "success": true, "comments": [] }))
///     .alias("getComments")).await?;
/// wait_for(driver, &alias, config.timeout()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiMock {
    method: Method,
    path: String,
    status: u16,
    body: serde_json::Value,
    alias: Option<String>,
}

impl ApiMock {
    /// A `200` response with a `null` body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            status: 200,
            body: serde_json::Value::Null,
            alias: None,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = body;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The explicit alias, or one derived from method and path
    /// (`GET /api/v1/dashboards` becomes `get-api-v1-dashboards`).
    pub fn resolved_alias(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        let path: String = self
            .path
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        format!("{}-{}", self.method.as_str().to_ascii_lowercase(), path)
    }

    fn into_route(self) -> RouteMock {
        let alias = self.resolved_alias();
        RouteMock {
            method: self.method,
            path: self.path,
            status: self.status,
            body: self.body,
            alias,
        }
    }
}

/// Register a stubbed response and return the alias to wait on.
pub async fn mock_api(driver: &dyn BrowserDriver, mock: ApiMock) -> E2eResult<String> {
    let route = mock.into_route();
    let alias = route.alias.clone();

    tracing::debug!(
        method = %route.method,
        path = %route.path,
        status = route.status,
        %alias,
        "Mocking API route"
    );

    driver.intercept(route).await?;
    Ok(alias)
}

/// Wait for the browser to hit the route registered as `alias`.
///
/// A leading `@` is accepted and ignored.
pub async fn wait_for(
    driver: &dyn BrowserDriver,
    alias: &str,
    timeout: Duration,
) -> E2eResult<InterceptedRequest> {
    let alias = alias.strip_prefix('@').unwrap_or(alias);
    if alias.is_empty() {
        return Err(E2eError::UnknownAlias(String::new()));
    }
    driver.wait_for_intercept(alias, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_derived_from_method_and_path() {
        let mock = ApiMock::new(Method::POST, "/api/v1/dashboards/*/comments");
        assert_eq!(mock.resolved_alias(), "post-api-v1-dashboards-comments");
    }

    #[test]
    fn test_explicit_alias_wins() {
        let mock = ApiMock::new(Method::GET, "/api/v1/dashboards").alias("dashboards");
        assert_eq!(mock.resolved_alias(), "dashboards");
    }

    #[test]
    fn test_defaults_to_200_null() {
        let route = ApiMock::new(Method::DELETE, "/x").into_route();
        assert_eq!(route.status, 200);
        assert!(route.body.is_null());
    }
}
