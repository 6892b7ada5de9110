//! The seam between test commands and a concrete browser automation backend.
//!
//! Commands only ever talk to [`BrowserDriver`];
//! [`WebDriverBrowser`](crate::webdriver::WebDriverBrowser) implements it for
//! real runs and tests use an in-memory fake.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::E2eResult;

/// Snapshot of a DOM element returned by [`BrowserDriver::query_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementInfo {
    /// Lowercase tag name, e.g. `img`.
    pub tag: String,
    /// Trimmed visible text content.
    pub text: String,
    pub attributes: HashMap<String, String>,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// DOM events dispatched by [`BrowserDriver::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    DragStart,
    DragEnter,
    DragOver,
    Drop,
    DragEnd,
}

impl DomEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
        }
    }
}

/// A stubbed network response registered with [`BrowserDriver::intercept`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMock {
    pub method: Method,
    /// URL path pattern, e.g. `/api/v1/dashboards/*/comments`.
    pub path: String,
    pub status: u16,
    pub body: serde_json::Value,
    /// Name the intercepted request is waited on by.
    pub alias: String,
}

/// A request the browser made against an intercepted route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<serde_json::Value>,
    pub response_status: u16,
}

/// Primitive browser operations every automation backend provides.
///
/// Waiting methods return [`E2eError::Timeout`](crate::E2eError::Timeout)
/// once `timeout` elapses.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to an absolute URL.
    async fn visit(&self, url: &str) -> E2eResult<()>;

    async fn current_url(&self) -> E2eResult<String>;

    async fn click(&self, selector: &str) -> E2eResult<()>;

    async fn clear(&self, selector: &str) -> E2eResult<()>;

    async fn type_text(&self, selector: &str, text: &str) -> E2eResult<()>;

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> E2eResult<()>;

    /// Wait until an element matching `selector` contains `text`.
    async fn wait_for_text(&self, selector: &str, text: &str, timeout: Duration)
        -> E2eResult<()>;

    /// All elements matching `selector`; empty when nothing matches.
    async fn query_all(&self, selector: &str) -> E2eResult<Vec<ElementInfo>>;

    async fn trigger(&self, selector: &str, event: DomEvent) -> E2eResult<()>;

    async fn intercept(&self, route: RouteMock) -> E2eResult<()>;

    /// Wait for the next request matched by the route registered as `alias`.
    async fn wait_for_intercept(
        &self,
        alias: &str,
        timeout: Duration,
    ) -> E2eResult<InterceptedRequest>;

    async fn local_storage_get(&self, key: &str) -> E2eResult<Option<String>>;

    async fn local_storage_set(&self, key: &str, value: &str) -> E2eResult<()>;

    async fn local_storage_clear(&self) -> E2eResult<()>;
}
