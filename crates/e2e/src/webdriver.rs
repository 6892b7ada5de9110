//! [`BrowserDriver`] over the W3C WebDriver protocol.
//!
//! Talks to a running chromedriver or geckodriver through `fantoccini`.
//! Clicks and typing use native WebDriver element commands so the page sees
//! real input events; element snapshots, DOM events and local storage go
//! through injected scripts. WebDriver has no network interception, so
//! [`BrowserDriver::intercept`] and [`BrowserDriver::wait_for_intercept`]
//! return [`E2eError::Unsupported`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::time::Instant;

use crate::driver::{BrowserDriver, DomEvent, ElementInfo, InterceptedRequest, RouteMock};
use crate::error::{E2eError, E2eResult};

/// Default WebDriver endpoint (chromedriver `--port=4444`, geckodriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const ELEMENT_EXISTS_JS: &str = "return document.querySelector(arguments[0]) !== null;";

const TEXT_PRESENT_JS: &str = "\
return Array.from(document.querySelectorAll(arguments[0]))
  .some(el => (el.textContent || '').includes(arguments[1]));";

const QUERY_ALL_JS: &str = "\
return Array.from(document.querySelectorAll(arguments[0])).map(el => ({
  tag: el.tagName.toLowerCase(),
  text: (el.textContent || '').trim(),
  attributes: Object.fromEntries(Array.from(el.attributes).map(a => [a.name, a.value])),
}));";

// One DataTransfer is shared by every event of a drag, starting at dragstart.
const TRIGGER_JS: &str = "\
const el = document.querySelector(arguments[0]);
if (el === null) { return false; }
if (arguments[1] === 'dragstart' || !window.__e2eDataTransfer) {
  window.__e2eDataTransfer = new DataTransfer();
}
const event = new DragEvent(arguments[1], {
  bubbles: true,
  cancelable: true,
  dataTransfer: window.__e2eDataTransfer,
});
el.dispatchEvent(event);
return true;";

const STORAGE_GET_JS: &str = "return window.localStorage.getItem(arguments[0]);";
const STORAGE_SET_JS: &str = "window.localStorage.setItem(arguments[0], arguments[1]);";
const STORAGE_CLEAR_JS: &str = "window.localStorage.clear();";

impl From<CmdError> for E2eError {
    fn from(err: CmdError) -> Self {
        E2eError::Driver(err.to_string())
    }
}

impl From<NewSessionError> for E2eError {
    fn from(err: NewSessionError) -> Self {
        E2eError::Driver(format!("could not start WebDriver session: {err}"))
    }
}

/// A live WebDriver session.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Open a session with the driver's default capabilities.
    pub async fn connect(webdriver_url: &str) -> E2eResult<Self> {
        Self::connect_with(webdriver_url, Map::new()).await
    }

    /// Open a session against `E2E_WEBDRIVER_URL`, falling back to
    /// [`DEFAULT_WEBDRIVER_URL`].
    pub async fn connect_from_env() -> E2eResult<Self> {
        let url = std::env::var("E2E_WEBDRIVER_URL")
            .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string());
        Self::connect(&url).await
    }

    /// Open a session with explicit capabilities, e.g. headless Chrome:
    ///
    /// ```ignore
    /// let caps = serde_json::json!({
    ///     "goog:chromeOptions": { "args": ["--headless=new"] }
    /// });
    /// let browser = WebDriverBrowser::connect_with(url, caps.as_object().unwrap().clone()).await?;
    /// ```
    pub async fn connect_with(
        webdriver_url: &str,
        capabilities: Map<String, Value>,
    ) -> E2eResult<Self> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities);
        let client = builder.connect(webdriver_url).await?;
        tracing::info!(webdriver_url, "WebDriver session started");
        Ok(Self { client })
    }

    /// End the session and close the browser.
    pub async fn close(self) -> E2eResult<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn run(&self, script: &str, args: Vec<Value>) -> E2eResult<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Re-run `script` until it returns `true` or `timeout` elapses.
    async fn poll_script(
        &self,
        what: String,
        script: &str,
        args: Vec<Value>,
        timeout: Duration,
    ) -> E2eResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.run(script, args.clone()).await? == Value::Bool(true) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(E2eError::Timeout {
                    what,
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[derive(Debug, Deserialize)]
struct ElementSnapshot {
    tag: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl From<ElementSnapshot> for ElementInfo {
    fn from(snapshot: ElementSnapshot) -> Self {
        ElementInfo {
            tag: snapshot.tag,
            text: snapshot.text,
            attributes: snapshot.attributes,
        }
    }
}

/// Decode the result of [`QUERY_ALL_JS`].
fn parse_elements(value: Value) -> E2eResult<Vec<ElementInfo>> {
    let snapshots: Vec<ElementSnapshot> = serde_json::from_value(value)?;
    Ok(snapshots.into_iter().map(ElementInfo::from).collect())
}

/// Decode the result of `localStorage.getItem`.
fn parse_storage_value(value: Value) -> E2eResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(E2eError::Driver(format!(
            "localStorage returned a non-string value: {other}"
        ))),
    }
}

#[async_trait]
impl BrowserDriver for WebDriverBrowser {
    async fn visit(&self, url: &str) -> E2eResult<()> {
        tracing::debug!(url, "visit");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        self.client.find(Locator::Css(selector)).await?.click().await?;
        Ok(())
    }

    async fn clear(&self, selector: &str) -> E2eResult<()> {
        self.client.find(Locator::Css(selector)).await?.clear().await?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.client
            .find(Locator::Css(selector))
            .await?
            .send_keys(text)
            .await?;
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.poll_script(
            selector.to_string(),
            ELEMENT_EXISTS_JS,
            vec![json!(selector)],
            timeout,
        )
        .await
    }

    async fn wait_for_text(&self, selector: &str, text: &str, timeout: Duration) -> E2eResult<()> {
        self.poll_script(
            format!("'{text}' in {selector}"),
            TEXT_PRESENT_JS,
            vec![json!(selector), json!(text)],
            timeout,
        )
        .await
    }

    async fn query_all(&self, selector: &str) -> E2eResult<Vec<ElementInfo>> {
        let value = self.run(QUERY_ALL_JS, vec![json!(selector)]).await?;
        parse_elements(value)
    }

    async fn trigger(&self, selector: &str, event: DomEvent) -> E2eResult<()> {
        let dispatched = self
            .run(TRIGGER_JS, vec![json!(selector), json!(event.as_str())])
            .await?;
        if dispatched != Value::Bool(true) {
            return Err(E2eError::Driver(format!(
                "no element matches {selector} for {}",
                event.as_str()
            )));
        }
        Ok(())
    }

    async fn intercept(&self, _route: RouteMock) -> E2eResult<()> {
        Err(E2eError::Unsupported("network interception over WebDriver"))
    }

    async fn wait_for_intercept(
        &self,
        _alias: &str,
        _timeout: Duration,
    ) -> E2eResult<InterceptedRequest> {
        Err(E2eError::Unsupported("network interception over WebDriver"))
    }

    async fn local_storage_get(&self, key: &str) -> E2eResult<Option<String>> {
        let value = self.run(STORAGE_GET_JS, vec![json!(key)]).await?;
        parse_storage_value(value)
    }

    async fn local_storage_set(&self, key: &str, value: &str) -> E2eResult<()> {
        self.run(STORAGE_SET_JS, vec![json!(key), json!(value)]).await?;
        Ok(())
    }

    async fn local_storage_clear(&self) -> E2eResult<()> {
        self.run(STORAGE_CLEAR_JS, Vec::new()).await?;
        Ok(())
    }
}
