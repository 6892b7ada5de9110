//! Reusable browser actions composed from [`BrowserDriver`] primitives.

pub mod a11y;
pub mod auth;
pub mod dashboard;
pub mod interaction;
pub mod network;
pub mod templates;
pub mod toast;

use std::time::Duration;

use tokio::time::Instant;

use crate::driver::BrowserDriver;
use crate::error::{E2eError, E2eResult};

const URL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// CSS selector for a `data-testid` attribute.
pub fn test_id(id: &str) -> String {
    format!("[data-testid=\"{id}\"]")
}

/// Poll the current URL until `matches` accepts it, returning that URL.
pub(crate) async fn wait_for_url<F>(
    driver: &dyn BrowserDriver,
    what: &str,
    timeout: Duration,
    matches: F,
) -> E2eResult<String>
where
    F: Fn(&str) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let url = driver.current_url().await?;
        if matches(&url) {
            return Ok(url);
        }
        if Instant::now() >= deadline {
            return Err(E2eError::Timeout {
                what: format!("{what} (last URL: {url})"),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(URL_POLL_INTERVAL).await;
    }
}
