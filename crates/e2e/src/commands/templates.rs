//! Filter templates stored in the browser's local storage.

use vista_core::filter_template::{FilterTemplate, TEMPLATES_STORAGE_KEY};

use crate::driver::BrowserDriver;
use crate::error::E2eResult;

/// Replace the saved user templates before the page loads them.
pub async fn seed_filter_templates(
    driver: &dyn BrowserDriver,
    templates: &[FilterTemplate],
) -> E2eResult<()> {
    let json = serde_json::to_string(templates)?;
    driver.local_storage_set(TEMPLATES_STORAGE_KEY, &json).await
}

/// Read back the saved user templates; empty when nothing is stored.
pub async fn read_filter_templates(driver: &dyn BrowserDriver) -> E2eResult<Vec<FilterTemplate>> {
    match driver.local_storage_get(TEMPLATES_STORAGE_KEY).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Drop everything the app keeps in local storage.
pub async fn reset_local_storage(driver: &dyn BrowserDriver) -> E2eResult<()> {
    driver.local_storage_clear().await
}
