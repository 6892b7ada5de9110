//! Dashboard and report creation flows.

use uuid::Uuid;
use vista_core::types::DbId;

use crate::commands::{test_id, wait_for_url};
use crate::config::E2eConfig;
use crate::driver::BrowserDriver;
use crate::error::{E2eError, E2eResult};

pub const DASHBOARDS_PATH: &str = "/dashboards";

/// Create a dashboard through the "new dashboard" dialog.
///
/// Returns the id of the new dashboard, read from the URL the app
/// navigates to after saving.
pub async fn create_dashboard(
    driver: &dyn BrowserDriver,
    config: &E2eConfig,
    name: &str,
    description: Option<&str>,
) -> E2eResult<DbId> {
    driver.visit(&config.url(DASHBOARDS_PATH)).await?;
    driver.click(&test_id("new-dashboard-button")).await?;

    let name_input = test_id("dashboard-name-input");
    driver.wait_for_element(&name_input, config.timeout()).await?;
    driver.type_text(&name_input, name).await?;

    if let Some(description) = description {
        driver
            .type_text(&test_id("dashboard-description-input"), description)
            .await?;
    }

    driver.click(&test_id("dashboard-save-button")).await?;

    let url = wait_for_url(driver, "new dashboard page", config.timeout(), |url| {
        dashboard_id_from_url(url).is_some()
    })
    .await?;
    let id = dashboard_id_from_url(&url)
        .ok_or_else(|| E2eError::Assertion(format!("no dashboard id in URL {url}")))?;

    driver
        .wait_for_text(&test_id("dashboard-title"), name, config.timeout())
        .await?;

    tracing::debug!(dashboard_id = %id, %name, "Dashboard created through the UI");
    Ok(id)
}

/// Add a report to an existing dashboard and wait for it to be listed.
pub async fn create_report(
    driver: &dyn BrowserDriver,
    config: &E2eConfig,
    name: &str,
    dashboard_id: DbId,
) -> E2eResult<()> {
    driver
        .visit(&config.url(&format!("{DASHBOARDS_PATH}/{dashboard_id}")))
        .await?;
    driver.click(&test_id("add-report-button")).await?;

    let name_input = test_id("report-name-input");
    driver.wait_for_element(&name_input, config.timeout()).await?;
    driver.type_text(&name_input, name).await?;
    driver.click(&test_id("report-save-button")).await?;

    driver
        .wait_for_text(&test_id("report-list"), name, config.timeout())
        .await
}

/// Extract `{id}` from a `.../dashboards/{id}` URL.
pub fn dashboard_id_from_url(url: &str) -> Option<DbId> {
    let (_, rest) = url.split_once("/dashboards/")?;
    let segment = rest.split(['/', '?', '#']).next()?;
    Uuid::parse_str(segment).ok()
}
