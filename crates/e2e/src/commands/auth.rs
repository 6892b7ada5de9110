//! Login and logout through the UI.

use crate::commands::{test_id, wait_for_url};
use crate::config::E2eConfig;
use crate::driver::BrowserDriver;
use crate::error::E2eResult;

pub const LOGIN_PATH: &str = "/login";

/// Sign in through the login form and wait until the app leaves `/login`.
pub async fn login(
    driver: &dyn BrowserDriver,
    config: &E2eConfig,
    email: &str,
    password: &str,
) -> E2eResult<()> {
    tracing::debug!(%email, "Logging in through the UI");

    driver.visit(&config.url(LOGIN_PATH)).await?;

    let email_input = test_id("login-email");
    driver.wait_for_element(&email_input, config.timeout()).await?;
    driver.clear(&email_input).await?;
    driver.type_text(&email_input, email).await?;

    let password_input = test_id("login-password");
    driver.clear(&password_input).await?;
    driver.type_text(&password_input, password).await?;

    driver.click(&test_id("login-submit")).await?;

    wait_for_url(driver, "redirect after login", config.timeout(), |url| {
        !url.contains(LOGIN_PATH)
    })
    .await?;
    driver
        .wait_for_element(&test_id("user-menu"), config.timeout())
        .await
}

/// [`login`] with the account from `E2E_USER_EMAIL` / `E2E_USER_PASSWORD`.
pub async fn login_as_default_user(
    driver: &dyn BrowserDriver,
    config: &E2eConfig,
) -> E2eResult<()> {
    login(driver, config, &config.user_email, &config.user_password).await
}

/// Sign out via the user menu and wait for the login page.
pub async fn logout(driver: &dyn BrowserDriver, config: &E2eConfig) -> E2eResult<()> {
    driver.click(&test_id("user-menu")).await?;
    driver.click(&test_id("logout-button")).await?;

    wait_for_url(driver, "login page after logout", config.timeout(), |url| {
        url.contains(LOGIN_PATH)
    })
    .await?;
    Ok(())
}
