use std::time::Duration;

/// Settings for browser test runs, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct E2eConfig {
    /// Frontend origin the browser visits.
    pub base_url: String,
    /// API root used by [`ApiClient`](crate::api::ApiClient), including `/api/v1`.
    pub api_url: String,
    /// Account used by `login_as_default_user`.
    pub user_email: String,
    pub user_password: String,
    /// Default wait for elements, texts and intercepted requests.
    pub timeout_ms: u64,
}

impl E2eConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                         |
    /// |---------------------|---------------------------------|
    /// | `E2E_BASE_URL`      | `http://localhost:5173`         |
    /// | `E2E_API_URL`       | `http://localhost:3000/api/v1`  |
    /// | `E2E_USER_EMAIL`    | `test@e2e.test`                 |
    /// | `E2E_USER_PASSWORD` | `password123`                   |
    /// | `E2E_TIMEOUT_MS`    | `10000`                         |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("E2E_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".into());
        let api_url =
            std::env::var("E2E_API_URL").unwrap_or_else(|_| "http://localhost:3000/api/v1".into());
        let user_email = std::env::var("E2E_USER_EMAIL").unwrap_or_else(|_| "test@e2e.test".into());
        let user_password =
            std::env::var("E2E_USER_PASSWORD").unwrap_or_else(|_| "password123".into());

        let timeout_ms: u64 = std::env::var("E2E_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("E2E_TIMEOUT_MS must be a valid u64");

        Self {
            base_url: trim_trailing_slash(base_url),
            api_url: trim_trailing_slash(api_url),
            user_email,
            user_password,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute frontend URL for an app path such as `/login`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
