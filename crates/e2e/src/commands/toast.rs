//! Toast notification assertions.

use std::fmt;

use crate::commands::test_id;
use crate::config::E2eConfig;
use crate::driver::BrowserDriver;
use crate::error::E2eResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector of the toast container for a kind, e.g. `[data-testid="toast-error"]`.
pub fn toast_selector(kind: ToastKind) -> String {
    test_id(&format!("toast-{kind}"))
}

/// Wait for a toast of `kind` showing `message`.
pub async fn expect_toast(
    driver: &dyn BrowserDriver,
    config: &E2eConfig,
    kind: ToastKind,
    message: &str,
) -> E2eResult<()> {
    driver
        .wait_for_text(&toast_selector(kind), message, config.timeout())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_selector_per_kind() {
        assert_eq!(
            toast_selector(ToastKind::Error),
            "[data-testid=\"toast-error\"]"
        );
        assert_eq!(
            toast_selector(ToastKind::Success),
            "[data-testid=\"toast-success\"]"
        );
    }
}
