//! Heuristic accessibility spot-check.
//!
//! Not a full audit: only flags images without `alt` text and buttons with
//! neither visible text nor an `aria-label`.

use std::fmt;

use serde::Serialize;

use crate::driver::{BrowserDriver, ElementInfo};
use crate::error::{E2eError, E2eResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationRule {
    ImageAlt,
    ButtonName,
}

/// One element that failed a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: ViolationRule,
    /// Best available identification of the offending element.
    pub target: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.rule {
            ViolationRule::ImageAlt => "image is missing alt text",
            ViolationRule::ButtonName => "button has no text or aria-label",
        };
        write!(f, "{}: {message}", self.target)
    }
}

/// Collect violations within `scope` (a CSS selector, or the whole page).
pub async fn audit_accessibility(
    driver: &dyn BrowserDriver,
    scope: Option<&str>,
) -> E2eResult<Vec<Violation>> {
    let scoped = |selector: &str| match scope {
        Some(scope) => format!("{scope} {selector}"),
        None => selector.to_string(),
    };

    let mut elements = driver.query_all(&scoped("img")).await?;
    elements.extend(driver.query_all(&scoped("button")).await?);

    Ok(find_violations(&elements))
}

/// Run [`audit_accessibility`] and fail if anything was flagged.
pub async fn check_accessibility(
    driver: &dyn BrowserDriver,
    scope: Option<&str>,
) -> E2eResult<()> {
    let violations = audit_accessibility(driver, scope).await?;
    if violations.is_empty() {
        return Ok(());
    }

    for violation in &violations {
        tracing::warn!(%violation, "Accessibility violation");
    }
    Err(E2eError::Accessibility(violations))
}

/// Apply the image and button rules to already-queried elements.
pub fn find_violations(elements: &[ElementInfo]) -> Vec<Violation> {
    elements
        .iter()
        .filter_map(|element| {
            let rule = match element.tag.as_str() {
                "img" if is_blank(element.attr("alt")) => ViolationRule::ImageAlt,
                "button"
                    if element.text.trim().is_empty() && is_blank(element.attr("aria-label")) =>
                {
                    ViolationRule::ButtonName
                }
                _ => return None,
            };
            Some(Violation {
                rule,
                target: describe(element),
            })
        })
        .collect()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn describe(element: &ElementInfo) -> String {
    if let Some(id) = element.attr("data-testid") {
        return format!("{}[data-testid=\"{id}\"]", element.tag);
    }
    if let Some(id) = element.attr("id") {
        return format!("{}#{id}", element.tag);
    }
    if let Some(src) = element.attr("src") {
        return format!("{}[src=\"{src}\"]", element.tag);
    }
    element.tag.clone()
}
