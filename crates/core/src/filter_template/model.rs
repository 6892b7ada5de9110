//! Filter template record and editor draft.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Timestamp;

/// Prefix for ids of user-defined templates (`template-<unix millis>`).
pub const USER_TEMPLATE_ID_PREFIX: &str = "template-";

/// Maximum length for a template name.
pub const MAX_TEMPLATE_NAME_LEN: usize = 200;

/// A named, reusable set of filter criteria.
///
/// `filters` is opaque to this crate: it is handed back to the caller
/// unchanged when the template is applied. Field names are camelCase so
/// the stored JSON matches what the browser client reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filters: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// `true` for built-in presets, `false` for user templates.
    #[serde(default)]
    pub is_global: bool,
}

/// Editable fields of a template, as held by the editor modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub filters: Value,
}

impl TemplateDraft {
    /// Blank draft carrying the caller's current filters.
    pub fn from_filters(filters: Value) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            filters,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Trimmed description, or `None` when blank.
    pub fn normalized_description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl From<&FilterTemplate> for TemplateDraft {
    fn from(template: &FilterTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone().unwrap_or_default(),
            filters: template.filters.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let now = Utc::now();
        let template = FilterTemplate {
            id: "template-1".to_string(),
            name: "Mine".to_string(),
            description: None,
            filters: json!({ "status": ["open"] }),
            created_at: now,
            updated_at: now,
            is_global: false,
        };

        let value = serde_json::to_value(&template).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["isGlobal"], false);
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_missing_is_global_defaults_to_false() {
        let raw = r#"{
            "id": "template-1700000000000",
            "name": "Open items",
            "filters": {"status": ["open"]},
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let template: FilterTemplate = serde_json::from_str(raw).unwrap();
        assert!(!template.is_global);
        assert_eq!(template.description, None);
    }

    #[test]
    fn test_blank_description_normalizes_to_none() {
        let mut draft = TemplateDraft::from_filters(json!({}));
        draft.description = "   ".to_string();
        assert_eq!(draft.normalized_description(), None);

        draft.description = " weekly review ".to_string();
        assert_eq!(draft.normalized_description().as_deref(), Some("weekly review"));
    }
}
