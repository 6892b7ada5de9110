//! Built-in filter presets.
//!
//! Presets are a fixed table: they are never persisted, cannot be edited
//! or deleted, and are always listed ahead of user templates.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::model::FilterTemplate;

/// A built-in filter shortcut.
#[derive(Debug, Clone, Copy)]
pub struct PresetTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    filters: fn() -> Value,
}

impl PresetTemplate {
    /// The preset's filter criteria.
    pub fn filters(&self) -> Value {
        (self.filters)()
    }

    /// Materialize the preset as a [`FilterTemplate`].
    ///
    /// Presets carry the Unix epoch as both timestamps.
    pub fn to_template(&self) -> FilterTemplate {
        FilterTemplate {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            filters: self.filters(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            is_global: true,
        }
    }
}

fn today() -> Value {
    json!({ "dateRange": "today" })
}

fn this_week() -> Value {
    json!({ "dateRange": "this_week" })
}

fn last_7_days() -> Value {
    json!({ "dateRange": "last_7_days" })
}

fn last_30_days() -> Value {
    json!({ "dateRange": "last_30_days" })
}

fn overdue() -> Value {
    json!({ "status": ["open", "in_progress"], "dateRange": "overdue" })
}

fn high_priority() -> Value {
    json!({ "priority": ["high", "critical"] })
}

/// All presets, in display order.
pub const PRESET_TEMPLATES: [PresetTemplate; 6] = [
    PresetTemplate {
        id: "preset-today",
        name: "Today",
        description: "Items from today",
        filters: today,
    },
    PresetTemplate {
        id: "preset-this-week",
        name: "This Week",
        description: "Items from the current week",
        filters: this_week,
    },
    PresetTemplate {
        id: "preset-last-7-days",
        name: "Last 7 Days",
        description: "Items from the last 7 days",
        filters: last_7_days,
    },
    PresetTemplate {
        id: "preset-last-30-days",
        name: "Last 30 Days",
        description: "Items from the last 30 days",
        filters: last_30_days,
    },
    PresetTemplate {
        id: "preset-overdue",
        name: "Overdue",
        description: "Open or in-progress items past their due date",
        filters: overdue,
    },
    PresetTemplate {
        id: "preset-high-priority",
        name: "High Priority",
        description: "High and critical priority items",
        filters: high_priority,
    },
];

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static PresetTemplate> {
    PRESET_TEMPLATES.iter().find(|p| p.id == id)
}

/// Whether `id` names a preset.
pub fn is_preset(id: &str) -> bool {
    find_preset(id).is_some()
}

/// All presets as [`FilterTemplate`] records.
pub fn preset_templates() -> Vec<FilterTemplate> {
    PRESET_TEMPLATES.iter().map(PresetTemplate::to_template).collect()
}
