//! Stateful logic behind the filter template panel.
//!
//! [`FilterTemplateManager`] owns the list of user templates, the editor
//! modal state and the panel's expanded toggle. Every mutation writes the
//! full user list to storage first and only then replaces the in-memory
//! list, so a failed write leaves both untouched.

use chrono::Utc;
use serde_json::Value;

use super::model::{
    FilterTemplate, TemplateDraft, MAX_TEMPLATE_NAME_LEN, USER_TEMPLATE_ID_PREFIX,
};
use super::presets::{find_preset, preset_templates};
use super::storage::{StorageError, TemplateStorage, TEMPLATES_STORAGE_KEY};
use crate::types::Timestamp;

/// Blocking user interaction used by save and delete.
pub trait UserPrompt {
    /// Show a message and wait for acknowledgement.
    fn alert(&self, message: &str);
    /// Ask a yes/no question; `true` means the user accepted.
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Preset template '{0}' cannot be modified")]
    PresetImmutable(String),

    #[error("Template name must not be empty")]
    EmptyName,

    #[error("Template name too long: {0} chars (max {MAX_TEMPLATE_NAME_LEN})")]
    NameTooLong(usize),

    #[error("No template editor is open")]
    EditorClosed,

    #[error("Failed to serialize templates: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Whether the editor is creating a template or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

/// State of the open editor modal.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEditor {
    pub mode: EditorMode,
    pub draft: TemplateDraft,
}

pub struct FilterTemplateManager<S> {
    storage: S,
    user_templates: Vec<FilterTemplate>,
    editor: Option<TemplateEditor>,
    expanded: bool,
}

impl<S: TemplateStorage> FilterTemplateManager<S> {
    /// Create a manager and load previously saved templates.
    ///
    /// Unreadable or malformed stored data is logged and treated as an
    /// empty list.
    pub fn load(storage: S) -> Self {
        let user_templates = read_templates(&storage);
        Self {
            storage,
            user_templates,
            editor: None,
            expanded: false,
        }
    }

    /// Presets followed by user templates, in display order.
    pub fn templates(&self) -> Vec<FilterTemplate> {
        let mut all = preset_templates();
        all.extend(self.user_templates.iter().cloned());
        all
    }

    /// The user's own templates ("My Templates").
    pub fn user_templates(&self) -> &[FilterTemplate] {
        &self.user_templates
    }

    /// Find a preset or user template by id.
    pub fn find(&self, id: &str) -> Option<FilterTemplate> {
        if let Some(preset) = find_preset(id) {
            return Some(preset.to_template());
        }
        self.user_templates.iter().find(|t| t.id == id).cloned()
    }

    /// Hand a template's filters to `on_apply`.
    ///
    /// The filters are passed through as stored; their shape is the
    /// caller's concern.
    pub fn apply<F>(&self, id: &str, on_apply: F) -> Result<(), TemplateError>
    where
        F: FnOnce(&Value),
    {
        let template = self
            .find(id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
        tracing::debug!(template_id = %template.id, "Applying filter template");
        on_apply(&template.filters);
        Ok(())
    }

    /* ----------------------------------------------------------------------
    Panel and editor state
    ---------------------------------------------------------------------- */

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the panel's expanded state, returning the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn editor(&self) -> Option<&TemplateEditor> {
        self.editor.as_ref()
    }

    /// Mutable access to the open editor's draft.
    pub fn draft_mut(&mut self) -> Option<&mut TemplateDraft> {
        self.editor.as_mut().map(|e| &mut e.draft)
    }

    /// Open the editor to save `current_filters` as a new template.
    pub fn open_new(&mut self, current_filters: Value) {
        self.editor = Some(TemplateEditor {
            mode: EditorMode::Create,
            draft: TemplateDraft::from_filters(current_filters),
        });
    }

    /// Open the editor on an existing user template.
    pub fn open_edit(&mut self, id: &str) -> Result<(), TemplateError> {
        let template = self.user_template(id)?;
        self.editor = Some(TemplateEditor {
            mode: EditorMode::Edit { id: id.to_string() },
            draft: TemplateDraft::from(template),
        });
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Save the open editor's draft and close the editor on success.
    ///
    /// On failure the editor stays open with its draft intact.
    pub fn save_editor(
        &mut self,
        prompt: &dyn UserPrompt,
    ) -> Result<FilterTemplate, TemplateError> {
        let editor = self.editor.clone().ok_or(TemplateError::EditorClosed)?;
        let editing = match &editor.mode {
            EditorMode::Create => None,
            EditorMode::Edit { id } => Some(id.as_str()),
        };
        let saved = self.save(editing, editor.draft, prompt)?;
        self.editor = None;
        Ok(saved)
    }

    /* ----------------------------------------------------------------------
    Mutations
    ---------------------------------------------------------------------- */

    /// Create a template (`editing = None`) or update an existing one.
    ///
    /// A blank name raises an alert and changes nothing. Editing keeps the
    /// original id and `created_at`.
    pub fn save(
        &mut self,
        editing: Option<&str>,
        draft: TemplateDraft,
        prompt: &dyn UserPrompt,
    ) -> Result<FilterTemplate, TemplateError> {
        let name = draft.name.trim();
        if name.is_empty() {
            prompt.alert("Please enter a template name");
            return Err(TemplateError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_TEMPLATE_NAME_LEN {
            prompt.alert(&format!(
                "Template name must be at most {MAX_TEMPLATE_NAME_LEN} characters"
            ));
            return Err(TemplateError::NameTooLong(len));
        }

        let now = Utc::now();
        let mut updated = self.user_templates.clone();

        let saved = match editing {
            Some(id) => {
                let existing = self.user_template(id)?;
                let template = FilterTemplate {
                    id: existing.id.clone(),
                    name: name.to_string(),
                    description: draft.normalized_description(),
                    filters: draft.filters,
                    created_at: existing.created_at,
                    updated_at: now,
                    is_global: false,
                };
                if let Some(slot) = updated.iter_mut().find(|t| t.id == id) {
                    *slot = template.clone();
                }
                template
            }
            None => {
                let template = FilterTemplate {
                    id: self.next_template_id(now),
                    name: name.to_string(),
                    description: draft.normalized_description(),
                    filters: draft.filters,
                    created_at: now,
                    updated_at: now,
                    is_global: false,
                };
                updated.push(template.clone());
                template
            }
        };

        self.commit(updated)?;

        tracing::info!(
            template_id = %saved.id,
            template_name = %saved.name,
            edited = editing.is_some(),
            "Filter template saved"
        );

        Ok(saved)
    }

    /// Delete a user template after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines.
    pub fn delete(&mut self, id: &str, prompt: &dyn UserPrompt) -> Result<bool, TemplateError> {
        self.user_template(id)?;

        if !prompt.confirm("Are you sure you want to delete this template?") {
            return Ok(false);
        }

        let updated: Vec<_> = self
            .user_templates
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        self.commit(updated)?;

        tracing::info!(template_id = %id, "Filter template deleted");
        Ok(true)
    }

    /* ----------------------------------------------------------------------
    Helpers
    ---------------------------------------------------------------------- */

    fn user_template(&self, id: &str) -> Result<&FilterTemplate, TemplateError> {
        if find_preset(id).is_some() {
            return Err(TemplateError::PresetImmutable(id.to_string()));
        }
        self.user_templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// Persist `templates`, then make them the in-memory list.
    fn commit(&mut self, templates: Vec<FilterTemplate>) -> Result<(), TemplateError> {
        let json = serde_json::to_string(&templates)?;
        self.storage.set(TEMPLATES_STORAGE_KEY, &json)?;
        self.user_templates = templates;
        Ok(())
    }

    /// `template-<unix millis>`, bumped past any id already in use.
    fn next_template_id(&self, now: Timestamp) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = format!("{USER_TEMPLATE_ID_PREFIX}{millis}");
            if !self.user_templates.iter().any(|t| t.id == id) {
                return id;
            }
            millis += 1;
        }
    }
}

fn read_templates<S: TemplateStorage>(storage: &S) -> Vec<FilterTemplate> {
    let raw = match storage.get(TEMPLATES_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read saved filter templates");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<FilterTemplate>>(&raw) {
        Ok(templates) => templates.into_iter().filter(|t| !t.is_global).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse saved filter templates");
            Vec::new()
        }
    }
}
