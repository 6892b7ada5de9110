//! Saved and preset filter sets for dashboards and reports.
//!
//! - [`model`] -- the [`FilterTemplate`] record and editor draft.
//! - [`presets`] -- the built-in, never-persisted preset table.
//! - [`storage`] -- the key-value [`TemplateStorage`] seam and its implementations.
//! - [`manager`] -- [`FilterTemplateManager`], the stateful panel logic.

pub mod manager;
pub mod model;
pub mod presets;
pub mod storage;

pub use manager::{EditorMode, FilterTemplateManager, TemplateEditor, TemplateError, UserPrompt};
pub use model::{FilterTemplate, TemplateDraft};
pub use presets::{preset_templates, PresetTemplate, PRESET_TEMPLATES};
pub use storage::{
    FileStorage, MemoryStorage, StorageError, TemplateStorage, TEMPLATES_STORAGE_KEY,
};
