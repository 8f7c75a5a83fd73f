//! Headless template-string editor with variable chips.
//!
//! [`TemplateEditor`] keeps a document whose `<%= name %>` or `{{name}}`
//! references are presented as atomic chips, validated against optional
//! [`KnownVariables`](chipline_decoration::KnownVariables). Typing the trigger
//! character opens a [`TriggerMenu`] listing the known variables; choosing one
//! replaces the trigger with a token.
//!
//! Hosts draw the document from [`TemplateEditor::segments`] and the menu from
//! [`TemplateEditor::menu`]; nothing here renders pixels.

/// Editor configuration loaded from TOML.
pub mod config;
/// The editor and its render segments.
pub mod editor;
/// Configuration errors.
pub mod error;
/// Trigger-character suggestion menu.
pub mod menu;

pub use config::{DEFAULT_TRIGGER, EditorConfig};
pub use editor::{ChangeHook, EditorProps, Segment, TemplateEditor};
pub use error::{ConfigError, Result};
pub use menu::{MenuAnchor, Suggestion, TriggerMenu};
