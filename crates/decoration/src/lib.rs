//! Variable chips for template strings.
//!
//! Scans document text for variable references (`<%= name %>` in
//! [`Mode::Template`], `{{name}}` in [`Mode::Variable`]), classifies each name
//! against an optional set of [`KnownVariables`], and maintains a
//! [`DecorationSet`] of atomic replacement ranges ("chips") that follows every
//! edit and viewport change.
//!
//! The pipeline, leaf first:
//!
//! - [`matcher`]: finds matches line by line, yielding span and trimmed identifier
//! - [`classify`]: decides whether an identifier is known
//! - [`set`]: builds the ordered, non-overlapping, atomic decoration set
//! - [`update`]: keeps the set in sync, rescanning only the touched lines
//! - [`insert`]: synthesizes token text and the transaction that inserts it

/// Chip tags, styles and the render function.
pub mod chip;
/// Validity classification against known variables.
pub mod classify;
/// Insertion of variable tokens at the cursor.
pub mod insert;
/// Pattern matching over document lines.
pub mod matcher;
/// Surface syntax selection.
pub mod mode;
/// Decoration sets and atomic range resolution.
pub mod set;
/// Half-open char spans.
pub mod span;
/// Incremental decoration updates.
pub mod update;

pub use chip::{Chip, ChipKind, ChipStyle, ChipTheme, ChipView, render_chip};
pub use classify::{KnownVariables, Validity, classify};
pub use insert::{VariableInsertion, insert_variable};
pub use matcher::{VariableMatch, find_matches, find_matches_in};
pub use mode::Mode;
pub use set::{Assoc, Decoration, DecorationSet};
pub use span::Span;
pub use update::{DecorationUpdater, UpdateStrategy, ViewUpdate, Viewport};
