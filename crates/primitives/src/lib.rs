//! Core types for text editing: ranges, selections and change sets.
//!
//! Every position in this crate is a character index into a [`Rope`], never a
//! byte offset.

/// Edit errors for explicit range operations.
pub mod edit;
/// Grapheme cluster boundary detection.
pub mod graphemes;
/// Text range types and char index aliases.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;
/// Selection types for single and multi-cursor editing.
pub mod selection;
/// Change sets and transactions.
pub mod transaction;

pub use edit::EditError;
pub use range::{CharIdx, CharLen, Direction, Range};
pub use rope::{line_char_range, line_col};
pub use ropey::{Rope, RopeSlice};
pub use selection::Selection;
pub use transaction::{Bias, Change, ChangeSet, ChangedRange, Transaction};
