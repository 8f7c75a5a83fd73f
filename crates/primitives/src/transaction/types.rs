use crate::range::{CharIdx, CharLen};

/// Represents a single text change operation.
///
/// A change describes replacing the text range `[start, end)` with the optional
/// `replacement` text. If `replacement` is [`None`], this represents a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text, or [`None`] for deletion.
	pub replacement: Option<String>,
}

impl Change {
	/// Inserts `text` at `pos` without removing anything.
	pub fn insert(pos: CharIdx, text: impl Into<String>) -> Self {
		Self {
			start: pos,
			end: pos,
			replacement: Some(text.into()),
		}
	}

	/// Replaces `[start, end)` with `text`.
	pub fn replace(start: CharIdx, end: CharIdx, text: impl Into<String>) -> Self {
		Self {
			start,
			end,
			replacement: Some(text.into()),
		}
	}

	/// Removes `[start, end)`.
	pub fn delete(start: CharIdx, end: CharIdx) -> Self {
		Self {
			start,
			end,
			replacement: None,
		}
	}
}

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A text insertion with cached character length.
///
/// Fields are private to enforce the invariant that `char_len` always equals
/// `text.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
	pub(super) text: String,
	pub(super) char_len: CharLen,
}

impl Insertion {
	/// Creates a new insertion, computing the character length once.
	#[inline]
	pub fn new(text: String) -> Self {
		let char_len = text.chars().count();
		Self { text, char_len }
	}

	/// Returns the inserted text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the cached character length.
	#[inline]
	pub fn char_len(&self) -> CharLen {
		self.char_len
	}
}

/// A single operation in a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Retain the next N characters from the source document.
	Retain(CharLen),
	/// Delete the next N characters from the source document.
	Delete(CharLen),
	/// Insert new text at the current position.
	Insert(Insertion),
}

/// A contiguous region touched by a changeset, in both coordinate spaces.
///
/// `[from_old, to_old)` is the replaced extent in the source document and
/// `[from_new, to_new)` the text that took its place in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedRange {
	/// Start in the source document.
	pub from_old: CharIdx,
	/// End in the source document (exclusive).
	pub to_old: CharIdx,
	/// Start in the resulting document.
	pub from_new: CharIdx,
	/// End in the resulting document (exclusive).
	pub to_new: CharIdx,
}
