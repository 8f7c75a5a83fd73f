//! Change sets and transactions.
//!
//! A [`Transaction`] couples a [`ChangeSet`] with an optional selection to
//! install once the changes are applied. Without an explicit selection, the
//! previous selection is mapped through the changes.

mod changeset;
mod types;


pub use changeset::ChangeSet;
pub use types::{Bias, Change, ChangedRange, Insertion, Operation};

use crate::range::Range;
use crate::selection::Selection;
use crate::{Rope, RopeSlice};

/// A document edit plus the selection that should follow it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
	changes: ChangeSet,
	selection: Option<Selection>,
}

impl Transaction {
	/// Builds a transaction from sorted, non-overlapping changes.
	///
	/// Changes whose bounds exceed the document are clamped to it.
	pub fn change(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Self {
		let len = doc.len_chars();
		let mut cs = ChangeSet::new();
		let mut last = 0;

		for change in changes {
			let start = change.start.clamp(last, len);
			let end = change.end.clamp(start, len);
			cs.retain(start - last);
			cs.delete(end - start);
			if let Some(text) = change.replacement {
				cs.insert(text);
			}
			last = end;
		}
		cs.retain(len - last);

		Self {
			changes: cs,
			selection: None,
		}
	}

	/// Replaces every selected range with `text`.
	pub fn insert(doc: RopeSlice, selection: &Selection, text: String) -> Self {
		Self::change(
			doc,
			selection.iter().map(|r| Change::replace(r.from(), r.to(), text.clone())),
		)
	}

	/// Sets the selection installed after this transaction applies.
	pub fn with_selection(mut self, selection: Selection) -> Self {
		self.selection = Some(selection);
		self
	}

	/// Returns the underlying change set.
	pub fn changes(&self) -> &ChangeSet {
		&self.changes
	}

	/// Returns the explicit selection, if one was set.
	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// Applies the changes to `doc`.
	pub fn apply(&self, doc: &mut Rope) {
		self.changes.apply(doc);
	}

	/// Maps a selection from the old document into the new one.
	///
	/// Cursors at an insertion point move past the inserted text.
	pub fn map_selection(&self, selection: &Selection) -> Selection {
		selection.transform(|r: &Range| r.map(|pos| self.changes.map_pos(pos, Bias::Right)))
	}

	/// Resolves the selection to install after applying: the explicit one if
	/// set, otherwise `previous` mapped through the changes.
	pub fn resolve_selection(&self, previous: &Selection) -> Selection {
		match &self.selection {
			Some(sel) => sel.clone(),
			None => self.map_selection(previous),
		}
	}
}
