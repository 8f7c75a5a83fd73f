//! Inserting variable tokens at the cursor.

use chipline_primitives::{CharIdx, Change, RopeSlice, Selection, Transaction};

use crate::mode::Mode;

/// A ready-to-apply token insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInsertion {
	/// The edit, carrying a collapsed selection right after the token.
	pub transaction: Transaction,
	/// Cursor position once the transaction is applied.
	pub cursor: CharIdx,
	/// The inserted token text.
	pub token: String,
}

impl VariableInsertion {
	/// Selection installed by the transaction.
	pub fn selection(&self) -> Selection {
		Selection::point(self.cursor)
	}
}

/// Builds the transaction that inserts `identifier` as a token at `cursor`.
///
/// With `replace_preceding_char` the char just before the cursor (the menu
/// trigger) is replaced; at the start of the document nothing is replaced.
/// The identifier is not validated.
pub fn insert_variable(
	doc: RopeSlice<'_>,
	cursor: CharIdx,
	mode: Mode,
	identifier: &str,
	replace_preceding_char: bool,
) -> VariableInsertion {
	let cursor = cursor.min(doc.len_chars());
	let from = if replace_preceding_char && cursor > 0 {
		cursor - 1
	} else {
		cursor
	};
	let token = mode.token_text(identifier);
	let end = from + token.chars().count();
	let transaction =
		Transaction::change(doc, [Change::replace(from, cursor, token.as_str())]).with_selection(Selection::point(end));

	VariableInsertion {
		transaction,
		cursor: end,
		token,
	}
}
