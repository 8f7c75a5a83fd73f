use super::types::{Bias, ChangedRange, Insertion, Operation};
use crate::range::{CharIdx, CharLen};
use crate::Rope;

/// A sequence of retain, delete and insert operations describing an edit.
///
/// The representation follows operational transformation: walking the
/// operations in order consumes the source document exactly once, which
/// makes inversion and position mapping straightforward.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	/// Sequence of retain/delete/insert operations.
	pub(super) changes: Vec<Operation>,
	/// Length of the source document before changes.
	pub(super) len: usize,
	/// Length of the document after applying changes.
	pub(super) len_after: usize,
}

impl ChangeSet {
	/// Creates a new empty changeset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> usize {
		self.len_after
	}

	/// Returns true if applying this changeset leaves the document untouched.
	pub fn is_empty(&self) -> bool {
		self.changes.iter().all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn changes(&self) -> &[Operation] {
		&self.changes
	}

	/// Adds a retain operation, preserving N characters from the source.
	///
	/// Consecutive retain operations are merged.
	pub(crate) fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Retain(n));
		}
	}

	/// Adds a delete operation, removing N characters from the source.
	///
	/// Consecutive delete operations are merged.
	pub(crate) fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Delete(n));
		}
	}

	/// Adds an insert operation at the current position.
	///
	/// Inserts are kept ahead of an adjacent delete so that every replacement
	/// reads as `Insert, Delete`.
	pub(crate) fn insert(&mut self, text: String) {
		if text.is_empty() {
			return;
		}

		let ins = Insertion::new(text);
		self.len_after += ins.char_len;

		match self.changes.as_mut_slice() {
			[.., Operation::Insert(prev)] | [.., Operation::Insert(prev), Operation::Delete(_)] => {
				prev.text.push_str(&ins.text);
				prev.char_len += ins.char_len;
			}
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert(ins));
				self.changes.push(del);
			}
			_ => {
				self.changes.push(Operation::Insert(ins));
			}
		}
	}

	/// Applies this changeset to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		debug_assert_eq!(doc.len_chars(), self.len, "changeset built for a different document");

		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					pos += n;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert(ins) => {
					doc.insert(pos, &ins.text);
					pos += ins.char_len;
				}
			}
		}
	}

	/// Maps a position through this changeset using the specified bias.
	///
	/// Positions inside a deleted region collapse to the end of whatever was
	/// inserted in its place.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			if old_pos > pos {
				break;
			}

			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(ins) => {
					if old_pos == pos && bias == Bias::Left {
						// stays before the insertion
					} else {
						new_pos += ins.char_len;
					}
				}
			}
		}

		new_pos + (pos - old_pos)
	}

	/// Iterates the contiguous regions this changeset replaces, in document order.
	///
	/// Adjacent insert and delete operations fold into a single region. Pure
	/// retains produce nothing.
	pub fn changed_ranges(&self) -> impl Iterator<Item = ChangedRange> + '_ {
		let mut old_pos = 0;
		let mut new_pos = 0;
		let mut ops = self.changes.iter().peekable();

		std::iter::from_fn(move || {
			loop {
				match ops.next()? {
					Operation::Retain(n) => {
						old_pos += n;
						new_pos += n;
					}
					first => {
						let mut region = ChangedRange {
							from_old: old_pos,
							to_old: old_pos,
							from_new: new_pos,
							to_new: new_pos,
						};
						let mut op = Some(first);
						while let Some(current) = op {
							match current {
								Operation::Delete(n) => region.to_old += n,
								Operation::Insert(ins) => region.to_new += ins.char_len,
								Operation::Retain(_) => unreachable!("retain ends a region"),
							}
							op = ops.next_if(|next| !matches!(next, Operation::Retain(_)));
						}
						old_pos = region.to_old;
						new_pos = region.to_new;
						return Some(region);
					}
				}
			}
		})
	}
}
