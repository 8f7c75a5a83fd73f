use thiserror::Error;

use crate::range::CharIdx;

/// Errors raised when an explicit edit targets text that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// The range extends past the end of the document.
	#[error("range {start}..{end} is out of bounds for a document of {len} chars")]
	OutOfBounds {
		/// Start of the requested range.
		start: CharIdx,
		/// End of the requested range.
		end: CharIdx,
		/// Document length in chars.
		len: usize,
	},

	/// The range end lies before its start.
	#[error("range {start}..{end} is inverted")]
	InvertedRange {
		/// Start of the requested range.
		start: CharIdx,
		/// End of the requested range.
		end: CharIdx,
	},
}

impl EditError {
	/// Validates `[start, end)` against a document of `len` chars.
	pub fn check(start: CharIdx, end: CharIdx, len: usize) -> Result<(), EditError> {
		if end < start {
			return Err(EditError::InvertedRange { start, end });
		}
		if end > len {
			return Err(EditError::OutOfBounds { start, end, len });
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn check_accepts_full_document() {
		assert_eq!(EditError::check(0, 5, 5), Ok(()));
		assert_eq!(EditError::check(5, 5, 5), Ok(()));
	}

	#[test]
	fn check_rejects_bad_ranges() {
		assert_eq!(EditError::check(4, 2, 5), Err(EditError::InvertedRange { start: 4, end: 2 }));
		assert_eq!(EditError::check(2, 9, 5), Err(EditError::OutOfBounds { start: 2, end: 9, len: 5 }));
	}

	#[test]
	fn error_messages() {
		let err = EditError::OutOfBounds { start: 2, end: 9, len: 5 };
		assert_eq!(err.to_string(), "range 2..9 is out of bounds for a document of 5 chars");
	}
}
