//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::CharIdx;

/// Returns the char extent covered by the lines `[from_line, to_line)`.
///
/// Line indices past the end are clamped, so the result is always a valid
/// char range of `text`. The extent includes the trailing line break of the
/// last line, if any.
pub fn line_char_range(text: RopeSlice, from_line: usize, to_line: usize) -> std::ops::Range<CharIdx> {
	let line_count = text.len_lines();
	let from_line = from_line.min(line_count);
	let to_line = to_line.clamp(from_line, line_count);
	let start = text.line_to_char(from_line);
	let end = if to_line >= line_count { text.len_chars() } else { text.line_to_char(to_line) };
	start..end
}

/// Returns the zero-based `(line, column)` of a char position.
pub fn line_col(text: RopeSlice, pos: CharIdx) -> (usize, usize) {
	let pos = pos.min(text.len_chars());
	let line = text.char_to_line(pos);
	(line, pos - text.line_to_char(line))
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_line_char_range_middle() {
		let text = Rope::from("ab\ncd\nef");
		assert_eq!(line_char_range(text.slice(..), 1, 2), 3..6);
	}

	#[test]
	fn test_line_char_range_clamps_past_end() {
		let text = Rope::from("ab\ncd");
		assert_eq!(line_char_range(text.slice(..), 1, 40), 3..5);
		assert_eq!(line_char_range(text.slice(..), 9, 40), 5..5);
	}

	#[test]
	fn test_line_char_range_whole_document() {
		let text = Rope::from("ab\ncd\n");
		assert_eq!(line_char_range(text.slice(..), 0, usize::MAX), 0..6);
	}

	#[test]
	fn test_line_col() {
		let text = Rope::from("ab\ncd");
		assert_eq!(line_col(text.slice(..), 0), (0, 0));
		assert_eq!(line_col(text.slice(..), 4), (1, 1));
		assert_eq!(line_col(text.slice(..), 99), (1, 2));
	}
}
