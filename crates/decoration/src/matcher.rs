//! Variable-reference matching.
//!
//! Matching runs one line at a time, left to right, without overlap. A
//! reference never spans a line break. Each call builds a fresh iterator over
//! the immutable compiled patterns, so there is no scan position shared
//! between calls.

use std::borrow::Cow;

use chipline_primitives::{CharIdx, RopeSlice};

use crate::mode::Mode;
use crate::span::Span;

/// One variable reference found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMatch {
	/// Delimiter-inclusive extent of the match.
	pub span: Span,
	/// Inner text with surrounding whitespace trimmed.
	pub identifier: String,
}

/// Finds every variable reference in `text`.
pub fn find_matches(mode: Mode, text: RopeSlice<'_>) -> impl Iterator<Item = VariableMatch> + '_ {
	find_matches_in(mode, text, 0, usize::MAX)
}

/// Finds variable references on the lines `[from_line, to_line)` of `text`.
///
/// Spans are reported in coordinates of the whole `text`. Line indices past
/// the end are clamped.
pub fn find_matches_in(
	mode: Mode,
	text: RopeSlice<'_>,
	from_line: usize,
	to_line: usize,
) -> impl Iterator<Item = VariableMatch> + '_ {
	let from_line = from_line.min(text.len_lines());
	let to_line = to_line.clamp(from_line, text.len_lines());
	let mut line_start = text.line_to_char(from_line);

	text.lines_at(from_line).take(to_line - from_line).flat_map(move |line| {
		let base = line_start;
		line_start += line.len_chars();
		match_line(mode, line.into(), base)
	})
}

/// Runs the pattern over one line whose first char sits at `base`.
fn match_line(mode: Mode, line: Cow<'_, str>, base: CharIdx) -> Vec<VariableMatch> {
	let mut consumed_bytes = 0;
	let mut consumed_chars = 0;
	let mut to_char = |byte: usize| {
		consumed_chars += line[consumed_bytes..byte].chars().count();
		consumed_bytes = byte;
		base + consumed_chars
	};

	let mut matches = Vec::new();
	for caps in mode.pattern().captures_iter(&line) {
		let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
			continue;
		};
		let start = to_char(whole.start());
		let end = to_char(whole.end());
		matches.push(VariableMatch {
			span: Span::new(start, end),
			identifier: inner.as_str().trim().to_string(),
		});
	}
	matches
}
