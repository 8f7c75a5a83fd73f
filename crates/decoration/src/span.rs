use chipline_primitives::{CharIdx, CharLen};

/// A half-open char extent `[start, end)` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
	/// First char covered.
	pub start: CharIdx,
	/// One past the last char covered.
	pub end: CharIdx,
}

impl Span {
	/// Creates a span; `start` must not exceed `end`.
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		debug_assert!(start <= end, "inverted span {start}..{end}");
		Self { start, end }
	}

	/// Number of chars covered.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.end - self.start
	}

	/// Returns true for a zero-width span.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `pos` lies strictly between the edges.
	///
	/// Positions equal to either edge are outside: a cursor may sit there.
	#[inline]
	pub fn strictly_contains(&self, pos: CharIdx) -> bool {
		self.start < pos && pos < self.end
	}

	/// Returns true if the spans share at least one char.
	#[inline]
	pub fn overlaps(&self, other: &Span) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Returns true if `[from, to]` overlaps or touches this span.
	#[inline]
	pub fn touches(&self, from: CharIdx, to: CharIdx) -> bool {
		from <= self.end && to >= self.start
	}
}

impl From<std::ops::Range<CharIdx>> for Span {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}
