use std::sync::Arc;

use chipline_primitives::{CharIdx, Direction, Range, Selection};

use crate::chip::Chip;
use crate::classify::{KnownVariables, Validity};
use crate::matcher::VariableMatch;
use crate::span::Span;


/// One atomic replacement range.
///
/// Equality is by value: span, label and kind. The chip sits behind an
/// [`Arc`] so that an unchanged chip can be carried over between recompute
/// passes and a renderer can recognize it by pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	span: Span,
	chip: Arc<Chip>,
}

impl Decoration {
	/// Creates a decoration covering `span`.
	pub fn new(span: Span, chip: Arc<Chip>) -> Self {
		Self { span, chip }
	}

	/// Delimiter-inclusive extent in the document.
	pub fn span(&self) -> Span {
		self.span
	}

	/// The chip drawn in place of the span.
	pub fn chip(&self) -> &Arc<Chip> {
		&self.chip
	}

	/// Trimmed identifier shown on the chip.
	pub fn identifier(&self) -> &str {
		self.chip.label()
	}

	/// Whether the identifier names a known variable.
	pub fn validity(&self) -> Validity {
		self.chip.kind().validity()
	}

	/// Returns the same chip at a different span.
	pub(crate) fn moved(&self, span: Span) -> Self {
		Self {
			span,
			chip: Arc::clone(&self.chip),
		}
	}
}

/// Edge preference when resolving a position that falls inside a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
	/// Snap to the chip's start.
	Before,
	/// Snap to the chip's end.
	After,
	/// Snap to the closer edge; ties go to the end.
	Nearest,
}

/// Ordered, non-overlapping, atomic decorations.
///
/// Decorations are sorted by span start. Cursor and selection endpoints never
/// rest strictly inside a decorated span; see [`DecorationSet::snap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
	decorations: Vec<Decoration>,
}

impl DecorationSet {
	/// An empty set.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Builds a set from matches, which must arrive in ascending order.
	pub fn build(matches: impl IntoIterator<Item = VariableMatch>, variables: Option<&KnownVariables>) -> Self {
		Self::build_reusing(matches, variables, &[])
	}

	/// Builds a set, reusing the chip of any `prior` decoration equal to a new one.
	///
	/// `prior` must be sorted by span start.
	pub fn build_reusing(
		matches: impl IntoIterator<Item = VariableMatch>,
		variables: Option<&KnownVariables>,
		prior: &[Decoration],
	) -> Self {
		let decorations = matches.into_iter().map(|m| decorate(m, variables, prior)).collect();
		Self::from_sorted(decorations)
	}

	/// Wraps decorations that are already sorted and disjoint.
	pub(crate) fn from_sorted(decorations: Vec<Decoration>) -> Self {
		debug_assert!(
			decorations.windows(2).all(|w| w[0].span.end <= w[1].span.start),
			"decorations must be sorted and non-overlapping"
		);
		Self { decorations }
	}

	/// Consumes the set, returning its decorations in order.
	pub(crate) fn into_vec(self) -> Vec<Decoration> {
		self.decorations
	}

	/// Number of decorations.
	pub fn len(&self) -> usize {
		self.decorations.len()
	}

	/// Returns true if nothing is decorated.
	pub fn is_empty(&self) -> bool {
		self.decorations.is_empty()
	}

	/// Returns the decoration at `index` in document order.
	pub fn get(&self, index: usize) -> Option<&Decoration> {
		self.decorations.get(index)
	}

	/// Iterates decorations in document order.
	pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
		self.decorations.iter()
	}

	/// All decorations as a slice, in document order.
	pub fn as_slice(&self) -> &[Decoration] {
		&self.decorations
	}

	/// Returns the decoration whose span strictly contains `pos`.
	pub fn at(&self, pos: CharIdx) -> Option<&Decoration> {
		let idx = self.decorations.partition_point(|d| d.span.end <= pos);
		self.decorations.get(idx).filter(|d| d.span.strictly_contains(pos))
	}

	/// Returns the decoration starting exactly at `pos`.
	pub fn starting_at(&self, pos: CharIdx) -> Option<&Decoration> {
		let idx = self.decorations.partition_point(|d| d.span.start < pos);
		self.decorations.get(idx).filter(|d| d.span.start == pos)
	}

	/// Returns the decoration ending exactly at `pos`.
	pub fn ending_at(&self, pos: CharIdx) -> Option<&Decoration> {
		let idx = self.decorations.partition_point(|d| d.span.end < pos);
		self.decorations.get(idx).filter(|d| d.span.end == pos)
	}

	/// Returns the decorations sharing at least one char with `span`.
	pub fn overlapping(&self, span: Span) -> &[Decoration] {
		let lo = self.decorations.partition_point(|d| d.span.end <= span.start);
		let hi = self.decorations.partition_point(|d| d.span.start < span.end);
		&self.decorations[lo..hi.max(lo)]
	}

	/// Resolves `pos` to a position outside every chip.
	///
	/// Positions on an edge or outside all spans are returned unchanged.
	pub fn snap(&self, pos: CharIdx, assoc: Assoc) -> CharIdx {
		let Some(deco) = self.at(pos) else {
			return pos;
		};
		let Span { start, end } = deco.span;
		match assoc {
			Assoc::Before => start,
			Assoc::After => end,
			Assoc::Nearest if pos - start < end - pos => start,
			Assoc::Nearest => end,
		}
	}

	/// Snaps every range of `selection` out of chips.
	///
	/// Cursors snap with `cursor_assoc`. Non-empty ranges grow outward so they
	/// cover any chip they partially include.
	pub fn snap_selection(&self, selection: &Selection, cursor_assoc: Assoc) -> Selection {
		selection.transform(|r| {
			if r.is_empty() {
				return Range::point(self.snap(r.head, cursor_assoc));
			}
			let from = self.snap(r.from(), Assoc::Before);
			let to = self.snap(r.to(), Assoc::After);
			match r.direction() {
				Direction::Forward => Range::new(from, to),
				Direction::Backward => Range::new(to, from),
			}
		})
	}
}

impl<'a> IntoIterator for &'a DecorationSet {
	type Item = &'a Decoration;
	type IntoIter = std::slice::Iter<'a, Decoration>;

	fn into_iter(self) -> Self::IntoIter {
		self.decorations.iter()
	}
}

/// Turns a match into a decoration, reusing an equal chip from `prior`.
pub(crate) fn decorate(m: VariableMatch, variables: Option<&KnownVariables>, prior: &[Decoration]) -> Decoration {
	let chip = Chip::for_identifier(&m.identifier, variables);
	let idx = prior.partition_point(|d| d.span.start < m.span.start);
	let chip = match prior.get(idx) {
		Some(old) if old.span == m.span && *old.chip == chip => Arc::clone(&old.chip),
		_ => Arc::new(chip),
	};
	Decoration::new(m.span, chip)
}
