use std::borrow::Cow;

use chipline_decoration::{ChipTheme, ChipView, DecorationSet, Span, render_chip};
use chipline_primitives::RopeSlice;

/// A render-ready piece of the visible document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Plain text drawn as-is.
	Text {
		/// Extent in the document.
		span: Span,
		/// The text, borrowed from the rope when contiguous.
		text: Cow<'a, str>,
	},
	/// A chip drawn in place of its token.
	Chip {
		/// Extent of the replaced token.
		span: Span,
		/// How to draw the chip.
		view: ChipView<'a>,
	},
}

impl Segment<'_> {
	/// Document extent of the segment.
	pub fn span(&self) -> Span {
		match self {
			Segment::Text { span, .. } | Segment::Chip { span, .. } => *span,
		}
	}
}

/// Splits `visible` into alternating text runs and chips.
pub(super) fn segments<'a>(
	doc: RopeSlice<'a>,
	visible: Span,
	decorations: &'a DecorationSet,
	theme: &'a ChipTheme,
) -> Vec<Segment<'a>> {
	let mut out = Vec::new();
	let mut pos = visible.start;
	let push_text = |out: &mut Vec<Segment<'a>>, from: usize, to: usize| {
		if from < to {
			out.push(Segment::Text {
				span: Span::new(from, to),
				text: doc.slice(from..to).into(),
			});
		}
	};

	for deco in decorations.overlapping(visible) {
		let span = deco.span();
		push_text(&mut out, pos, span.start);
		out.push(Segment::Chip {
			span,
			view: render_chip(deco.chip(), theme),
		});
		pos = span.end;
	}
	push_text(&mut out, pos, visible.end);
	out
}
