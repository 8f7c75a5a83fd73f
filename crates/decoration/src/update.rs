//! Keeping decorations in sync with edits and viewport moves.
//!
//! Only visible lines are decorated. A viewport change rebuilds the visible
//! lines. A document change either rebuilds them too ([`UpdateStrategy::Full`])
//! or maps the previous decorations through the edit and rescans just the
//! lines the edit touched ([`UpdateStrategy::Incremental`]). Both paths hand
//! the previous decorations to the builder so equal chips keep their identity.

use std::sync::Arc;

use chipline_primitives::{Bias, ChangeSet, RopeSlice, line_char_range};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classify::KnownVariables;
use crate::matcher::find_matches_in;
use crate::mode::Mode;
use crate::set::{Decoration, DecorationSet, decorate};
use crate::span::Span;

/// How document changes are folded into the decoration set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStrategy {
	/// Discard the previous set and rescan every visible line.
	Full,
	/// Map the previous set through the edit and rescan only touched lines.
	#[default]
	Incremental,
}

/// The visible lines `[from_line, to_line)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
	/// First visible line.
	pub from_line: usize,
	/// One past the last visible line.
	pub to_line: usize,
}

impl Viewport {
	/// Creates a viewport over `[from_line, to_line)`.
	pub fn new(from_line: usize, to_line: usize) -> Self {
		Self {
			from_line,
			to_line: to_line.max(from_line),
		}
	}
}

/// What happened since the decorations were last computed.
#[derive(Debug, Clone, Copy)]
pub struct ViewUpdate<'a> {
	/// The document before the change.
	pub prev_doc: RopeSlice<'a>,
	/// The document after the change.
	pub doc: RopeSlice<'a>,
	/// The edit that produced `doc`, if any.
	pub changes: Option<&'a ChangeSet>,
	/// Viewport the previous decorations were computed for.
	pub prev_viewport: Option<Viewport>,
	/// Viewport to decorate now; `None` means the whole document.
	pub viewport: Option<Viewport>,
}

impl ViewUpdate<'_> {
	/// Returns true if the document text changed.
	pub fn doc_changed(&self) -> bool {
		self.changes.is_some_and(|cs| !cs.is_empty())
	}

	/// Returns true if the visible region moved or resized.
	pub fn viewport_changed(&self) -> bool {
		self.prev_viewport != self.viewport
	}
}

/// Recomputes decorations for one editor.
#[derive(Debug, Clone)]
pub struct DecorationUpdater {
	mode: Mode,
	variables: Option<Arc<KnownVariables>>,
	strategy: UpdateStrategy,
}

impl DecorationUpdater {
	/// Creates an updater for the given syntax and known variables.
	pub fn new(mode: Mode, variables: Option<Arc<KnownVariables>>, strategy: UpdateStrategy) -> Self {
		Self {
			mode,
			variables,
			strategy,
		}
	}

	/// The active syntax.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// The known variables, if supplied.
	pub fn variables(&self) -> Option<&KnownVariables> {
		self.variables.as_deref()
	}

	/// The configured strategy.
	pub fn strategy(&self) -> UpdateStrategy {
		self.strategy
	}

	/// Decorates the visible lines of `doc` from scratch.
	pub fn create(&self, doc: RopeSlice<'_>, viewport: Option<Viewport>) -> DecorationSet {
		self.rebuild(doc, viewport, &[])
	}

	/// Brings `prior` up to date with `update`.
	///
	/// Returns `prior` untouched when neither the text nor the viewport changed.
	pub fn update(&self, prior: DecorationSet, update: &ViewUpdate<'_>) -> DecorationSet {
		let doc_changed = update.doc_changed();
		let viewport_changed = update.viewport_changed();
		if !doc_changed && !viewport_changed {
			return prior;
		}

		let changes = update.changes.filter(|_| doc_changed);
		match changes {
			Some(cs) if !viewport_changed && self.strategy == UpdateStrategy::Incremental => {
				self.incremental(prior, cs, update)
			}
			Some(cs) => {
				let (mapped, _) = map_through(prior, cs);
				self.rebuild(update.doc, update.viewport, &mapped)
			}
			None => self.rebuild(update.doc, update.viewport, prior.as_slice()),
		}
	}

	/// Rescans every visible line, reusing chips from `prior`.
	fn rebuild(&self, doc: RopeSlice<'_>, viewport: Option<Viewport>, prior: &[Decoration]) -> DecorationSet {
		let (from_line, to_line) = visible_lines(doc, viewport);
		let set = DecorationSet::build_reusing(
			find_matches_in(self.mode, doc, from_line, to_line),
			self.variables(),
			prior,
		);
		trace!(mode = %self.mode, from_line, to_line, chips = set.len(), "rebuilt decorations");
		set
	}

	/// Maps `prior` through `changes` and rescans only the touched lines.
	///
	/// With a viewport, visible lines that the previous pass never scanned
	/// (because the edit pulled them into view) are rescanned as well, and
	/// decorations pushed out of view are dropped.
	fn incremental(&self, prior: DecorationSet, changes: &ChangeSet, update: &ViewUpdate<'_>) -> DecorationSet {
		let doc = update.doc;
		let (mapped, dropped) = map_through(prior, changes);
		let (vis_from, vis_to) = visible_lines(doc, update.viewport);
		let visible = Span::from(line_char_range(doc, vis_from, vis_to));

		let mut touched: Vec<(usize, usize)> = changes
			.changed_ranges()
			.map(|r| (doc.char_to_line(r.from_new), doc.char_to_line(r.to_new) + 1))
			.collect();

		if update.viewport.is_some() {
			let (prev_from, prev_to) = visible_lines(update.prev_doc, update.viewport);
			let old = line_char_range(update.prev_doc, prev_from, prev_to);
			let covered_start = changes.map_pos(old.start, Bias::Left);
			let covered_end = changes.map_pos(old.end, Bias::Right);
			if visible.start < covered_start {
				touched.push((vis_from, doc.char_to_line(covered_start) + 1));
			}
			if covered_end < visible.end {
				touched.push((doc.char_to_line(covered_end), vis_to));
			}
		}

		let regions = merge_line_ranges(touched);
		let region_spans: Vec<Span> = regions.iter().map(|&(from, to)| Span::from(line_char_range(doc, from, to))).collect();

		let mut kept = Vec::with_capacity(mapped.len());
		let mut pool = Vec::new();
		for deco in mapped {
			let start = deco.span().start;
			if region_spans.iter().any(|r| r.start <= start && start < r.end) {
				pool.push(deco);
			} else if visible.start <= start && start < visible.end {
				kept.push(deco);
			}
		}

		let mut rescanned = Vec::new();
		for &(from_line, to_line) in &regions {
			let from_line = from_line.max(vis_from);
			let to_line = to_line.min(vis_to);
			if from_line >= to_line {
				continue;
			}
			rescanned.extend(
				find_matches_in(self.mode, doc, from_line, to_line).map(|m| decorate(m, self.variables(), &pool)),
			);
		}

		trace!(
			mode = %self.mode,
			kept = kept.len(),
			dropped,
			rescanned = rescanned.len(),
			regions = regions.len(),
			"incremental decoration update"
		);

		let mut decorations = kept;
		decorations.extend(rescanned);
		decorations.sort_by_key(|d| d.span().start);
		DecorationSet::from_sorted(decorations)
	}
}

/// Sorts line ranges and merges the ones that overlap or touch.
fn merge_line_ranges(mut ranges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
	ranges.sort_unstable();
	let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
	for (from, to) in ranges {
		match merged.last_mut() {
			Some(last) if from <= last.1 => last.1 = last.1.max(to),
			_ => merged.push((from, to)),
		}
	}
	merged
}

/// Maps decorations into post-edit coordinates.
///
/// Decorations that an edit overlaps or touches are dropped; the caller
/// rescans their lines. Returns the survivors in order and the drop count.
fn map_through(prior: DecorationSet, changes: &ChangeSet) -> (Vec<Decoration>, usize) {
	let regions: Vec<_> = changes.changed_ranges().collect();
	let mut dropped = 0;
	let mapped = prior
		.into_vec()
		.into_iter()
		.filter_map(|deco| {
			let span = deco.span();
			if regions.iter().any(|r| span.touches(r.from_old, r.to_old)) {
				dropped += 1;
				return None;
			}
			let start = changes.map_pos(span.start, Bias::Right);
			let end = changes.map_pos(span.end, Bias::Left);
			Some(deco.moved(Span::new(start, end)))
		})
		.collect();
	(mapped, dropped)
}

/// Clamps the viewport to the document; `None` covers every line.
fn visible_lines(doc: RopeSlice<'_>, viewport: Option<Viewport>) -> (usize, usize) {
	let line_count = doc.len_lines();
	match viewport {
		Some(v) => (v.from_line.min(line_count), v.to_line.min(line_count)),
		None => (0, line_count),
	}
}

#[cfg(test)]
mod tests;
