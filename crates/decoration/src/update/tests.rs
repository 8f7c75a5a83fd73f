use chipline_primitives::{Change, Rope, Transaction};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::chip::ChipKind;

fn updater(strategy: UpdateStrategy) -> DecorationUpdater {
	let vars: KnownVariables = [("userName", "User Name"), ("age", "Age")].into_iter().collect();
	DecorationUpdater::new(Mode::Template, Some(Arc::new(vars)), strategy)
}

/// Applies `changes` to `doc` and runs one update pass.
fn edit(
	updater: &DecorationUpdater,
	doc: &mut Rope,
	prior: DecorationSet,
	changes: Vec<Change>,
	viewport: Option<Viewport>,
) -> DecorationSet {
	let prev = doc.clone();
	let tx = Transaction::change(prev.slice(..), changes);
	tx.apply(doc);
	updater.update(
		prior,
		&ViewUpdate {
			prev_doc: prev.slice(..),
			doc: doc.slice(..),
			changes: Some(tx.changes()),
			prev_viewport: viewport,
			viewport,
		},
	)
}

fn summary(set: &DecorationSet) -> Vec<(usize, usize, String, ChipKind)> {
	set.iter()
		.map(|d| (d.span().start, d.span().end, d.identifier().to_string(), d.chip().kind()))
		.collect()
}

#[test]
fn create_decorates_whole_document() {
	let doc = Rope::from("<%= userName %>\n<%= age %> <%= nope %>");
	let set = updater(UpdateStrategy::Incremental).create(doc.slice(..), None);
	assert_eq!(
		summary(&set),
		vec![
			(0, 15, "userName".to_string(), ChipKind::Known),
			(16, 26, "age".to_string(), ChipKind::Known),
			(27, 38, "nope".to_string(), ChipKind::Unknown),
		]
	);
}

#[test]
fn no_change_returns_prior() {
	let up = updater(UpdateStrategy::Incremental);
	let doc = Rope::from("<%= age %>");
	let set = up.create(doc.slice(..), None);
	let chip = Arc::clone(set.as_slice()[0].chip());
	let same = up.update(
		set,
		&ViewUpdate {
			prev_doc: doc.slice(..),
			doc: doc.slice(..),
			changes: None,
			prev_viewport: None,
			viewport: None,
		},
	);
	assert!(Arc::ptr_eq(&chip, same.as_slice()[0].chip()));
}

#[test]
fn edit_far_away_keeps_chip_identity() {
	let up = updater(UpdateStrategy::Incremental);
	let mut doc = Rope::from("<%= userName %>\nsome text\n");
	let set = up.create(doc.slice(..), None);
	let chip = Arc::clone(set.as_slice()[0].chip());

	let set = edit(&up, &mut doc, set, vec![Change::insert(20, "more ")], None);
	assert_eq!(set.len(), 1);
	assert!(Arc::ptr_eq(&chip, set.as_slice()[0].chip()));
	assert_eq!(set.as_slice()[0].span(), Span::new(0, 15));
}

#[test]
fn edit_before_chip_shifts_span_and_keeps_identity() {
	let up = updater(UpdateStrategy::Incremental);
	let mut doc = Rope::from("intro\n<%= age %>");
	let set = up.create(doc.slice(..), None);
	let chip = Arc::clone(set.as_slice()[0].chip());

	let set = edit(&up, &mut doc, set, vec![Change::insert(0, "new line\n")], None);
	assert_eq!(set.as_slice()[0].span(), Span::new(15, 25));
	assert!(Arc::ptr_eq(&chip, set.as_slice()[0].chip()));
}

#[test]
fn breaking_a_token_removes_its_chip() {
	let up = updater(UpdateStrategy::Incremental);
	let mut doc = Rope::from("a <%= age %> b");
	let set = up.create(doc.slice(..), None);
	assert_eq!(set.len(), 1);

	// delete the closing "%>"
	let set = edit(&up, &mut doc, set, vec![Change::delete(10, 12)], None);
	assert_eq!(doc.to_string(), "a <%= age  b");
	assert!(set.is_empty());
}

#[test]
fn completing_a_token_adds_a_chip() {
	let up = updater(UpdateStrategy::Incremental);
	let mut doc = Rope::from("x <%= userName");
	let set = up.create(doc.slice(..), None);
	assert!(set.is_empty());

	let set = edit(&up, &mut doc, set, vec![Change::insert(14, " %>")], None);
	assert_eq!(summary(&set), vec![(2, 17, "userName".to_string(), ChipKind::Known)]);
}

#[test]
fn renaming_inside_token_reclassifies() {
	let up = updater(UpdateStrategy::Incremental);
	let mut doc = Rope::from("<%= age %>");
	let set = up.create(doc.slice(..), None);

	let set = edit(&up, &mut doc, set, vec![Change::replace(4, 7, "agee")], None);
	assert_eq!(summary(&set), vec![(0, 11, "agee".to_string(), ChipKind::Unknown)]);
}

#[test]
fn full_strategy_reuses_equal_chips() {
	let up = updater(UpdateStrategy::Full);
	let mut doc = Rope::from("<%= age %>\n");
	let set = up.create(doc.slice(..), None);
	let chip = Arc::clone(set.as_slice()[0].chip());

	let set = edit(&up, &mut doc, set, vec![Change::insert(11, "tail")], None);
	assert!(Arc::ptr_eq(&chip, set.as_slice()[0].chip()));
}

#[test]
fn viewport_limits_decoration() {
	let up = updater(UpdateStrategy::Incremental);
	let doc = Rope::from("<%= a %>\n<%= b %>\n<%= c %>\n");
	let set = up.create(doc.slice(..), Some(Viewport::new(1, 2)));
	assert_eq!(summary(&set), vec![(9, 17, "b".to_string(), ChipKind::Unknown)]);
}

#[test]
fn viewport_change_decorates_newly_visible_lines() {
	let up = updater(UpdateStrategy::Incremental);
	let doc = Rope::from("<%= a %>\n<%= b %>\n<%= c %>\n");
	let set = up.create(doc.slice(..), Some(Viewport::new(0, 1)));
	assert_eq!(set.len(), 1);

	let set = up.update(
		set,
		&ViewUpdate {
			prev_doc: doc.slice(..),
			doc: doc.slice(..),
			changes: None,
			prev_viewport: Some(Viewport::new(0, 1)),
			viewport: Some(Viewport::new(1, 3)),
		},
	);
	let names: Vec<_> = set.iter().map(|d| d.identifier().to_string()).collect();
	assert_eq!(names, vec!["b", "c"]);
}

#[test]
fn deleting_lines_pulls_content_into_view() {
	let up = updater(UpdateStrategy::Incremental);
	let viewport = Some(Viewport::new(0, 2));
	let mut doc = Rope::from("one\ntwo\n<%= age %>\n");
	let set = up.create(doc.slice(..), viewport);
	assert!(set.is_empty());

	let set = edit(&up, &mut doc, set, vec![Change::delete(0, 4)], viewport);
	assert_eq!(summary(&set), vec![(4, 14, "age".to_string(), ChipKind::Known)]);
}

#[test]
fn inserting_lines_pushes_content_out_of_view() {
	let up = updater(UpdateStrategy::Incremental);
	let viewport = Some(Viewport::new(0, 2));
	let mut doc = Rope::from("one\n<%= age %>\n");
	let set = up.create(doc.slice(..), viewport);
	assert_eq!(set.len(), 1);

	let set = edit(&up, &mut doc, set, vec![Change::insert(0, "zero\n")], viewport);
	assert!(set.is_empty());
}

fn arb_text() -> impl Strategy<Value = String> {
	prop::collection::vec(
		prop_oneof![
			Just("<%= userName %>".to_string()),
			Just("<%= age %>".to_string()),
			Just("<%=".to_string()),
			Just("%>".to_string()),
			Just("\n".to_string()),
			"[a-z ]{1,6}",
		],
		0..12,
	)
	.prop_map(|parts| parts.concat())
}

fn arb_edit(len: usize) -> impl Strategy<Value = Change> {
	(0..=len, 0..=8usize, arb_text()).prop_map(move |(start, del, text)| {
		let end = (start + del).min(len);
		Change::replace(start, end, text.chars().take(20).collect::<String>())
	})
}

fn arb_session() -> impl Strategy<Value = (String, Vec<(usize, usize, String)>)> {
	(arb_text(), prop::collection::vec((0usize..400, 0..=8usize, arb_text()), 1..6))
}

/// Several edits applied together, one transaction per step.
fn arb_batched_session() -> impl Strategy<Value = (String, Vec<Vec<(usize, usize, String)>>)> {
	let step = prop::collection::vec((0usize..400, 0..=8usize, arb_text()), 2..5);
	(arb_text(), prop::collection::vec(step, 1..4))
}

/// Turns raw `(pos, del, text)` triples into sorted, non-overlapping changes.
fn batch(len: usize, mut parts: Vec<(usize, usize, String)>) -> Vec<Change> {
	parts.sort_by_key(|(pos, ..)| *pos);
	let mut last = 0;
	parts
		.into_iter()
		.map(|(pos, del, text)| {
			let start = pos.max(last).min(len);
			let end = (start + del).min(len);
			last = end;
			Change::replace(start, end, text.chars().take(20).collect::<String>())
		})
		.collect()
}

proptest! {
	/// Incremental updates always agree with a full rescan of the new text.
	#[test]
	fn prop_incremental_matches_full_rescan((initial, edits) in arb_session()) {
		let up = updater(UpdateStrategy::Incremental);
		let mut doc = Rope::from(initial.as_str());
		let mut set = up.create(doc.slice(..), None);

		for (pos, del, text) in edits {
			let len = doc.len_chars();
			let start = pos.min(len);
			let end = (start + del).min(len);
			set = edit(&up, &mut doc, set, vec![Change::replace(start, end, text)], None);

			let expected = up.create(doc.slice(..), None);
			prop_assert_eq!(summary(&set), summary(&expected));
		}
	}

	/// Same property with a viewport in place.
	#[test]
	fn prop_incremental_matches_full_rescan_in_viewport(
		(initial, edits) in arb_session(),
		from_line in 0usize..4,
		height in 1usize..4,
	) {
		let up = updater(UpdateStrategy::Incremental);
		let viewport = Some(Viewport::new(from_line, from_line + height));
		let mut doc = Rope::from(initial.as_str());
		let mut set = up.create(doc.slice(..), viewport);

		for (pos, del, text) in edits {
			let len = doc.len_chars();
			let start = pos.min(len);
			let end = (start + del).min(len);
			set = edit(&up, &mut doc, set, vec![Change::replace(start, end, text)], viewport);

			let expected = up.create(doc.slice(..), viewport);
			prop_assert_eq!(summary(&set), summary(&expected));
		}
	}

	/// Transactions carrying several changes agree with a full rescan.
	#[test]
	fn prop_batched_edits_match_full_rescan((initial, steps) in arb_batched_session()) {
		let up = updater(UpdateStrategy::Incremental);
		let mut doc = Rope::from(initial.as_str());
		let mut set = up.create(doc.slice(..), None);

		for parts in steps {
			let changes = batch(doc.len_chars(), parts);
			set = edit(&up, &mut doc, set, changes, None);

			let expected = up.create(doc.slice(..), None);
			prop_assert_eq!(summary(&set), summary(&expected));
		}
	}

	/// Same property with a viewport in place.
	#[test]
	fn prop_batched_edits_match_full_rescan_in_viewport(
		(initial, steps) in arb_batched_session(),
		from_line in 0usize..4,
		height in 1usize..4,
	) {
		let up = updater(UpdateStrategy::Incremental);
		let viewport = Some(Viewport::new(from_line, from_line + height));
		let mut doc = Rope::from(initial.as_str());
		let mut set = up.create(doc.slice(..), viewport);

		for parts in steps {
			let changes = batch(doc.len_chars(), parts);
			set = edit(&up, &mut doc, set, changes, viewport);

			let expected = up.create(doc.slice(..), viewport);
			prop_assert_eq!(summary(&set), summary(&expected));
		}
	}

	/// A single generated edit keeps the set sorted and disjoint.
	#[test]
	fn prop_set_stays_ordered(initial in arb_text(), change in arb_edit(64)) {
		let up = updater(UpdateStrategy::Incremental);
		let mut doc = Rope::from(initial.as_str());
		let set = up.create(doc.slice(..), None);
		let len = doc.len_chars();
		let change = Change::replace(change.start.min(len), change.end.min(len), change.replacement.unwrap_or_default());
		let set = edit(&up, &mut doc, set, vec![change], None);
		for pair in set.as_slice().windows(2) {
			prop_assert!(pair[0].span().end <= pair[1].span().start);
		}
	}
}
