//! Suggestion menu opened by the trigger character.
//!
//! The menu is pure state: the editor refreshes it after every document or
//! selection change, and a host decides how to draw it from [`TriggerMenu::anchor`]
//! and [`TriggerMenu::items`].

use chipline_decoration::KnownVariables;
use chipline_primitives::{CharIdx, RopeSlice, line_col};

/// Where the menu is attached: the trigger character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuAnchor {
	/// Char index of the trigger.
	pub pos: CharIdx,
	/// Zero-based line of the trigger.
	pub line: usize,
	/// Zero-based column of the trigger, in chars.
	pub column: usize,
}

/// One entry of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
	/// Identifier inserted when the entry is chosen.
	pub identifier: String,
	/// Human-readable label shown in the menu.
	pub label: String,
}

/// State of the trigger menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerMenu {
	anchor: Option<MenuAnchor>,
	items: Vec<Suggestion>,
	highlighted: usize,
}

impl TriggerMenu {
	/// Shows or hides the menu for a cursor at `cursor`.
	///
	/// The menu is visible iff the char just before the cursor is `trigger`
	/// and known variables were supplied. Returns true if visibility changed.
	pub fn refresh(
		&mut self,
		doc: RopeSlice<'_>,
		cursor: CharIdx,
		trigger: char,
		variables: Option<&KnownVariables>,
	) -> bool {
		let was_visible = self.is_visible();
		let trigger_pos = cursor
			.checked_sub(1)
			.filter(|&pos| pos < doc.len_chars() && doc.char(pos) == trigger);

		match (trigger_pos, variables) {
			(Some(pos), Some(vars)) => {
				let (line, column) = line_col(doc, pos);
				let anchor = MenuAnchor { pos, line, column };
				if self.anchor != Some(anchor) {
					self.highlighted = 0;
				}
				self.anchor = Some(anchor);
				self.items = vars
					.iter()
					.map(|(identifier, label)| Suggestion {
						identifier: identifier.to_string(),
						label: label.to_string(),
					})
					.collect();
			}
			_ => self.hide(),
		}
		was_visible != self.is_visible()
	}

	/// Returns true while the menu is shown.
	pub fn is_visible(&self) -> bool {
		self.anchor.is_some()
	}

	/// Trigger position, while shown.
	pub fn anchor(&self) -> Option<MenuAnchor> {
		self.anchor
	}

	/// Entries in supply order; empty while hidden.
	pub fn items(&self) -> &[Suggestion] {
		&self.items
	}

	/// Returns the entry at `index`.
	pub fn get(&self, index: usize) -> Option<&Suggestion> {
		self.items.get(index)
	}

	/// Index of the highlighted entry.
	pub fn highlighted(&self) -> usize {
		self.highlighted
	}

	/// The highlighted entry, while shown.
	pub fn highlighted_item(&self) -> Option<&Suggestion> {
		self.items.get(self.highlighted)
	}

	/// Moves the highlight down, wrapping to the top.
	pub fn next(&mut self) {
		if !self.items.is_empty() {
			self.highlighted = (self.highlighted + 1) % self.items.len();
		}
	}

	/// Moves the highlight up, wrapping to the bottom.
	pub fn prev(&mut self) {
		if !self.items.is_empty() {
			self.highlighted = self.highlighted.checked_sub(1).unwrap_or(self.items.len() - 1);
		}
	}

	/// Hides the menu.
	pub fn hide(&mut self) {
		self.anchor = None;
		self.items.clear();
		self.highlighted = 0;
	}
}

#[cfg(test)]
mod tests {
	use chipline_primitives::Rope;
	use pretty_assertions::assert_eq;

	use super::*;

	fn vars() -> KnownVariables {
		[("userName", "User Name"), ("age", "Age")].into_iter().collect()
	}

	#[test]
	fn opens_after_trigger_with_variables() {
		let doc = Rope::from("Hi\nthere /");
		let mut menu = TriggerMenu::default();
		assert!(menu.refresh(doc.slice(..), 10, '/', Some(&vars())));
		assert_eq!(menu.anchor(), Some(MenuAnchor { pos: 9, line: 1, column: 6 }));
		let ids: Vec<_> = menu.items().iter().map(|s| s.identifier.as_str()).collect();
		assert_eq!(ids, vec!["userName", "age"]);
	}

	#[test]
	fn stays_hidden_without_variables_or_trigger() {
		let doc = Rope::from("a/b");
		let mut menu = TriggerMenu::default();
		assert!(!menu.refresh(doc.slice(..), 2, '/', None));
		assert!(!menu.refresh(doc.slice(..), 3, '/', Some(&vars())));
		assert!(!menu.refresh(doc.slice(..), 0, '/', Some(&vars())));
		assert!(!menu.is_visible());
	}

	#[test]
	fn closes_when_cursor_leaves_trigger() {
		let doc = Rope::from("a/b");
		let mut menu = TriggerMenu::default();
		menu.refresh(doc.slice(..), 2, '/', Some(&vars()));
		assert!(menu.is_visible());
		assert!(menu.refresh(doc.slice(..), 3, '/', Some(&vars())));
		assert!(menu.items().is_empty());
	}

	#[test]
	fn highlight_wraps() {
		let doc = Rope::from("/");
		let mut menu = TriggerMenu::default();
		menu.refresh(doc.slice(..), 1, '/', Some(&vars()));
		assert_eq!(menu.highlighted(), 0);
		menu.prev();
		assert_eq!(menu.highlighted(), 1);
		menu.next();
		assert_eq!(menu.highlighted_item().map(|s| s.label.as_str()), Some("User Name"));
	}

	#[test]
	fn highlight_survives_refresh_at_same_anchor() {
		let doc = Rope::from("/");
		let mut menu = TriggerMenu::default();
		menu.refresh(doc.slice(..), 1, '/', Some(&vars()));
		menu.next();
		menu.refresh(doc.slice(..), 1, '/', Some(&vars()));
		assert_eq!(menu.highlighted(), 1);
	}
}
