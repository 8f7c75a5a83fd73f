//! The template editor.
//!
//! [`TemplateEditor`] owns the document, the selection, the chip decorations
//! and the trigger menu. Every text mutation goes through
//! [`TemplateEditor::dispatch`], which applies the transaction, brings the
//! decorations up to date, snaps the selection out of chips, refreshes the
//! menu and only then notifies the change hook.

mod segments;


use std::fmt;
use std::sync::Arc;

use chipline_decoration::{
	Assoc, ChipTheme, DecorationSet, DecorationUpdater, KnownVariables, Mode, Span, UpdateStrategy, ViewUpdate,
	Viewport, insert_variable,
};
use chipline_primitives::{
	CharIdx, Change, EditError, Range, Rope, Selection, Transaction, line_char_range,
	graphemes::{next_grapheme_boundary, prev_grapheme_boundary},
};
pub use segments::Segment;
use tracing::{debug, trace, warn};

use crate::config::{DEFAULT_TRIGGER, EditorConfig};
use crate::error::Result;
use crate::menu::TriggerMenu;

/// Callback fired with the full document text after every text change.
pub type ChangeHook = Box<dyn FnMut(&str)>;

/// Construction-time inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorProps {
	/// Starting document text.
	pub initial_value: String,
	/// Token syntax, fixed for the editor's lifetime.
	pub mode: Mode,
	/// Known variables; `None` disables validity checks and the menu.
	pub variables: Option<KnownVariables>,
	/// How edits are folded into the decorations.
	pub strategy: UpdateStrategy,
	/// Character that opens the suggestion menu.
	pub trigger: char,
	/// Chip colours.
	pub theme: ChipTheme,
}

impl Default for EditorProps {
	fn default() -> Self {
		Self {
			initial_value: String::new(),
			mode: Mode::default(),
			variables: None,
			strategy: UpdateStrategy::default(),
			trigger: DEFAULT_TRIGGER,
			theme: ChipTheme::default(),
		}
	}
}

impl EditorProps {
	/// Props with the given text and defaults elsewhere.
	pub fn new(initial_value: impl Into<String>) -> Self {
		Self {
			initial_value: initial_value.into(),
			..Self::default()
		}
	}

	/// Sets the token syntax.
	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the known variables.
	pub fn with_variables(mut self, variables: KnownVariables) -> Self {
		self.variables = Some(variables);
		self
	}

	/// Sets the update strategy.
	pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Sets the trigger character.
	pub fn with_trigger(mut self, trigger: char) -> Self {
		self.trigger = trigger;
		self
	}
}

/// A headless template-string editor with variable chips.
pub struct TemplateEditor {
	doc: Rope,
	selection: Selection,
	decorations: DecorationSet,
	updater: DecorationUpdater,
	menu: TriggerMenu,
	trigger: char,
	theme: ChipTheme,
	initial_value: String,
	viewport: Option<Viewport>,
	version: u64,
	focused: bool,
	on_change: Option<ChangeHook>,
}

impl fmt::Debug for TemplateEditor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplateEditor")
			.field("mode", &self.updater.mode())
			.field("len_chars", &self.doc.len_chars())
			.field("selection", &self.selection)
			.field("chips", &self.decorations.len())
			.field("menu_visible", &self.menu.is_visible())
			.field("viewport", &self.viewport)
			.field("version", &self.version)
			.finish_non_exhaustive()
	}
}

impl TemplateEditor {
	/// Creates an editor and decorates its initial text.
	pub fn new(props: EditorProps) -> Self {
		let doc = Rope::from(props.initial_value.as_str());
		let updater = DecorationUpdater::new(props.mode, props.variables.map(Arc::new), props.strategy);
		let decorations = updater.create(doc.slice(..), None);
		debug!(
			mode = %props.mode,
			len_chars = doc.len_chars(),
			chips = decorations.len(),
			"template editor created"
		);

		Self {
			doc,
			selection: Selection::default(),
			decorations,
			updater,
			menu: TriggerMenu::default(),
			trigger: props.trigger,
			theme: props.theme,
			initial_value: props.initial_value,
			viewport: None,
			version: 0,
			focused: false,
			on_change: None,
		}
	}

	/// Creates an editor from parsed configuration.
	pub fn from_config(initial_value: impl Into<String>, config: &EditorConfig) -> Result<Self> {
		Ok(Self::new(EditorProps {
			initial_value: initial_value.into(),
			mode: config.mode,
			variables: config.variables.clone(),
			strategy: config.strategy,
			trigger: config.trigger_char()?,
			theme: config.theme.clone(),
		}))
	}

	/// Registers the change hook, replacing any previous one.
	pub fn on_change(&mut self, hook: impl FnMut(&str) + 'static) {
		self.on_change = Some(Box::new(hook));
	}

	/// The document.
	pub fn doc(&self) -> &Rope {
		&self.doc
	}

	/// The full document text.
	pub fn text(&self) -> String {
		self.doc.to_string()
	}

	/// The current selection.
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Head of the primary range.
	pub fn cursor(&self) -> CharIdx {
		self.selection.primary().head
	}

	/// Current chip decorations.
	pub fn decorations(&self) -> &DecorationSet {
		&self.decorations
	}

	/// Suggestion menu state.
	pub fn menu(&self) -> &TriggerMenu {
		&self.menu
	}

	/// Token syntax.
	pub fn mode(&self) -> Mode {
		self.updater.mode()
	}

	/// Known variables, if supplied.
	pub fn variables(&self) -> Option<&KnownVariables> {
		self.updater.variables()
	}

	/// Chip colours.
	pub fn theme(&self) -> &ChipTheme {
		&self.theme
	}

	/// Visible line range; `None` when everything is visible.
	pub fn viewport(&self) -> Option<Viewport> {
		self.viewport
	}

	/// Number of text changes applied so far.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Returns true if the editor has input focus.
	pub fn is_focused(&self) -> bool {
		self.focused
	}

	/// Gives the editor input focus.
	pub fn focus(&mut self) {
		self.focused = true;
	}

	/// Removes input focus.
	pub fn blur(&mut self) {
		self.focused = false;
	}

	/// Applies a transaction built against the current document.
	///
	/// Decorations are recomputed before the change hook runs. A transaction
	/// with no text change and no selection does nothing.
	pub fn dispatch(&mut self, tx: Transaction) {
		let doc_changed = !tx.changes().is_empty();
		if !doc_changed && tx.selection().is_none() {
			return;
		}

		if doc_changed {
			let prev = self.doc.clone();
			tx.apply(&mut self.doc);
			self.version += 1;
			let prior = std::mem::take(&mut self.decorations);
			self.decorations = self.updater.update(
				prior,
				&ViewUpdate {
					prev_doc: prev.slice(..),
					doc: self.doc.slice(..),
					changes: Some(tx.changes()),
					prev_viewport: self.viewport,
					viewport: self.viewport,
				},
			);
		}

		let selection = tx.resolve_selection(&self.selection);
		self.install_selection(selection, Assoc::Nearest);
		trace!(
			version = self.version,
			doc_changed,
			chips = self.decorations.len(),
			cursor = self.cursor(),
			"dispatched transaction"
		);

		if doc_changed && let Some(hook) = self.on_change.as_mut() {
			hook(&self.doc.to_string());
		}
	}

	/// Replaces every selected range with `text`.
	pub fn insert_text(&mut self, text: &str) {
		let tx = Transaction::insert(self.doc.slice(..), &self.selection, text.to_string());
		self.dispatch(tx);
	}

	/// Deletes each selection, or the grapheme or chip before each cursor.
	pub fn delete_backward(&mut self) {
		let doc = self.doc.slice(..);
		let changes: Vec<Change> = self
			.selection
			.iter()
			.filter_map(|r| {
				if !r.is_empty() {
					return Some(Change::delete(r.from(), r.to()));
				}
				let head = r.head;
				if let Some(chip) = self.decorations.ending_at(head) {
					return Some(Change::delete(chip.span().start, head));
				}
				(head > 0).then(|| Change::delete(prev_grapheme_boundary(doc, head), head))
			})
			.collect();
		self.apply_deletions(changes);
	}

	/// Deletes each selection, or the grapheme or chip after each cursor.
	pub fn delete_forward(&mut self) {
		let doc = self.doc.slice(..);
		let len = doc.len_chars();
		let changes: Vec<Change> = self
			.selection
			.iter()
			.filter_map(|r| {
				if !r.is_empty() {
					return Some(Change::delete(r.from(), r.to()));
				}
				let head = r.head;
				if let Some(chip) = self.decorations.starting_at(head) {
					return Some(Change::delete(head, chip.span().end));
				}
				(head < len).then(|| Change::delete(head, next_grapheme_boundary(doc, head)))
			})
			.collect();
		self.apply_deletions(changes);
	}

	fn apply_deletions(&mut self, changes: Vec<Change>) {
		if changes.is_empty() {
			return;
		}
		let tx = Transaction::change(self.doc.slice(..), changes);
		self.dispatch(tx);
	}

	/// Replaces `[start, end)` with `text`.
	pub fn replace_range(&mut self, start: CharIdx, end: CharIdx, text: &str) -> std::result::Result<(), EditError> {
		EditError::check(start, end, self.doc.len_chars())?;
		let tx = Transaction::change(self.doc.slice(..), [Change::replace(start, end, text)]);
		self.dispatch(tx);
		Ok(())
	}

	/// Places a single cursor, snapped to the nearer edge of any chip.
	pub fn set_cursor(&mut self, pos: CharIdx) {
		self.install_selection(Selection::point(pos), Assoc::Nearest);
	}

	/// Selects `[anchor, head]`, growing the range to cover partial chips.
	pub fn select(&mut self, anchor: CharIdx, head: CharIdx) {
		self.install_selection(Selection::single(anchor, head), Assoc::Nearest);
	}

	/// Collapses the selection one step to the left, stepping over whole chips.
	pub fn move_left(&mut self) {
		let doc = self.doc.slice(..);
		let selection = self.selection.transform(|r| {
			if !r.is_empty() {
				return Range::point(r.from());
			}
			let pos = prev_grapheme_boundary(doc, r.head);
			Range::point(self.decorations.snap(pos, Assoc::Before))
		});
		self.install_selection(selection, Assoc::Before);
	}

	/// Collapses the selection one step to the right, stepping over whole chips.
	pub fn move_right(&mut self) {
		let doc = self.doc.slice(..);
		let selection = self.selection.transform(|r| {
			if !r.is_empty() {
				return Range::point(r.to());
			}
			let pos = next_grapheme_boundary(doc, r.head);
			Range::point(self.decorations.snap(pos, Assoc::After))
		});
		self.install_selection(selection, Assoc::After);
	}

	/// Clamps, snaps and installs `selection`, then refreshes the menu.
	fn install_selection(&mut self, mut selection: Selection, cursor_assoc: Assoc) {
		selection.clamp(self.doc.len_chars());
		self.selection = self.decorations.snap_selection(&selection, cursor_assoc);
		self.refresh_menu();
	}

	fn refresh_menu(&mut self) {
		let variables = self.updater.variables();
		if self.menu.refresh(self.doc.slice(..), self.cursor(), self.trigger, variables) {
			trace!(visible = self.menu.is_visible(), anchor = ?self.menu.anchor(), "trigger menu toggled");
		}
	}

	/// Changes the visible line range and decorates newly visible lines.
	pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
		if viewport == self.viewport {
			return;
		}
		let prior = std::mem::take(&mut self.decorations);
		self.decorations = self.updater.update(
			prior,
			&ViewUpdate {
				prev_doc: self.doc.slice(..),
				doc: self.doc.slice(..),
				changes: None,
				prev_viewport: self.viewport,
				viewport,
			},
		);
		self.viewport = viewport;
		let selection = self.selection.clone();
		self.install_selection(selection, Assoc::Nearest);
	}

	/// Adopts a value pushed from outside the editor.
	///
	/// The document is replaced only when `value` differs from both the
	/// current text and the value the editor was created with. Returns true
	/// if the document was replaced.
	pub fn sync_external_value(&mut self, value: &str) -> bool {
		if value == self.initial_value || self.doc == value {
			return false;
		}
		debug!(len_chars = value.chars().count(), "syncing external value");
		let len = self.doc.len_chars();
		let tx = Transaction::change(self.doc.slice(..), [Change::replace(0, len, value)]);
		self.dispatch(tx);
		true
	}

	/// Inserts a token for `identifier` at the start of the primary selection.
	///
	/// Returns the cursor after the token. The editor takes focus.
	pub fn insert_variable(&mut self, identifier: &str) -> CharIdx {
		let at = self.selection.primary().from();
		self.insert_token(at, identifier, false)
	}

	/// Inserts at `at`, optionally replacing the char just before it.
	fn insert_token(&mut self, at: CharIdx, identifier: &str, replace_trigger: bool) -> CharIdx {
		let insertion = insert_variable(self.doc.slice(..), at, self.mode(), identifier, replace_trigger);
		self.dispatch(insertion.transaction);
		self.focused = true;
		self.cursor()
	}

	/// Highlights the next menu entry.
	pub fn menu_next(&mut self) {
		self.menu.next();
	}

	/// Highlights the previous menu entry.
	pub fn menu_prev(&mut self) {
		self.menu.prev();
	}

	/// Hides the menu without inserting anything.
	pub fn dismiss_menu(&mut self) {
		self.menu.hide();
	}

	/// Replaces the trigger with the token for menu entry `index`.
	///
	/// Returns the new cursor, or `None` if the menu is hidden or `index` is
	/// out of range.
	pub fn select_suggestion(&mut self, index: usize) -> Option<CharIdx> {
		let (Some(anchor), Some(identifier)) = (self.menu.anchor(), self.menu.get(index).map(|s| s.identifier.clone()))
		else {
			warn!(index, visible = self.menu.is_visible(), "ignoring selection of missing suggestion");
			return None;
		};
		self.menu.hide();
		// the trigger sits just before the cursor the menu was opened for
		Some(self.insert_token(anchor.pos + 1, &identifier, true))
	}

	/// Accepts the highlighted menu entry.
	pub fn accept_suggestion(&mut self) -> Option<CharIdx> {
		self.select_suggestion(self.menu.highlighted())
	}

	/// Render-ready text runs and chips for the visible lines.
	pub fn segments(&self) -> Vec<Segment<'_>> {
		let doc = self.doc.slice(..);
		let visible = match self.viewport {
			Some(v) => Span::from(line_char_range(doc, v.from_line, v.to_line)),
			None => Span::new(0, doc.len_chars()),
		};
		segments::segments(doc, visible, &self.decorations, &self.theme)
	}

	/// Tears the editor down, releasing the change hook and decorations.
	pub fn destroy(self) {}
}

impl Drop for TemplateEditor {
	fn drop(&mut self) {
		self.on_change = None;
		self.decorations = DecorationSet::empty();
		debug!(version = self.version, "template editor destroyed");
	}
}
