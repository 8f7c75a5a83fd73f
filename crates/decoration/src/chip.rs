//! Chips: the visual stand-ins for matched variable references.
//!
//! A chip is a tag plus a label. Rendering is a single function that switches
//! on the tag and picks the style and class from a [`ChipTheme`].

use serde::{Deserialize, Serialize};

use crate::classify::{KnownVariables, Validity, classify};

/// Rendering tag for a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipKind {
	/// The identifier is a key of the supplied known variables.
	Known,
	/// Known variables were supplied and the identifier is not among them.
	Unknown,
	/// No known variables were supplied; validity is not modeled.
	Plain,
}

impl ChipKind {
	/// Picks the tag for `identifier` given the optional mapping.
	pub fn resolve(identifier: &str, variables: Option<&KnownVariables>) -> Self {
		match (variables, classify(identifier, variables)) {
			(None, _) => ChipKind::Plain,
			(Some(_), Validity::Valid) => ChipKind::Known,
			(Some(_), Validity::Invalid) => ChipKind::Unknown,
		}
	}

	/// Validity implied by the tag.
	pub fn validity(self) -> Validity {
		match self {
			ChipKind::Known | ChipKind::Plain => Validity::Valid,
			ChipKind::Unknown => Validity::Invalid,
		}
	}

	/// CSS-style class name for the tag.
	pub fn class(self) -> &'static str {
		match self {
			ChipKind::Known => "chip-known",
			ChipKind::Unknown => "chip-unknown",
			ChipKind::Plain => "chip-plain",
		}
	}
}

/// An atomic, non-editable label displayed in place of a variable reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chip {
	kind: ChipKind,
	label: String,
}

impl Chip {
	/// Creates a chip.
	pub fn new(kind: ChipKind, label: impl Into<String>) -> Self {
		Self {
			kind,
			label: label.into(),
		}
	}

	/// Classifies `identifier` and builds its chip.
	pub fn for_identifier(identifier: &str, variables: Option<&KnownVariables>) -> Self {
		Self::new(ChipKind::resolve(identifier, variables), identifier)
	}

	/// The rendering tag.
	pub fn kind(&self) -> ChipKind {
		self.kind
	}

	/// Visible text: the trimmed identifier.
	pub fn label(&self) -> &str {
		&self.label
	}
}

/// Colours for one chip kind, as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipStyle {
	/// Fill colour.
	pub background: String,
	/// Outline colour.
	pub border: String,
	/// Text colour.
	pub foreground: String,
}

impl ChipStyle {
	fn new(background: &str, border: &str, foreground: &str) -> Self {
		Self {
			background: background.to_string(),
			border: border.to_string(),
			foreground: foreground.to_string(),
		}
	}
}

/// Styles for every chip kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipTheme {
	/// Style for recognized variables.
	pub known: ChipStyle,
	/// Warning style for unrecognized variables.
	pub unknown: ChipStyle,
	/// Neutral style used when validity is not modeled.
	pub plain: ChipStyle,
}

impl Default for ChipTheme {
	fn default() -> Self {
		Self {
			known: ChipStyle::new("#e6f7ff", "#91d5ff", "#1890ff"),
			unknown: ChipStyle::new("#fff1f0", "#91d5ff", "#f5222d"),
			plain: ChipStyle::new("#e6f7ff", "#91d5ff", "#1890ff"),
		}
	}
}

/// Everything a host surface needs to draw one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipView<'a> {
	/// Class name for the chip's tag.
	pub class: &'static str,
	/// Text to display.
	pub label: &'a str,
	/// Colours to draw with.
	pub style: &'a ChipStyle,
}

/// Resolves a chip to its view.
pub fn render_chip<'a>(chip: &'a Chip, theme: &'a ChipTheme) -> ChipView<'a> {
	let style = match chip.kind {
		ChipKind::Known => &theme.known,
		ChipKind::Unknown => &theme.unknown,
		ChipKind::Plain => &theme.plain,
	};
	ChipView {
		class: chip.kind.class(),
		label: &chip.label,
		style,
	}
}
