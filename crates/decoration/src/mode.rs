use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `<%=`, optional whitespace, a name free of `%` and `>`, optional whitespace, `%>`.
static TEMPLATE_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<%=\s*([^%>]+)\s*%>").expect("template pattern is a valid regex"));

/// `{{`, optional whitespace, a name free of `}`, optional whitespace, `}}`.
static VARIABLE_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+)\s*\}\}").expect("variable pattern is a valid regex"));

/// The surface syntax for variable references.
///
/// Fixed for the lifetime of an editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	/// EJS-style `<%= name %>`.
	#[default]
	Template,
	/// Mustache-style `{{name}}`.
	Variable,
}

impl Mode {
	/// Returns the compiled pattern for this syntax.
	///
	/// Capture group 1 holds the untrimmed identifier.
	pub fn pattern(self) -> &'static Regex {
		match self {
			Mode::Template => &TEMPLATE_PATTERN,
			Mode::Variable => &VARIABLE_PATTERN,
		}
	}

	/// Returns the literal token text that references `identifier`.
	pub fn token_text(self, identifier: &str) -> String {
		match self {
			Mode::Template => format!("<%= {identifier} %>"),
			Mode::Variable => format!("{{{{{identifier}}}}}"),
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Mode::Template => "template",
			Mode::Variable => "variable",
		})
	}
}
