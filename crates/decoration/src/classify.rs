use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Known variable names mapped to human-readable labels.
///
/// Entries keep the order in which they were supplied, which is the order the
/// suggestion menu lists them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownVariables(IndexMap<String, String>);

impl KnownVariables {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if `identifier` is exactly one of the keys.
	pub fn contains(&self, identifier: &str) -> bool {
		self.0.contains_key(identifier)
	}

	/// Returns the label for `identifier`, if known.
	pub fn label(&self, identifier: &str) -> Option<&str> {
		self.0.get(identifier).map(String::as_str)
	}

	/// Returns the entry at `index` in supply order.
	pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
		self.0.get_index(index).map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Iterates `(identifier, label)` pairs in supply order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Number of known variables.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no variables are known.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KnownVariables {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl From<IndexMap<String, String>> for KnownVariables {
	fn from(map: IndexMap<String, String>) -> Self {
		Self(map)
	}
}

/// Whether a matched identifier names a known variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
	/// Known, or no mapping was supplied to check against.
	Valid,
	/// A mapping was supplied and the identifier is not one of its keys.
	Invalid,
}

/// Classifies `identifier` against the optional mapping.
///
/// Lookup is an exact string comparison: no case folding, no dotted paths,
/// no trimming beyond what the matcher already did.
pub fn classify(identifier: &str, variables: Option<&KnownVariables>) -> Validity {
	match variables {
		Some(vars) if !vars.contains(identifier) => Validity::Invalid,
		_ => Validity::Valid,
	}
}
