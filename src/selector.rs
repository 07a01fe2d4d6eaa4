//! Query-selector classification and per-element selector derivation.
//!
//! A string is treated as a query selector when it starts with `#`
//! (id selector) or `.` (class selector); anything else is literal
//! data. Derivation goes the other way: given a selected element,
//! produce the selector that identifies it, with id taking priority
//! over class when both are present.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::dom::Element;

/// Matches strings that start with `#` (id) or `.` (class).
static SELECTOR_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[#.]").expect("selector pattern is valid"));

/// Returns true iff `input` is a query-selector string (leading `#`
/// or `.`).
pub fn is_query_selector(input: &str) -> bool {
	SELECTOR_PATTERN.is_match(input)
}

/// A parsed id or class selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
	/// `#name` — selects by element id.
	Id(String),
	/// `.name` — selects by class name. When derived from an element
	/// carrying several classes, `name` is the full class attribute;
	/// nothing in this crate round-trips derived selectors back into a
	/// query.
	Class(String),
}

impl Selector {
	/// Parses a selector string into its prefix and name.
	///
	/// Returns `None` when the string does not match the selector
	/// pattern or carries an empty name.
	pub fn parse(input: &str) -> Option<Self> {
		let name = input.get(1..)?;
		if name.is_empty() {
			return None;
		}
		match input.as_bytes().first() {
			Some(b'#') => Some(Self::Id(name.to_string())),
			Some(b'.') => Some(Self::Class(name.to_string())),
			_ => None,
		}
	}

	/// Derives the selector identifying `element`.
	///
	/// Precedence: an id wins over a class when both are present; an
	/// element with neither derives `None`.
	pub fn for_element(element: &Element) -> Option<Self> {
		let id = element.id();
		if !id.is_empty() {
			return Some(Self::Id(id));
		}
		let class = element.class_name();
		if !class.is_empty() {
			return Some(Self::Class(class));
		}
		None
	}

	/// The name part of the selector, without its prefix.
	pub fn name(&self) -> &str {
		match self {
			Self::Id(name) | Self::Class(name) => name,
		}
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Id(name) => write!(f, "#{}", name),
			Self::Class(name) => write!(f, ".{}", name),
		}
	}
}
