//! The element-set core: input normalization, iteration, selector
//! derivation, and re-scoping.
//!
//! An [`ElementSet`] is built from one input value — a selector
//! string, an event, element references, application data — and holds
//! the normalized collection every chained operation works across.

use serde_json::Value;

use crate::dom::{Element, Event, document};
use crate::error::{Error, ensure_present};
use crate::selector::{Selector, is_query_selector};
use crate::warn_log;

/// A construction input, normalized from whatever the caller passed.
///
/// `From` conversions classify strings by the selector pattern and
/// split JSON values into sequences and keyed entries, so callers
/// hand `select()` their value directly.
#[derive(Debug, Clone)]
pub enum Input {
	/// A query-selector string, resolved against the document at
	/// construction time.
	Selector(String),
	/// An event; the target's child elements become the collection.
	Event(Event),
	/// Direct element references.
	Nodes(Vec<Element>),
	/// Sequence of application-supplied values.
	Values(Vec<Value>),
	/// Order-preserving key/value pairs (plain-object input).
	Entries(Vec<(String, Value)>),
	/// A literal string that is not a selector.
	Text(String),
}

impl From<&str> for Input {
	fn from(input: &str) -> Self {
		if is_query_selector(input) {
			Self::Selector(input.to_string())
		} else {
			Self::Text(input.to_string())
		}
	}
}

impl From<String> for Input {
	fn from(input: String) -> Self {
		Self::from(input.as_str())
	}
}

impl From<Event> for Input {
	fn from(event: Event) -> Self {
		Self::Event(event)
	}
}

impl From<Element> for Input {
	fn from(element: Element) -> Self {
		Self::Nodes(vec![element])
	}
}

impl From<Vec<Element>> for Input {
	fn from(elements: Vec<Element>) -> Self {
		Self::Nodes(elements)
	}
}

impl From<Vec<Value>> for Input {
	fn from(values: Vec<Value>) -> Self {
		Self::Values(values)
	}
}

impl From<Vec<(String, Value)>> for Input {
	fn from(entries: Vec<(String, Value)>) -> Self {
		Self::Entries(entries)
	}
}

impl From<Value> for Input {
	fn from(value: Value) -> Self {
		match value {
			Value::Array(values) => Self::Values(values),
			Value::Object(map) => Self::Entries(map.into_iter().collect()),
			Value::String(text) => Self::from(text),
			other => Self::Values(vec![other]),
		}
	}
}

/// Array input from the host page (`wasm32` only), converted through
/// its JSON rendering.
#[cfg(target_arch = "wasm32")]
impl From<js_sys::Array> for Input {
	fn from(array: js_sys::Array) -> Self {
		json_input(array.into())
	}
}

/// Plain-object input from the host page (`wasm32` only), converted
/// through its JSON rendering.
#[cfg(target_arch = "wasm32")]
impl From<js_sys::Object> for Input {
	fn from(object: js_sys::Object) -> Self {
		json_input(object.into())
	}
}

/// Round-trips a JS value through `JSON.stringify`; values that do not
/// stringify normalize to an empty sequence.
#[cfg(target_arch = "wasm32")]
fn json_input(value: wasm_bindgen::JsValue) -> Input {
	js_sys::JSON::stringify(&value)
		.ok()
		.and_then(|json| String::from(json).parse::<Value>().ok().map(Input::from))
		.unwrap_or(Input::Values(Vec::new()))
}

/// The normalized collection an element set holds.
///
/// Emptiness and iteration are defined per variant; there is no
/// duck-typed length probe.
#[derive(Debug, Clone)]
pub enum Items {
	/// DOM element references, in document order.
	Nodes(Vec<Element>),
	/// Application-supplied values, in sequence order.
	Values(Vec<Value>),
	/// Key/value pairs, in insertion order.
	Entries(Vec<(String, Value)>),
	/// A literal string; iteration is per character.
	Text(String),
}

impl Items {
	/// True iff the collection holds nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Nodes(nodes) => nodes.is_empty(),
			Self::Values(values) => values.is_empty(),
			Self::Entries(entries) => entries.is_empty(),
			Self::Text(text) => text.is_empty(),
		}
	}

	/// Number of items the collection holds.
	pub fn len(&self) -> usize {
		match self {
			Self::Nodes(nodes) => nodes.len(),
			Self::Values(values) => values.len(),
			Self::Entries(entries) => entries.len(),
			Self::Text(text) => text.chars().count(),
		}
	}
}

/// The key half of an iteration step: a position for sequences, a
/// property name for keyed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
	/// Position within a sequence.
	Index(usize),
	/// Property name within keyed entries.
	Name(&'a str),
}

/// The item half of an iteration step.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
	/// A DOM element.
	Node(&'a Element),
	/// An application-supplied value.
	Value(&'a Value),
	/// One character of a literal-string collection.
	Char(char),
}

/// An ordered collection of selected items with a constructor-time
/// debug flag.
///
/// Built once per logical selection; [`find`](ElementSet::find)
/// re-scopes the collection in place rather than creating a new set.
#[derive(Debug, Clone)]
pub struct ElementSet {
	items: Items,
	debug: bool,
}

impl ElementSet {
	/// Builds a set from `input` with warnings enabled.
	pub fn new(input: impl Into<Input>) -> Self {
		Self::with_debug(input, true)
	}

	/// Builds a set from `input`, emitting empty-selection warnings
	/// only when `debug` is true. The flag is fixed for the lifetime
	/// of the set.
	pub fn with_debug(input: impl Into<Input>, debug: bool) -> Self {
		let items = match input.into() {
			Input::Selector(selector) => {
				Items::Nodes(document().query_selector_all(&selector))
			}
			Input::Event(event) => Items::Nodes(event.target_children()),
			Input::Nodes(nodes) => Items::Nodes(nodes),
			Input::Values(values) => Items::Values(values),
			Input::Entries(entries) => Items::Entries(entries),
			Input::Text(text) => Items::Text(text),
		};
		let set = Self { items, debug };
		if set.items.is_empty() && debug {
			warn_log!("no elements found for the given input");
		}
		set
	}

	/// Whether empty-selection warnings are enabled.
	pub fn debug(&self) -> bool {
		self.debug
	}

	/// The collection currently held.
	pub fn items(&self) -> &Items {
		&self.items
	}

	/// The node view of the collection: the selected elements, or an
	/// empty slice when the set holds application data instead.
	pub fn nodes(&self) -> &[Element] {
		match &self.items {
			Items::Nodes(nodes) => nodes,
			_ => &[],
		}
	}

	/// True iff the collection holds nothing.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Number of items the collection holds.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Re-scopes the collection to the descendants of the *first*
	/// currently-selected element that match `selector`.
	///
	/// The previous collection is replaced in place. Fails with
	/// [`Error::MissingArgument`] on an empty selector,
	/// [`Error::InvalidArgument`] when the selector does not match the
	/// `#`/`.` pattern, and [`Error::EmptySelection`] when the set
	/// holds no element to search from.
	pub fn find(&mut self, selector: &str) -> Result<&mut Self, Error> {
		ensure_present("selector", selector)?;
		if !is_query_selector(selector) {
			return Err(Error::InvalidArgument {
				name: "selector",
				expected: "a query selector starting with `#` or `.`",
				got: selector.to_string(),
			});
		}
		let first = self
			.nodes()
			.first()
			.cloned()
			.ok_or(Error::EmptySelection("find"))?;
		let found = first.query_selector_all(selector);
		if found.is_empty() && self.debug {
			warn_log!("no elements found by `{}`", selector);
		}
		self.items = Items::Nodes(found);
		Ok(self)
	}

	/// Invokes `f` once per item, in collection order: numeric order
	/// for sequences, insertion order for keyed entries, character
	/// order for literal strings.
	pub fn for_each<F>(&self, mut f: F) -> &Self
	where
		F: FnMut(Key<'_>, Entry<'_>),
	{
		match &self.items {
			Items::Nodes(nodes) => {
				for (index, node) in nodes.iter().enumerate() {
					f(Key::Index(index), Entry::Node(node));
				}
			}
			Items::Values(values) => {
				for (index, value) in values.iter().enumerate() {
					f(Key::Index(index), Entry::Value(value));
				}
			}
			Items::Entries(entries) => {
				for (name, value) in entries {
					f(Key::Name(name), Entry::Value(value));
				}
			}
			Items::Text(text) => {
				for (index, ch) in text.chars().enumerate() {
					f(Key::Index(index), Entry::Char(ch));
				}
			}
		}
		self
	}

	/// Derives a selector for every selected element, one slot per
	/// element in collection order. Elements with neither id nor
	/// class yield `None`; id wins when both are present. Non-node
	/// collections yield an empty list.
	pub fn query_selectors(&self) -> Vec<Option<Selector>> {
		self.nodes().iter().map(Selector::for_element).collect()
	}
}
