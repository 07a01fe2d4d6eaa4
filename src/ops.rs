//! DOM-mutating operations layered over the element-set core, plus
//! the event-registration subsystem.
//!
//! Every mutating operation validates its arguments first and then
//! applies uniformly across the full current node collection, so an
//! operation either runs everywhere or not at all.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::callback::Callback;
use crate::collection::{ElementSet, Entry, Input};
use crate::dom::{Event, EventHandle, InsertPosition, document};
use crate::error::{Error, ensure_present};
use crate::warn_log;

/// Payload for [`DomSet::prepend`] / [`DomSet::append`].
///
/// Either literal markup, inserted as-is into every target element,
/// or the rendered fragments of another set, inserted as a full
/// cross-product (every fragment into every target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
	/// Literal markup.
	Html(String),
	/// One rendered fragment per source element.
	Fragments(Vec<String>),
}

impl Content {
	/// True iff inserting this content would do nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Html(html) => html.is_empty(),
			Self::Fragments(fragments) => fragments.is_empty(),
		}
	}
}

impl From<&str> for Content {
	fn from(html: &str) -> Self {
		Self::Html(html.to_string())
	}
}

impl From<String> for Content {
	fn from(html: String) -> Self {
		Self::Html(html)
	}
}

/// Renders another set's items: elements contribute their outer HTML,
/// string values contribute themselves, everything else is skipped.
impl From<&ElementSet> for Content {
	fn from(set: &ElementSet) -> Self {
		let mut fragments = Vec::new();
		set.for_each(|_, entry| match entry {
			Entry::Node(node) => fragments.push(node.outer_html()),
			Entry::Value(serde_json::Value::String(text)) => fragments.push(text.clone()),
			_ => {}
		});
		Self::Fragments(fragments)
	}
}

impl From<&DomSet> for Content {
	fn from(set: &DomSet) -> Self {
		Self::from(&set.set)
	}
}

/// One remembered registration: the callback plus the handles that
/// own its platform listeners.
#[derive(Debug)]
struct Registration {
	callback: Callback,
	#[allow(dead_code)] // held for its Drop: detaches the listeners
	handles: Vec<EventHandle>,
}

/// Per-instance mapping from event name to its single remembered
/// registration.
///
/// One name holds at most one registration; re-registering replaces
/// the previous one, detaching its listeners in the process.
#[derive(Debug, Default)]
pub struct EventRegistry {
	entries: HashMap<String, Registration>,
}

impl EventRegistry {
	/// Records a registration under `event`, replacing (and thereby
	/// detaching) any previous one.
	fn insert(&mut self, event: &str, callback: Callback, handles: Vec<EventHandle>) {
		self.entries
			.insert(event.to_string(), Registration { callback, handles });
	}

	/// Forgets the registration for `event`, detaching its listeners.
	/// Returns false when the name was never registered.
	fn remove(&mut self, event: &str) -> bool {
		self.entries.remove(event).is_some()
	}

	/// Forgets every registration, detaching all listeners.
	fn clear(&mut self) {
		self.entries.clear();
	}

	/// The remembered callback for `event`.
	pub fn callback(&self, event: &str) -> Option<Callback> {
		self.entries.get(event).map(|reg| reg.callback.clone())
	}

	/// True iff `event` has a remembered registration.
	pub fn contains(&self, event: &str) -> bool {
		self.entries.contains_key(event)
	}

	/// Number of remembered registrations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True iff nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// An element set with DOM-mutating operations and event bookkeeping.
///
/// All mutating operations return the set again for fluent chaining;
/// fallible ones return `Result<&mut Self>` so chains compose with
/// `?`. Dropping the set detaches every listener it registered.
#[derive(Debug)]
pub struct DomSet {
	set: ElementSet,
	events: EventRegistry,
}

impl DomSet {
	/// Builds a set from `input` with warnings enabled.
	pub fn new(input: impl Into<Input>) -> Self {
		Self {
			set: ElementSet::new(input),
			events: EventRegistry::default(),
		}
	}

	/// Builds a set from `input` with the given debug flag.
	pub fn with_debug(input: impl Into<Input>, debug: bool) -> Self {
		Self {
			set: ElementSet::with_debug(input, debug),
			events: EventRegistry::default(),
		}
	}

	/// The underlying element-set core.
	pub fn set(&self) -> &ElementSet {
		&self.set
	}

	/// The event registry.
	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	/// Re-scopes the collection; see [`ElementSet::find`].
	pub fn find(&mut self, selector: &str) -> Result<&mut Self, Error> {
		self.set.find(selector)?;
		Ok(self)
	}

	/// Defers `handler` until the page-ready signal fires, passing the
	/// signal's event. One-shot; never tracked in the event registry.
	pub fn ready<F>(&self, handler: F) -> &Self
	where
		F: FnOnce(Event) + 'static,
	{
		document().on_ready(handler);
		self
	}

	/// Sets every element's inner HTML; the empty string clears.
	pub fn set_inner(&mut self, html: &str) -> &mut Self {
		for element in self.set.nodes() {
			element.set_inner_html(html);
		}
		self
	}

	/// Makes the elements visible again by resetting the inline
	/// `display` value, falling back to whatever the stylesheet
	/// defines. A pre-[`hide`](Self::hide) inline value is not
	/// restored.
	pub fn show(&mut self) -> &mut Self {
		self.set_display("")
	}

	/// Hides the elements (`display: none`).
	pub fn hide(&mut self) -> &mut Self {
		self.set_display("none")
	}

	/// Sets every element's `display` style; the empty string resets
	/// to the stylesheet default.
	pub fn set_display(&mut self, value: &str) -> &mut Self {
		for element in self.set.nodes() {
			element.set_style_property("display", value);
		}
		self
	}

	/// Detaches every element from its parent. The collection keeps
	/// the detached references.
	pub fn remove(&mut self) -> &mut Self {
		for element in self.set.nodes() {
			element.remove();
		}
		self
	}

	/// Attaches `handler` for `event` on every selected element and
	/// remembers the registration for later removal.
	///
	/// The event name is an arbitrary string — custom events are as
	/// valid as platform ones, so no name checking happens beyond
	/// presence. Re-registering a name replaces the previous
	/// registration and detaches its listeners. With no selected
	/// elements this is a warned no-op and nothing is remembered.
	pub fn on<F>(&mut self, event: &str, handler: F) -> Result<&mut Self, Error>
	where
		F: Fn(Event) + 'static,
	{
		ensure_present("event", event)?;
		if self.set.nodes().is_empty() {
			if self.set.debug() {
				warn_log!("`on(\"{}\")` has no selected elements to bind", event);
			}
			return Ok(self);
		}
		let callback = Callback::new(handler);
		let handles: Vec<EventHandle> = self
			.set
			.nodes()
			.iter()
			.map(|element| {
				let callback = callback.clone();
				element.add_event_listener(event, move |ev| callback.call(ev))
			})
			.collect();
		self.events.insert(event, callback, handles);
		Ok(self)
	}

	/// Removes the remembered registration for `event` from every
	/// element.
	///
	/// An empty name removes everything, like [`off_all`](Self::off_all).
	/// Returns false (warning in debug mode, nothing removed) when the
	/// name has no registration.
	pub fn off(&mut self, event: &str) -> bool {
		if event.is_empty() {
			self.off_all();
			return true;
		}
		if self.events.remove(event) {
			true
		} else {
			if self.set.debug() {
				warn_log!("no callback registered for `{}`; nothing removed", event);
			}
			false
		}
	}

	/// Removes every remembered registration from every element.
	pub fn off_all(&mut self) -> &mut Self {
		self.events.clear();
		self
	}

	/// The remembered callback for `event`, when one is registered.
	pub fn callback(&self, event: &str) -> Option<Callback> {
		self.events.callback(event)
	}

	/// Inserts `content` just inside every element, before its first
	/// child. Empty content fails with [`Error::MissingArgument`].
	pub fn prepend(&mut self, content: impl Into<Content>) -> Result<&mut Self, Error> {
		let content = content.into();
		if content.is_empty() {
			return Err(Error::MissingArgument("content"));
		}
		self.insert(InsertPosition::AfterBegin, &content);
		Ok(self)
	}

	/// Inserts `content` just inside every element, after its last
	/// child. Empty content is a no-op.
	pub fn append(&mut self, content: impl Into<Content>) -> &mut Self {
		let content = content.into();
		if !content.is_empty() {
			self.insert(InsertPosition::BeforeEnd, &content);
		}
		self
	}

	fn insert(&mut self, position: InsertPosition, content: &Content) {
		for element in self.set.nodes() {
			match content {
				Content::Html(html) => element.insert_adjacent_html(position, html),
				Content::Fragments(fragments) => {
					for fragment in fragments {
						element.insert_adjacent_html(position, fragment);
					}
				}
			}
		}
	}

	/// Sets the named style property on every element, touching no
	/// other property. The property name is required.
	pub fn css(&mut self, property: &str, value: &str) -> Result<&mut Self, Error> {
		ensure_present("property", property)?;
		for element in self.set.nodes() {
			element.set_style_property(property, value);
		}
		Ok(self)
	}

	/// Sets the named attribute on every element. The attribute name
	/// is required.
	pub fn attr(&mut self, name: &str, value: &str) -> Result<&mut Self, Error> {
		ensure_present("name", name)?;
		for element in self.set.nodes() {
			element.set_attribute(name, value);
		}
		Ok(self)
	}
}

impl Deref for DomSet {
	type Target = ElementSet;

	fn deref(&self) -> &Self::Target {
		&self.set
	}
}

impl DerefMut for DomSet {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.set
	}
}

#[cfg(test)]
#[cfg(not(target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use crate::dom::Element;

	use super::*;

	fn pair() -> (DomSet, Element, Element) {
		let first = Element::new("div");
		let second = Element::new("div");
		let set = DomSet::with_debug(vec![first.clone(), second.clone()], false);
		(set, first, second)
	}

	#[test]
	fn set_inner_applies_to_every_element() {
		let (mut set, first, second) = pair();
		set.set_inner("<b>hi</b>");
		assert_eq!(first.inner_html(), "<b>hi</b>");
		assert_eq!(second.inner_html(), "<b>hi</b>");
		set.set_inner("");
		assert_eq!(first.inner_html(), "");
	}

	#[test]
	fn css_sets_only_the_named_property() {
		let (mut set, first, second) = pair();
		first.set_style_property("margin", "4px");
		set.css("color", "red").unwrap();
		assert_eq!(first.style_property("color"), "red");
		assert_eq!(second.style_property("color"), "red");
		assert_eq!(first.style_property("margin"), "4px");
		assert_eq!(second.style_property("margin"), "");
	}

	#[test]
	fn css_requires_a_property_name() {
		let (mut set, first, _) = pair();
		assert_eq!(
			set.css("", "red").unwrap_err(),
			Error::MissingArgument("property")
		);
		assert_eq!(first.style_property(""), "");
	}

	#[test]
	fn attr_sets_the_named_attribute_everywhere() {
		let (mut set, first, second) = pair();
		set.attr("data-state", "open").unwrap();
		assert_eq!(first.get_attribute("data-state").as_deref(), Some("open"));
		assert_eq!(second.get_attribute("data-state").as_deref(), Some("open"));
		assert_eq!(
			set.attr("", "x").unwrap_err(),
			Error::MissingArgument("name")
		);
	}

	#[test]
	fn hide_then_show_resets_to_the_stylesheet_default() {
		let (mut set, first, _) = pair();
		first.set_style_property("display", "flex");
		set.hide();
		assert_eq!(first.style_property("display"), "none");
		set.show();
		// The pre-hide inline value is gone; the stylesheet decides.
		assert_eq!(first.style_property("display"), "");
	}

	#[test]
	fn remove_detaches_every_element() {
		let root = Element::new("div");
		let first = Element::new("span");
		let second = Element::new("span");
		root.append_child(&first);
		root.append_child(&second);
		let mut set = DomSet::with_debug(vec![first.clone(), second], false);
		set.remove();
		assert!(root.children().is_empty());
		assert!(first.parent().is_none());
		// The collection still holds the detached references.
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn on_binds_every_element_and_remembers_the_callback() {
		let (mut set, first, second) = pair();
		let calls = Rc::new(Cell::new(0));
		set.on("click", {
			let calls = calls.clone();
			move |_| calls.set(calls.get() + 1)
		})
		.unwrap();
		assert_eq!(first.listener_count("click"), 1);
		assert_eq!(second.listener_count("click"), 1);
		assert!(set.callback("click").is_some());
		first.dispatch("click");
		second.dispatch("click");
		assert_eq!(calls.get(), 2);
	}

	#[test]
	fn on_requires_an_event_name() {
		let (mut set, _, _) = pair();
		assert_eq!(
			set.on("", |_| {}).unwrap_err(),
			Error::MissingArgument("event")
		);
		assert!(set.events().is_empty());
	}

	#[test]
	fn on_with_an_empty_selection_remembers_nothing() {
		let mut set = DomSet::with_debug(Vec::<Element>::new(), false);
		set.on("click", |_| {}).unwrap();
		assert!(set.events().is_empty());
	}

	#[test]
	fn reregistering_replaces_and_detaches_the_old_listeners() {
		let (mut set, first, _) = pair();
		let first_calls = Rc::new(Cell::new(0));
		let second_calls = Rc::new(Cell::new(0));
		set.on("click", {
			let first_calls = first_calls.clone();
			move |_| first_calls.set(first_calls.get() + 1)
		})
		.unwrap();
		set.on("click", {
			let second_calls = second_calls.clone();
			move |_| second_calls.set(second_calls.get() + 1)
		})
		.unwrap();
		assert_eq!(first.listener_count("click"), 1);
		first.dispatch("click");
		assert_eq!(first_calls.get(), 0);
		assert_eq!(second_calls.get(), 1);
	}

	#[test]
	fn off_removes_exactly_the_named_registration() {
		let (mut set, first, _) = pair();
		set.on("click", |_| {}).unwrap();
		set.on("submit", |_| {}).unwrap();
		assert!(set.off("click"));
		assert_eq!(first.listener_count("click"), 0);
		assert_eq!(first.listener_count("submit"), 1);
		assert!(set.callback("submit").is_some());
		assert!(set.callback("click").is_none());
	}

	#[test]
	fn off_without_a_registration_reports_failure() {
		let (mut set, first, _) = pair();
		set.on("submit", |_| {}).unwrap();
		assert!(!set.off("click"));
		assert_eq!(first.listener_count("submit"), 1);
	}

	#[test]
	fn off_with_an_empty_name_removes_everything() {
		let (mut set, first, second) = pair();
		set.on("click", |_| {}).unwrap();
		set.on("submit", |_| {}).unwrap();
		assert!(set.off(""));
		assert!(set.events().is_empty());
		assert_eq!(first.listener_count("click"), 0);
		assert_eq!(second.listener_count("submit"), 0);
	}

	#[test]
	fn dropping_the_set_detaches_its_listeners() {
		let first = Element::new("div");
		{
			let mut set = DomSet::with_debug(vec![first.clone()], false);
			set.on("click", |_| {}).unwrap();
			assert_eq!(first.listener_count("click"), 1);
		}
		assert_eq!(first.listener_count("click"), 0);
	}

	#[test]
	fn append_and_prepend_literal_markup() {
		let (mut set, first, _) = pair();
		first.set_inner_html("mid");
		set.append("<i>end</i>");
		set.prepend("<i>start</i>").unwrap();
		assert_eq!(first.inner_html(), "<i>start</i>mid<i>end</i>");
	}

	#[test]
	fn prepend_requires_content() {
		let (mut set, first, _) = pair();
		assert_eq!(
			set.prepend("").unwrap_err(),
			Error::MissingArgument("content")
		);
		assert_eq!(first.inner_html(), "");
		// append with empty content is a quiet no-op instead.
		set.append("");
		assert_eq!(first.inner_html(), "");
	}

	#[test]
	fn inserting_another_set_is_a_cross_product() {
		let (mut targets, first, second) = pair();
		let a = Element::new("em");
		a.set_inner_html("a");
		let b = Element::new("em");
		b.set_inner_html("b");
		let source = DomSet::with_debug(vec![a, b], false);
		targets.append(&source);
		assert_eq!(first.inner_html(), "<em>a</em><em>b</em>");
		assert_eq!(second.inner_html(), "<em>a</em><em>b</em>");
	}

	#[test]
	fn string_values_render_into_content() {
		use serde_json::json;

		let source = ElementSet::with_debug(json!(["x", 1, "y"]), false);
		assert_eq!(
			Content::from(&source),
			Content::Fragments(vec!["x".into(), "y".into()])
		);
	}

	#[test]
	#[serial_test::serial]
	fn ready_defers_until_the_signal_fires() {
		let doc = document();
		doc.reset();
		let fired = Rc::new(Cell::new(false));
		let set = DomSet::with_debug(Vec::<Element>::new(), false);
		set.ready({
			let fired = fired.clone();
			move |event| {
				assert_eq!(event.event_type(), "DOMContentLoaded");
				fired.set(true);
			}
		});
		assert!(!fired.get());
		doc.fire_ready();
		assert!(fired.get());
		// One-shot: never tracked in the registry.
		assert!(set.events().is_empty());
	}

	#[test]
	#[serial_test::serial]
	fn chains_compose_across_core_and_ops() {
		let doc = document();
		doc.reset();
		let root = Element::new("div");
		root.set_id("root");
		let child = Element::new("p");
		child.set_class_name("note");
		root.append_child(&child);
		doc.mount(&root);

		let mut set = DomSet::with_debug("#root", false);
		set.find(".note")
			.unwrap()
			.set_inner("hello")
			.css("color", "red")
			.unwrap()
			.attr("data-seen", "yes")
			.unwrap()
			.hide();
		assert_eq!(child.inner_html(), "hello");
		assert_eq!(child.style_property("color"), "red");
		assert_eq!(child.style_property("display"), "none");
		doc.reset();
	}
}
