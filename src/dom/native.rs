//! In-memory DOM stand-in for native targets.
//!
//! Mirrors the browser-backed API in `wasm.rs` closely enough for the
//! operation pipeline to run under plain `cargo test`: elements carry
//! id, class, attributes, inline style, inner HTML, children, and
//! listeners; the document holds mounted roots and pending ready
//! callbacks. Markup is never parsed — adjacent-HTML insertion edits
//! the inner-HTML string only.
//!
//! The document is thread-local shared state; tests that mount into it
//! run under `#[serial]`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::InsertPosition;
use crate::selector::Selector;

type Handler = Rc<dyn Fn(Event)>;

struct Listener {
	event: String,
	id: u64,
	handler: Handler,
}

#[derive(Default)]
struct ElementData {
	tag: String,
	id: String,
	class_name: String,
	attributes: Vec<(String, String)>,
	style: Vec<(String, String)>,
	inner_html: String,
	children: Vec<Element>,
	parent: Option<Weak<RefCell<ElementData>>>,
	listeners: Vec<Listener>,
	next_listener_id: u64,
}

/// An in-memory element.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

impl Element {
	/// Creates a detached element with the given tag name.
	pub fn new(tag: &str) -> Self {
		Self(Rc::new(RefCell::new(ElementData {
			tag: tag.to_string(),
			..ElementData::default()
		})))
	}

	/// The element's tag name.
	pub fn tag(&self) -> String {
		self.0.borrow().tag.clone()
	}

	/// The element's id attribute.
	pub fn id(&self) -> String {
		self.0.borrow().id.clone()
	}

	/// Sets the element's id attribute.
	pub fn set_id(&self, id: &str) {
		self.0.borrow_mut().id = id.to_string();
	}

	/// The element's class attribute.
	pub fn class_name(&self) -> String {
		self.0.borrow().class_name.clone()
	}

	/// Sets the element's class attribute.
	pub fn set_class_name(&self, class_name: &str) {
		self.0.borrow_mut().class_name = class_name.to_string();
	}

	/// Reads an attribute by name. `id` and `class` route to their
	/// dedicated fields, as in the browser.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		match name {
			"id" => {
				let id = self.id();
				(!id.is_empty()).then_some(id)
			}
			"class" => {
				let class = self.class_name();
				(!class.is_empty()).then_some(class)
			}
			_ => {
				let data = self.0.borrow();
				data.attributes
					.iter()
					.find(|(key, _)| key == name)
					.map(|(_, value)| value.clone())
			}
		}
	}

	/// Sets an attribute by name.
	pub fn set_attribute(&self, name: &str, value: &str) {
		match name {
			"id" => self.set_id(value),
			"class" => self.set_class_name(value),
			_ => {
				let mut data = self.0.borrow_mut();
				if let Some(entry) = data.attributes.iter_mut().find(|(key, _)| key == name) {
					entry.1 = value.to_string();
				} else {
					data.attributes.push((name.to_string(), value.to_string()));
				}
			}
		}
	}

	/// The element's inner HTML.
	pub fn inner_html(&self) -> String {
		self.0.borrow().inner_html.clone()
	}

	/// Replaces the element's inner HTML.
	pub fn set_inner_html(&self, html: &str) {
		self.0.borrow_mut().inner_html = html.to_string();
	}

	/// The element rendered as markup: tag, id, class, attributes,
	/// inner HTML.
	pub fn outer_html(&self) -> String {
		let data = self.0.borrow();
		let mut open = format!("<{}", data.tag);
		if !data.id.is_empty() {
			open.push_str(&format!(" id=\"{}\"", data.id));
		}
		if !data.class_name.is_empty() {
			open.push_str(&format!(" class=\"{}\"", data.class_name));
		}
		for (name, value) in &data.attributes {
			open.push_str(&format!(" {}=\"{}\"", name, value));
		}
		format!("{}>{}</{}>", open, data.inner_html, data.tag)
	}

	/// Sets an inline style property, replacing any previous value.
	pub fn set_style_property(&self, name: &str, value: &str) {
		let mut data = self.0.borrow_mut();
		if let Some(entry) = data.style.iter_mut().find(|(key, _)| key == name) {
			entry.1 = value.to_string();
		} else {
			data.style.push((name.to_string(), value.to_string()));
		}
	}

	/// Reads an inline style property; empty string when unset.
	pub fn style_property(&self, name: &str) -> String {
		let data = self.0.borrow();
		data.style
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
			.unwrap_or_default()
	}

	/// Inserts markup at the given position. The stand-in edits the
	/// inner-HTML string; no elements are created.
	pub fn insert_adjacent_html(&self, position: InsertPosition, html: &str) {
		let mut data = self.0.borrow_mut();
		match position {
			InsertPosition::AfterBegin => {
				data.inner_html = format!("{}{}", html, data.inner_html);
			}
			InsertPosition::BeforeEnd => data.inner_html.push_str(html),
		}
	}

	/// Detaches this element from its parent (or from the document
	/// when mounted as a root).
	pub fn remove(&self) {
		let parent = self.0.borrow_mut().parent.take();
		if let Some(parent) = parent.and_then(|weak| weak.upgrade()) {
			parent
				.borrow_mut()
				.children
				.retain(|child| !Rc::ptr_eq(&child.0, &self.0));
		} else {
			document().unmount(self);
		}
	}

	/// Appends `child`, reparenting it under this element.
	pub fn append_child(&self, child: &Element) {
		child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
		self.0.borrow_mut().children.push(child.clone());
	}

	/// The element's child elements.
	pub fn children(&self) -> Vec<Element> {
		self.0.borrow().children.clone()
	}

	/// The element's parent, when attached.
	pub fn parent(&self) -> Option<Element> {
		self.0
			.borrow()
			.parent
			.as_ref()
			.and_then(Weak::upgrade)
			.map(Element)
	}

	/// All descendants matching `selector`, in tree order.
	pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
		let Some(parsed) = Selector::parse(selector) else {
			return Vec::new();
		};
		let mut found = Vec::new();
		for child in self.children() {
			child.collect_matches(&parsed, &mut found);
		}
		found
	}

	fn collect_matches(&self, selector: &Selector, found: &mut Vec<Element>) {
		if self.matches(selector) {
			found.push(self.clone());
		}
		for child in self.children() {
			child.collect_matches(selector, found);
		}
	}

	fn matches(&self, selector: &Selector) -> bool {
		match selector {
			Selector::Id(name) => self.id() == *name,
			Selector::Class(name) => self
				.class_name()
				.split_whitespace()
				.any(|token| token == name),
		}
	}

	/// Attaches `handler` for `event` and returns the owning handle.
	/// Dropping the handle detaches the listener.
	pub fn add_event_listener<F>(&self, event: &str, handler: F) -> EventHandle
	where
		F: Fn(Event) + 'static,
	{
		let mut data = self.0.borrow_mut();
		data.next_listener_id += 1;
		let id = data.next_listener_id;
		data.listeners.push(Listener {
			event: event.to_string(),
			id,
			handler: Rc::new(handler),
		});
		EventHandle {
			target: self.clone(),
			event: event.to_string(),
			id,
		}
	}

	/// Fires every listener registered for `event`, with this element
	/// as the event target.
	pub fn dispatch(&self, event: &str) {
		let handlers: Vec<Handler> = self
			.0
			.borrow()
			.listeners
			.iter()
			.filter(|listener| listener.event == event)
			.map(|listener| listener.handler.clone())
			.collect();
		for handler in handlers {
			handler(Event::new(event, Some(self.clone())));
		}
	}

	/// Number of listeners currently attached for `event`.
	pub fn listener_count(&self, event: &str) -> usize {
		self.0
			.borrow()
			.listeners
			.iter()
			.filter(|listener| listener.event == event)
			.count()
	}

	/// True iff both handles refer to the same element.
	pub fn ptr_eq(&self, other: &Element) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let data = self.0.borrow();
		f.debug_struct("Element")
			.field("tag", &data.tag)
			.field("id", &data.id)
			.field("class", &data.class_name)
			.finish()
	}
}

/// An in-memory event.
#[derive(Debug, Clone)]
pub struct Event {
	event_type: String,
	target: Option<Element>,
}

impl Event {
	/// Creates an event of the given type with an optional target.
	pub fn new(event_type: &str, target: Option<Element>) -> Self {
		Self {
			event_type: event_type.to_string(),
			target,
		}
	}

	/// The event's type name (`click`, `submit`, ...).
	pub fn event_type(&self) -> String {
		self.event_type.clone()
	}

	/// The event's target element.
	pub fn target(&self) -> Option<Element> {
		self.target.clone()
	}

	/// The child elements of the event's target; empty when the event
	/// has no target.
	pub fn target_children(&self) -> Vec<Element> {
		self.target
			.as_ref()
			.map(Element::children)
			.unwrap_or_default()
	}

	/// True iff the event's target carries at least one child element.
	pub fn has_target_children(&self) -> bool {
		!self.target_children().is_empty()
	}
}

/// Owned handle for an attached event listener. Dropping it removes
/// the listener from its target.
pub struct EventHandle {
	target: Element,
	event: String,
	id: u64,
}

impl EventHandle {
	/// The event name this handle listens for.
	pub fn event(&self) -> &str {
		&self.event
	}
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		self.target
			.0
			.borrow_mut()
			.listeners
			.retain(|listener| listener.id != self.id);
	}
}

impl std::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandle")
			.field("event", &self.event)
			.field("closure", &"<listener>")
			.finish()
	}
}

#[derive(Default)]
struct DocumentData {
	roots: Vec<Element>,
	ready: Vec<Box<dyn FnOnce(Event)>>,
}

/// The in-memory document: mounted roots plus pending ready
/// callbacks.
#[derive(Clone, Default)]
pub struct Document(Rc<RefCell<DocumentData>>);

thread_local! {
	static DOCUMENT: Document = Document::default();
}

/// Returns the thread-local document.
pub fn document() -> Document {
	DOCUMENT.with(Document::clone)
}

impl Document {
	/// Mounts an element as a document root.
	pub fn mount(&self, element: &Element) {
		self.0.borrow_mut().roots.push(element.clone());
	}

	fn unmount(&self, element: &Element) {
		self.0
			.borrow_mut()
			.roots
			.retain(|root| !root.ptr_eq(element));
	}

	/// Clears all roots and pending ready callbacks. Test support.
	pub fn reset(&self) {
		let mut data = self.0.borrow_mut();
		data.roots.clear();
		data.ready.clear();
	}

	/// All elements matching `selector`, in tree order across the
	/// mounted roots.
	pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
		let Some(parsed) = Selector::parse(selector) else {
			return Vec::new();
		};
		let roots = self.0.borrow().roots.clone();
		let mut found = Vec::new();
		for root in roots {
			root.collect_matches(&parsed, &mut found);
		}
		found
	}

	/// Registers a one-shot callback for the page-ready signal.
	pub fn on_ready<F>(&self, handler: F)
	where
		F: FnOnce(Event) + 'static,
	{
		self.0.borrow_mut().ready.push(Box::new(handler));
	}

	/// Fires and drains all pending ready callbacks. Test support.
	pub fn fire_ready(&self) {
		let pending: Vec<_> = self.0.borrow_mut().ready.drain(..).collect();
		for handler in pending {
			handler(Event::new("DOMContentLoaded", None));
		}
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document")
			.field("roots", &self.0.borrow().roots.len())
			.finish()
	}
}
