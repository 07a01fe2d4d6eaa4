//! Browser-backed DOM types (`wasm32` only).

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::InsertPosition;

/// A live DOM element.
#[derive(Debug, Clone)]
pub struct Element {
	inner: web_sys::Element,
}

impl Element {
	/// Wraps a `web-sys` element.
	pub fn new(inner: web_sys::Element) -> Self {
		Self { inner }
	}

	/// The underlying `web-sys` element.
	pub fn inner(&self) -> &web_sys::Element {
		&self.inner
	}

	/// The element's id attribute.
	pub fn id(&self) -> String {
		self.inner.id()
	}

	/// The element's class attribute.
	pub fn class_name(&self) -> String {
		self.inner.class_name()
	}

	/// Reads an attribute by name.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner.get_attribute(name)
	}

	/// Sets an attribute by name.
	pub fn set_attribute(&self, name: &str, value: &str) {
		let _ = self.inner.set_attribute(name, value);
	}

	/// The element's inner HTML.
	pub fn inner_html(&self) -> String {
		self.inner.inner_html()
	}

	/// Replaces the element's inner HTML.
	pub fn set_inner_html(&self, html: &str) {
		self.inner.set_inner_html(html);
	}

	/// The element's outer HTML (the element itself rendered as
	/// markup).
	pub fn outer_html(&self) -> String {
		self.inner.outer_html()
	}

	/// Sets an inline style property. Elements without a style
	/// interface are left untouched.
	pub fn set_style_property(&self, name: &str, value: &str) {
		if let Some(html) = self.inner.dyn_ref::<web_sys::HtmlElement>() {
			let _ = html.style().set_property(name, value);
		}
	}

	/// Reads an inline style property; empty string when unset.
	pub fn style_property(&self, name: &str) -> String {
		self.inner
			.dyn_ref::<web_sys::HtmlElement>()
			.and_then(|html| html.style().get_property_value(name).ok())
			.unwrap_or_default()
	}

	/// Inserts markup at the given position inside this element.
	pub fn insert_adjacent_html(&self, position: InsertPosition, html: &str) {
		let _ = self.inner.insert_adjacent_html(position.as_str(), html);
	}

	/// Detaches this element from its parent.
	pub fn remove(&self) {
		self.inner.remove();
	}

	/// All descendant elements matching `selector`, in document order.
	pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
		match self.inner.query_selector_all(selector) {
			Ok(list) => collect_node_list(&list),
			Err(_) => Vec::new(),
		}
	}

	/// The element's child elements.
	pub fn children(&self) -> Vec<Element> {
		let collection = self.inner.children();
		(0..collection.length())
			.filter_map(|i| collection.item(i))
			.map(Element::new)
			.collect()
	}

	/// Attaches `handler` for `event` and returns the owning handle.
	/// Dropping the handle detaches the listener.
	pub fn add_event_listener<F>(&self, event: &str, handler: F) -> EventHandle
	where
		F: Fn(Event) + 'static,
	{
		let closure = Closure::wrap(Box::new(move |ev: web_sys::Event| {
			handler(Event::new(ev));
		}) as Box<dyn FnMut(web_sys::Event)>);
		let _ = self
			.inner
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
		EventHandle {
			target: self.inner.clone(),
			event: event.to_string(),
			closure,
		}
	}
}

impl From<web_sys::Element> for Element {
	fn from(inner: web_sys::Element) -> Self {
		Self::new(inner)
	}
}

/// A DOM event.
#[derive(Debug, Clone)]
pub struct Event {
	inner: web_sys::Event,
}

impl Event {
	/// Wraps a `web-sys` event.
	pub fn new(inner: web_sys::Event) -> Self {
		Self { inner }
	}

	/// The underlying `web-sys` event.
	pub fn inner(&self) -> &web_sys::Event {
		&self.inner
	}

	/// The event's type name (`click`, `submit`, ...).
	pub fn event_type(&self) -> String {
		self.inner.type_()
	}

	/// The child elements of the event's target; empty when the event
	/// has no target or the target is not an element.
	pub fn target_children(&self) -> Vec<Element> {
		let Some(target) = self.inner.target() else {
			return Vec::new();
		};
		let Ok(element) = target.dyn_into::<web_sys::Element>() else {
			return Vec::new();
		};
		Element::new(element).children()
	}

	/// True iff the event's target carries at least one child element.
	pub fn has_target_children(&self) -> bool {
		!self.target_children().is_empty()
	}
}

impl From<web_sys::Event> for Event {
	fn from(inner: web_sys::Event) -> Self {
		Self::new(inner)
	}
}

/// Owned handle for an attached event listener.
///
/// The handle keeps the backing closure alive; dropping it removes
/// the listener from its target.
pub struct EventHandle {
	target: web_sys::Element,
	event: String,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventHandle {
	/// The event name this handle listens for.
	pub fn event(&self) -> &str {
		&self.event
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

impl Drop for EventHandle {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
	}
}

/// The page document.
#[derive(Debug, Clone)]
pub struct Document {
	inner: web_sys::Document,
}

/// Returns the page document.
///
/// # Panics
///
/// Panics when no window or document is available (non-browser WASM
/// hosts).
pub fn document() -> Document {
	let inner = web_sys::window()
		.expect("window should be available")
		.document()
		.expect("document should be available");
	Document { inner }
}

impl Document {
	/// The underlying `web-sys` document.
	pub fn inner(&self) -> &web_sys::Document {
		&self.inner
	}

	/// All elements matching `selector`, in document order. Selector
	/// syntax errors resolve to an empty result.
	pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
		match self.inner.query_selector_all(selector) {
			Ok(list) => collect_node_list(&list),
			Err(_) => Vec::new(),
		}
	}

	/// Registers a one-shot callback for the page-ready signal
	/// (`DOMContentLoaded`), invoked with the signal's event.
	pub fn on_ready<F>(&self, handler: F)
	where
		F: FnOnce(Event) + 'static,
	{
		let closure = Closure::once(move |ev: web_sys::Event| handler(Event::new(ev)));
		let _ = self
			.inner
			.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
		closure.forget();
	}
}

fn collect_node_list(list: &web_sys::NodeList) -> Vec<Element> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
		.map(Element::new)
		.collect()
}
