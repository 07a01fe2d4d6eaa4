//! Cheaply-cloneable event-handler wrapper.

use std::rc::Rc;

use crate::dom::Event;

/// A cloneable wrapper around an event handler.
///
/// Wrapping the handler in an `Rc` lets the same callback be attached
/// to every element of a selection and still be remembered by the
/// event registry for later removal.
#[derive(Clone)]
pub struct Callback {
	inner: Rc<dyn Fn(Event) + 'static>,
}

impl Callback {
	/// Wraps a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Event) + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the callback with `event`.
	pub fn call(&self, event: Event) {
		(self.inner)(event)
	}
}

impl std::fmt::Debug for Callback {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}
