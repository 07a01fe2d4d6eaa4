//! DOM abstraction layer.
//!
//! Every operation in this crate talks to the document through the
//! types in this module rather than through `web-sys` directly. On
//! `wasm32` the types are thin wrappers over the live browser DOM; on
//! native targets an in-memory stand-in exposes the same API so the
//! whole operation pipeline runs under plain `cargo test`.
//!
//! The stand-in mirrors browser behavior where the wrapper relies on
//! it (selector matching by id and class token, adjacent-HTML
//! insertion, listener bookkeeping) and nothing more; it does not
//! parse markup.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{Document, Element, Event, EventHandle, document};

#[cfg(not(target_arch = "wasm32"))]
mod native;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{Document, Element, Event, EventHandle, document};

/// Insertion point for adjacent-HTML operations, named after the
/// positions the platform API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
	/// Just inside the element, before its first child.
	AfterBegin,
	/// Just inside the element, after its last child.
	BeforeEnd,
}

impl InsertPosition {
	/// The platform name for this position.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::AfterBegin => "afterbegin",
			Self::BeforeEnd => "beforeend",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_positions_use_platform_names() {
		assert_eq!(InsertPosition::AfterBegin.as_str(), "afterbegin");
		assert_eq!(InsertPosition::BeforeEnd.as_str(), "beforeend");
	}
}
