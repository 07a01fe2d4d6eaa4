//! domset - Element-Set Wrapper over the Browser DOM
//!
//! A minimal library for front-end page scripting: select DOM elements
//! once, then run chained operations across the whole selection
//! instead of repeating raw browser API calls per element.
//!
//! ## Features
//!
//! - **One entry point**: [`select`] accepts a selector string
//!   (`"#id"` / `".class"`), an event, element references, arrays,
//!   plain objects, or a literal string, and normalizes all of them
//!   into an ordered collection
//! - **Chained operations**: content mutation, visibility toggling,
//!   attribute and style editing, HTML insertion — each applied
//!   uniformly across the full selection
//! - **Owned event bookkeeping**: `on` attaches listeners through
//!   owned handles and remembers them by name, so `off` removes
//!   exactly what was registered
//! - **Low-level only**: built on `wasm-bindgen`, `web-sys`, and
//!   `js-sys`; direct, immediate DOM mutation with no virtual DOM,
//!   no diffing, and no scheduling
//!
//! ## Architecture
//!
//! - [`collection`]: the element-set core — input normalization,
//!   iteration, selector derivation, re-scoping
//! - [`ops`]: DOM-mutating operations and the event registry
//! - [`selector`]: query-selector classification and derivation
//! - [`dom`]: DOM abstraction layer (`web-sys` on wasm32, an
//!   in-memory stand-in on native targets so the pipeline runs under
//!   plain `cargo test`)
//! - [`callback`]: cloneable event-handler wrapper
//! - [`error`]: argument-validation and selection-state errors
//! - [`logging`]: console logging macros
//!
//! ## Example
//!
//! ```ignore
//! use domset::select;
//!
//! let mut items = select("#menu");
//! items
//!     .find(".item")?
//!     .css("color", "steelblue")?
//!     .attr("data-ready", "yes")?
//!     .on("click", |event| {
//!         select(event).hide();
//!     })?;
//!
//! // Later: remove exactly the click registration.
//! items.off("click");
//! ```
//!
//! Selections over application data iterate the same way:
//!
//! ```ignore
//! use domset::{Key, select};
//!
//! select(serde_json::json!({"a": 1, "b": 2})).for_each(|key, value| {
//!     if let Key::Name(name) = key {
//!         // keys arrive in insertion order
//!     }
//! });
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod collection;
pub mod dom;
pub mod error;
pub mod logging;
pub mod ops;
pub mod selector;

pub use callback::Callback;
pub use collection::{ElementSet, Entry, Input, Items, Key};
pub use error::Error;
pub use ops::{Content, DomSet, EventRegistry};
pub use selector::{Selector, is_query_selector};

/// Builds a [`DomSet`] from any accepted input value.
///
/// The single factory entry point: selector strings resolve against
/// the document, events contribute their target's children, arrays
/// and plain objects become data collections, and anything else is
/// held as a literal. Empty selections warn on the console in debug
/// builds.
pub fn select(input: impl Into<Input>) -> DomSet {
	DomSet::new(input)
}

/// Like [`select`], with the empty-selection warnings gated by
/// `debug`. The flag is fixed at construction time.
pub fn select_with_debug(input: impl Into<Input>, debug: bool) -> DomSet {
	DomSet::with_debug(input, debug)
}
