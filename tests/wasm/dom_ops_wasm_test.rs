//! Browser-target tests for the operation pipeline, run with
//! `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use domset::dom::Element;
use domset::{Error, Selector, select_with_debug};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn body() -> web_sys::Element {
	web_sys::window()
		.expect("window should be available")
		.document()
		.expect("document should be available")
		.body()
		.expect("body should be available")
		.into()
}

/// Mounts `<div id=.. class=..>` under `<body>` and returns it.
fn mount(id: &str, class: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let element = document.create_element("div").unwrap();
	element.set_id(id);
	element.set_class_name(class);
	body().append_child(&element).unwrap();
	element
}

fn unmount(element: &web_sys::Element) {
	element.remove();
}

#[wasm_bindgen_test]
fn selector_input_resolves_live_elements() {
	let first = mount("wasm-a", "wasm-item");
	let second = mount("wasm-b", "wasm-item");

	let set = select_with_debug(".wasm-item", false);
	assert_eq!(set.len(), 2);

	unmount(&first);
	unmount(&second);
}

#[wasm_bindgen_test]
fn css_and_attr_apply_across_the_selection() {
	let first = mount("wasm-c", "wasm-style");
	let second = mount("wasm-d", "wasm-style");

	let mut set = select_with_debug(".wasm-style", false);
	set.css("color", "red")
		.unwrap()
		.attr("data-state", "open")
		.unwrap();

	for element in [&first, &second] {
		assert_eq!(element.get_attribute("data-state").as_deref(), Some("open"));
	}
	assert_eq!(
		Element::new(first.clone()).style_property("color"),
		"red"
	);

	unmount(&first);
	unmount(&second);
}

#[wasm_bindgen_test]
fn hide_then_show_leaves_display_to_the_stylesheet() {
	let element = mount("wasm-e", "");
	let mut set = select_with_debug("#wasm-e", false);

	set.hide();
	assert_eq!(Element::new(element.clone()).style_property("display"), "none");
	set.show();
	assert_eq!(Element::new(element.clone()).style_property("display"), "");

	unmount(&element);
}

#[wasm_bindgen_test]
fn insertion_and_inner_content() {
	let element = mount("wasm-f", "");
	let mut set = select_with_debug("#wasm-f", false);

	set.set_inner("mid");
	set.append("<i>end</i>").prepend("<b>start</b>").unwrap();
	assert_eq!(element.inner_html(), "<b>start</b>mid<i>end</i>");

	unmount(&element);
}

#[wasm_bindgen_test]
fn find_rescopes_within_the_first_element() {
	let root = mount("wasm-g", "");
	root.set_inner_html("<span class=\"leaf\"></span><span class=\"leaf\"></span>");

	let mut set = select_with_debug("#wasm-g", false);
	set.find(".leaf").unwrap();
	assert_eq!(set.len(), 2);
	assert!(matches!(
		set.find("span"),
		Err(Error::InvalidArgument { name: "selector", .. })
	));

	unmount(&root);
}

#[wasm_bindgen_test]
fn derived_selectors_prefer_ids() {
	let element = mount("wasm-h", "also-classed");
	let set = select_with_debug("#wasm-h", false);
	assert_eq!(
		set.query_selectors(),
		vec![Some(Selector::Id("wasm-h".into()))]
	);
	unmount(&element);
}

#[wasm_bindgen_test]
fn event_registry_round_trip() {
	use std::cell::Cell;
	use std::rc::Rc;

	let element = mount("wasm-i", "");
	let mut set = select_with_debug("#wasm-i", false);
	let count = Rc::new(Cell::new(0));
	set.on("click", {
		let count = count.clone();
		move |_| count.set(count.get() + 1)
	})
	.unwrap();

	let event = web_sys::Event::new("click").unwrap();
	element.dispatch_event(&event).unwrap();
	assert_eq!(count.get(), 1);

	assert!(set.off("click"));
	let event = web_sys::Event::new("click").unwrap();
	element.dispatch_event(&event).unwrap();
	assert_eq!(count.get(), 1);
	assert!(!set.off("click"));

	unmount(&element);
}
