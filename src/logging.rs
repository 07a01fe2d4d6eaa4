//! Logging macros that route to the browser console on WASM and to
//! stderr on native targets.
//!
//! Both macros compile to no-ops without `debug_assertions`, so release
//! builds carry no logging overhead. Instance-level gating (the
//! per-selection `debug` flag) sits above these macros.

/// Logs a warning (`console.warn` on WASM, `eprintln!` elsewhere).
///
/// Takes format arguments like `format!`. No-op in release builds.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning (`console.warn` on WASM, `eprintln!` elsewhere).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		eprintln!("[WARN] {}", format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an informational message (`console.info` on WASM, `eprintln!`
/// elsewhere). No-op in release builds.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an informational message (`console.info` on WASM, `eprintln!`
/// elsewhere).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		eprintln!("[INFO] {}", format!($($arg)*));
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
	use crate::{info_log, warn_log};

	#[test]
	fn logging_macros_compile() {
		warn_log!("no elements found by `{}`", "#missing");
		info_log!("selection holds {} items", 3);
		warn_log!("plain message");
	}
}
