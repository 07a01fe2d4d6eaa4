//! Error types for argument validation and selection state.
//!
//! All validation is precondition-style: an operation checks its
//! arguments before touching the DOM, so a returned error means no
//! mutation happened.

/// Errors raised by element-set operations.
///
/// `MissingArgument` and `InvalidArgument` are argument-precondition
/// failures; `EmptySelection` is raised by operations that need at
/// least one selected element to work from.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// A required parameter was empty at call time.
	///
	/// The empty string is the omission sentinel: Rust cannot express
	/// a left-out parameter, so required string arguments are rejected
	/// when empty instead.
	#[error("required argument `{0}` is missing")]
	MissingArgument(&'static str),

	/// A parameter was present but failed a format requirement.
	#[error("argument `{name}` must be {expected}, `{got}` given")]
	InvalidArgument {
		/// Name of the offending parameter.
		name: &'static str,
		/// Human-readable description of the expected format.
		expected: &'static str,
		/// The value that was actually given.
		got: String,
	},

	/// An operation that re-scopes from the current selection ran on a
	/// collection with no elements.
	#[error("operation `{0}` requires a non-empty element selection")]
	EmptySelection(&'static str),
}

/// Rejects an empty required string argument.
pub(crate) fn ensure_present(name: &'static str, value: &str) -> Result<(), Error> {
	if value.is_empty() {
		return Err(Error::MissingArgument(name));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_argument_names_the_parameter() {
		let err = ensure_present("property", "").unwrap_err();
		assert_eq!(err, Error::MissingArgument("property"));
		assert!(err.to_string().contains("property"));
	}

	#[test]
	fn present_argument_passes() {
		assert!(ensure_present("property", "color").is_ok());
	}

	#[test]
	fn invalid_argument_display_includes_value() {
		let err = Error::InvalidArgument {
			name: "selector",
			expected: "a query selector starting with `#` or `.`",
			got: "div".to_string(),
		};
		let msg = err.to_string();
		assert!(msg.contains("selector"));
		assert!(msg.contains("div"));
	}
}
