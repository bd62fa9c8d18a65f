//! Emoji shortcodes such as `:smile:`.
//!
//! The table is fixed. Unknown names are not an error: [`substitute`] hands
//! the input back unchanged.

/// Returns true if `text` is colon-delimited.
///
/// Mirrors the detection used on rendered inline code: only the first and
/// last characters are inspected, so a lone `:` qualifies and passes through.
pub fn is_shortcode(text: &str) -> bool {
	text.starts_with(':') && text.ends_with(':')
}

/// Looks up the glyph for a full shortcode including its colons.
pub fn lookup(code: &str) -> Option<&'static str> {
	let glyph = match code {
		":+1:" => "👍",
		":-1:" => "👎",
		":smile:" => "😄",
		":sunglasses:" => "😎",
		":heart:" => "❤️",
		":tada:" => "🎉",
		":rocket:" => "🚀",
		":eyes:" => "👀",
		":fire:" => "🔥",
		":thinking:" => "🤔",
		_ => return None,
	};
	Some(glyph)
}

/// Returns the glyph for `code`, or `code` itself if unrecognised.
pub fn substitute(code: &str) -> &str {
	lookup(code).unwrap_or(code)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(":+1:", "👍")]
	#[case(":smile:", "😄")]
	#[case(":sunglasses:", "😎")]
	#[case(":unknown_name:", ":unknown_name:")]
	#[case("smile", "smile")]
	#[case(":", ":")]
	fn test_substitute(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(substitute(input), expected);
	}

	#[test]
	fn test_substitute_borrows_input_on_miss() {
		let code = String::from(":nope:");
		assert!(std::ptr::eq(substitute(&code), code.as_str()));
		let glyph: &'static str = lookup(":eyes:").unwrap();
		assert_eq!(substitute(":eyes:"), glyph);
	}

	#[rstest]
	#[case(":smile:", true)]
	#[case(":", true)]
	#[case("smile:", false)]
	#[case(":smile", false)]
	#[case("", false)]
	fn test_is_shortcode(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_shortcode(input), expected);
	}
}
