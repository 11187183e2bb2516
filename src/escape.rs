//! CSS escaping for identifiers and attribute values
//!
//! Every string taken from the document (ids, class tokens, attribute values)
//! passes through here before it is spliced into selector text, so attribute
//! content can never change the shape of a generated selector.

use cssparser::{serialize_identifier, serialize_string};

/// Escape a string for use as a CSS identifier (`#id`, `.class`, attribute names).
///
/// Follows the `CSS.escape()` serialization rules from CSSOM.
pub fn escape_identifier(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    // Writing into a String cannot fail
    let _ = serialize_identifier(value, &mut out);
    out
}

/// Quote a string as a CSS string token suitable for `[attr="value"]`.
pub fn quote_attribute_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let _ = serialize_string(value, &mut out);
    out
}

/// `[name="value"]` with both halves escaped.
pub fn attribute_selector(name: &str, value: &str) -> String {
    format!("[{}={}]", escape_identifier(name), quote_attribute_value(value))
}

#[cfg(test)]
#[path = "escape_test.rs"]
mod escape_test;
