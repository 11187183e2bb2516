// Unit tests for CSS escaping

use super::*;
use scraper::Selector;

#[test]
fn test_plain_identifiers_pass_through() {
    assert_eq!(escape_identifier("main-nav"), "main-nav");
    assert_eq!(escape_identifier("item_3"), "item_3");
    assert_eq!(escape_identifier("naïve"), "naïve");
}

#[test]
fn test_leading_digit_is_hex_escaped() {
    assert_eq!(escape_identifier("123"), "\\31 23");
    assert_eq!(escape_identifier("-1x"), "-\\31 x");
}

#[test]
fn test_lone_hyphen() {
    assert_eq!(escape_identifier("-"), "\\-");
}

#[test]
fn test_special_characters_are_backslashed() {
    assert_eq!(escape_identifier("a.b"), "a\\.b");
    assert_eq!(escape_identifier("w-1/2"), "w-1\\/2");
    assert_eq!(escape_identifier("md:flex"), "md\\:flex");
    assert_eq!(escape_identifier("a b"), "a\\ b");
}

#[test]
fn test_quote_attribute_value() {
    assert_eq!(quote_attribute_value("submit-btn"), "\"submit-btn\"");
    assert_eq!(quote_attribute_value("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(quote_attribute_value("a\\b"), "\"a\\\\b\"");
    assert_eq!(quote_attribute_value("line\nbreak"), "\"line\\a break\"");
}

#[test]
fn test_attribute_selector() {
    assert_eq!(
        attribute_selector("data-testid", "submit-btn"),
        "[data-testid=\"submit-btn\"]"
    );
}

#[test]
fn test_escaped_output_always_parses() {
    let hostile = [
        "123",
        "a\"]b",
        "x y z",
        "tab\there",
        "-",
        "emoji😀",
        "back\\slash",
        "#hash",
        "[bracket]",
    ];

    for value in hostile {
        let id_selector = format!("#{}", escape_identifier(value));
        assert!(
            Selector::parse(&id_selector).is_ok(),
            "id selector failed to parse: {}",
            id_selector
        );

        let attr = attribute_selector("title", value);
        assert!(
            Selector::parse(&attr).is_ok(),
            "attribute selector failed to parse: {}",
            attr
        );
    }
}
