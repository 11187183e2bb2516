// Unit tests for the document model

use super::*;

const PAGE: &str = r#"
<html>
<body>
    <ul id="menu">
        <li class="item">One</li>
        <li class="item">Two</li>
        <li class="item">Three</li>
    </ul>
</body>
</html>
"#;

#[test]
fn test_locate_by_index() {
    let doc = Document::parse(PAGE);
    let handle = doc.locate("li.item", 1).unwrap();
    let el = doc.element(handle).unwrap();
    assert_eq!(el.text().collect::<String>(), "Two");
}

#[test]
fn test_locate_errors() {
    let doc = Document::parse(PAGE);

    assert_eq!(
        doc.locate("table", 0),
        Err(DocumentError::NoMatch("table".to_string()))
    );
    assert!(matches!(
        doc.locate("li", 7),
        Err(DocumentError::IndexOutOfRange { count: 3, .. })
    ));
    assert!(matches!(
        doc.locate("li[", 0),
        Err(DocumentError::InvalidSelector { .. })
    ));
}

#[test]
fn test_body_is_found() {
    let doc = Document::parse(PAGE);
    assert_eq!(doc.body().unwrap().value().name(), "body");

    // The parser synthesizes a body for fragments
    let doc = Document::parse("<p>loose</p>");
    assert!(doc.body().is_some());
}

#[test]
fn test_detached_elements_disappear_from_queries() {
    let mut doc = Document::parse(PAGE);
    let second = doc.locate("li", 1).unwrap();

    assert_eq!(doc.query("li").unwrap().len(), 3);
    assert!(doc.detach(second));

    assert_eq!(doc.query("li").unwrap().len(), 2);
    assert!(doc.element(second).is_none());
}

#[test]
fn test_html_element_is_attached() {
    let doc = Document::parse(PAGE);
    let root = doc.locate("html", 0).unwrap();
    let el = doc.element(root).unwrap();
    assert!(doc.is_attached(el));
}

#[test]
fn test_title_and_url() {
    let doc = Document::parse("<html><head><title>\n  Shop   front \n</title></head><body></body></html>");
    assert_eq!(doc.title().as_deref(), Some("Shop front"));
    assert_eq!(doc.url(), None);

    let doc = doc.with_url("https://shop.example/");
    assert_eq!(doc.url(), Some("https://shop.example/"));

    let untitled = Document::parse("<title>   </title><p>x</p>");
    assert_eq!(untitled.title(), None);
    assert_eq!(Document::parse(PAGE).title(), None);
}
