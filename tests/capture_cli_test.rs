// End-to-end tests for `capture` and `history`
use serde_json::Value;
use std::fs;

mod common;
use common::{Workspace, fixtures};

#[test]
fn test_capture_records_history_and_log() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);
    let store = ws.store();
    let log = ws.path("captures.jsonl");

    let output = ws.run(&[
        "--store",
        store.to_str().unwrap(),
        "capture",
        &page,
        "button",
        "--log-file",
        log.to_str().unwrap(),
    ]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);

    let record = output.json();
    assert_eq!(record["tagName"], "button");
    assert_eq!(record["text"], "Search");
    assert_eq!(record["selectors"][0], "[data-testid=\"submit-btn\"]");
    assert_eq!(record["attributes"]["data-testid"], "submit-btn");

    let lines: Vec<Value> = fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["action"], "selectionComplete");
    assert_eq!(lines[1]["action"], "logData");
    assert_eq!(lines[1]["data"], record);

    let history = ws
        .run(&["--store", store.to_str().unwrap(), "history", "list"])
        .json();
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["tagName"], "button");
    assert_eq!(entries[0]["textSnippet"], "Search");
    assert_eq!(entries[0]["bestSelector"], "[data-testid=\"submit-btn\"]");

    let raw: Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert!(raw["selectorHistory"].is_array());
}

#[test]
fn test_history_newest_first_and_clear() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);
    let store = ws.store();
    let store = store.to_str().unwrap();

    for index in ["0", "1", "2"] {
        let output = ws.run(&["--store", store, "capture", &page, "li", "--index", index]);
        assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    }

    let entries = ws.run(&["--store", store, "history", "list"]).json();
    let snippets: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["textSnippet"].as_str().unwrap())
        .collect();
    assert_eq!(snippets, vec!["Chair", "Desk", "Lamp"]);

    let simple = ws.run(&["--store", store, "history", "list", "--format", "simple"]);
    assert!(simple.stdout.lines().next().unwrap().contains("Chair"));

    let cleared = ws.run(&["--store", store, "history", "clear"]);
    assert_eq!(cleared.exit_code, 0);
    let entries = ws.run(&["--store", store, "history", "list"]).json();
    assert_eq!(entries.as_array().unwrap().len(), 0);
}

#[test]
fn test_capture_without_history() {
    let ws = Workspace::new();
    let page = ws.write_page("span.html", fixtures::SPAN_PAGE);
    let store = ws.store();

    let output = ws.run(&[
        "--store",
        store.to_str().unwrap(),
        "capture",
        &page,
        "span",
        "--index",
        "1",
        "--no-history",
    ]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    assert_eq!(output.json()["selectors"][0], "#x > span:nth-of-type(2)");
    assert!(!store.exists());
}

#[test]
fn test_corrupt_store_reads_as_empty() {
    let ws = Workspace::new();
    let store = ws.store();
    fs::write(&store, r#"{"selectorHistory": "garbage"}"#).unwrap();

    let output = ws.run(&["--store", store.to_str().unwrap(), "history", "list"]);
    assert_eq!(output.exit_code, 0);
    assert_eq!(output.json(), serde_json::json!([]));
}

#[test]
fn test_default_store_lives_under_home() {
    let ws = Workspace::new();
    let page = ws.write_page("span.html", fixtures::SPAN_PAGE);

    let output = ws.run(&["capture", &page, "span"]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    assert!(ws.path(".selprobe").join("storage.json").exists());
}

#[test]
fn test_capture_with_description() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);
    let store = ws.store();
    let store = store.to_str().unwrap();

    let output = ws.run(&[
        "--store",
        store,
        "capture",
        &page,
        "button",
        "--description",
        "Search button",
    ]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);

    let record = output.json();
    assert_eq!(record["description"], "Search button");
    assert_eq!(record["title"], "Shop");
    let url = record["url"].as_str().unwrap();
    assert!(url.starts_with("file://") && url.ends_with("shop.html"), "{}", url);
    assert!(record["capturedAt"].is_string());

    let blank = ws.run(&["--store", store, "capture", &page, "button", "-d", "  "]);
    assert_eq!(blank.exit_code, 1);
    assert!(blank.stderr.contains("Description must not be blank"));
}

#[test]
fn test_clear_corrupt_store() {
    let ws = Workspace::new();
    let store = ws.store();
    fs::write(&store, "{ not json").unwrap();

    let output = ws.run(&["--store", store.to_str().unwrap(), "history", "clear"]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);

    let listed = ws
        .run(&["--store", store.to_str().unwrap(), "history", "list"])
        .json();
    assert_eq!(listed, serde_json::json!([]));
}
