// End-to-end tests for `synth` and `check`
use serde_json::Value;

mod common;
use common::{Workspace, fixtures};

fn selectors(result: &Value) -> Vec<String> {
    result["candidates"]
        .as_array()
        .expect("candidates array")
        .iter()
        .map(|c| c["selector"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_synth_prefers_test_attribute() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let output = ws.run(&["synth", &page, "button"]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);

    let result = output.json();
    let best = &result["candidates"][0];
    assert_eq!(best["selector"], "[data-testid=\"submit-btn\"]");
    assert_eq!(best["kind"], "test_attribute");
    assert_eq!(best["priority"], 2);
    assert!(
        result["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["unique"] == true)
    );
}

#[test]
fn test_synth_second_span() {
    let ws = Workspace::new();
    let page = ws.write_page("span.html", fixtures::SPAN_PAGE);

    let result = ws.run(&["synth", &page, "span", "--index", "1"]).json();
    assert_eq!(selectors(&result)[0], "#x > span:nth-of-type(2)");
}

#[test]
fn test_synth_list_item_under_identified_list() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let result = ws.run(&["synth", &page, "li", "--index", "1"]).json();
    let all = selectors(&result);
    assert_eq!(all[0], "#products > li.product:nth-of-type(2)");
    assert!(all.contains(&"#products > li:nth-of-type(2)".to_string()));
    assert_eq!(result["candidates"][0]["stable"], true);
}

#[test]
fn test_every_synthesized_selector_checks_out() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    // 3rd row, 2nd cell
    let result = ws.run(&["synth", &page, "td", "--index", "5"]).json();
    let all = selectors(&result);
    assert!(!all.is_empty());

    let mut args = vec!["check", page.as_str(), "td", "--index", "5"];
    args.extend(all.iter().map(String::as_str));
    let report = ws.run(&args).json();

    for assessment in report.as_array().unwrap() {
        assert_eq!(assessment["parses"], true, "{}", assessment);
        assert_eq!(assessment["unique"], true, "{}", assessment);
        assert_eq!(assessment["targets_element"], true, "{}", assessment);
    }
}

#[test]
fn test_synth_text_hint() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let result = ws.run(&["synth", &page, "button", "--index", "1"]).json();
    assert_eq!(result["hints"][0]["selector"], "button:contains(\"Reset\")");
    assert_eq!(result["hints"][0]["unique"], false);
    assert!(!selectors(&result).iter().any(|s| s.contains(":contains")));

    let result = ws
        .run(&["synth", &page, "button", "--index", "1", "--max-text-length", "3"])
        .json();
    assert!(result.get("hints").is_none());
}

#[test]
fn test_synth_from_stdin() {
    let ws = Workspace::new();
    let output = ws.run_with_stdin(&["synth", "-", "span", "--index", "1"], Some(fixtures::SPAN_PAGE));
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    assert_eq!(selectors(&output.json())[0], "#x > span:nth-of-type(2)");
}

#[test]
fn test_synth_simple_format() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let output = ws.run(&["synth", &page, "button", "--format", "simple"]);
    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.starts_with("[0] [data-testid=\"submit-btn\"]"));
    assert!(output.stdout.contains("(positional)"));
}

#[test]
fn test_synth_html_element_is_empty() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let result = ws.run(&["synth", &page, "html"]).json();
    assert_eq!(result["candidates"].as_array().unwrap().len(), 0);
}

#[test]
fn test_synth_uses_config_file() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);
    let config = ws.path("config.json");
    std::fs::write(
        &config,
        r#"{ "stages": { "direct": false, "text_hint": false } }"#,
    )
    .unwrap();

    let result = ws
        .run(&["synth", &page, "button", "--config", config.to_str().unwrap()])
        .json();
    assert!(
        result["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["kind"] != "test_attribute")
    );
    assert!(result.get("hints").is_none());
}

#[test]
fn test_check_reports_each_selector() {
    let ws = Workspace::new();
    let page = ws.write_page("shop.html", fixtures::SHOP_PAGE);

    let output = ws.run(&[
        "check",
        &page,
        "button",
        "[data-testid=\"submit-btn\"]",
        ".btn",
        "p[",
        "#products",
    ]);
    assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    let report = output.json();

    assert_eq!(report[0]["unique"], true);
    assert_eq!(report[0]["targets_element"], true);

    assert_eq!(report[1]["match_count"], 2);
    assert_eq!(report[1]["unique"], false);
    assert_eq!(report[1]["targets_element"], true);

    assert_eq!(report[2]["parses"], false);

    assert_eq!(report[3]["unique"], true);
    assert_eq!(report[3]["targets_element"], false);
}
