//! Rendering driven from settings through resolution and counting.

use range_list_core::{FacetSettings, FactRow, InputMode, PlainFormatter, resolve, tally};
use range_list_render::{render_ranges, selection_choices};

fn settings() -> FacetSettings {
    FacetSettings::from_json(
        r#"{
            "name": "price",
            "input_type": "radio",
            "levels": [
                {"max": "50", "label": "Budget"},
                {},
                {"min": "50", "max": "100"},
                {"min": "100"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn renders_one_div_per_level() {
    let settings = settings();
    let mut ranges = resolve(&settings.levels);
    let rows = vec![FactRow::new(20.0, 1), FactRow::new(120.0, 2)];
    tally(&mut ranges, &rows, None);

    let html = render_ranges(&ranges, InputMode::Radio, &["100+"], &PlainFormatter).unwrap();
    assert_eq!(html.matches("<div ").count(), 4);
    assert!(html.contains(r#"data-value="0-50">Budget <span class="facetwp-counter">(1)</span>"#));
    assert!(html.contains(r#"facetwp-radio disabled" data-value="50-50">50 - 50 "#));
    assert!(html.contains(r#"facetwp-radio checked" data-value="100+""#));
}

#[test]
fn selection_bar_uses_display_labels() {
    let ranges = resolve(&settings().levels);
    let choices = selection_choices(&ranges, &["0-50", "50-100"], &PlainFormatter);
    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Budget", "50 - 100"]);
}
