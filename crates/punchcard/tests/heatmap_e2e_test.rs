use chrono::NaiveDate;
use punchcard::render::{HeatmapChart, compute_geometry};
use punchcard::{Profile, RawRecord, bin_heatmap, bin_histogram};
use serde_json::json;

fn day(date: &str) -> chrono::NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("date")
        .and_hms_opt(12, 0, 0)
        .expect("time")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).expect("date")
}

fn three_unit_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new(day("2023-06-01"), 1.0),
        RawRecord::new(day("2024-01-10"), 1.0),
        RawRecord::new(day("2024-02-14"), 1.0),
    ]
}

#[test]
fn yearly_chart_preserves_totals_and_derives_the_unit_scale() {
    let chart = HeatmapChart::new(three_unit_records(), Profile::Yearly).with_fixed_today(today());
    let options = chart.options().expect("options");
    let period = chart.period().expect("period");

    let heatmap = bin_heatmap(
        &three_unit_records(),
        Profile::Yearly.adapter().as_ref(),
        &options,
        &period,
    )
    .expect("bin");
    let histogram = bin_histogram(&heatmap, options.scale);

    assert_eq!(heatmap.total(), 3.0);
    assert_eq!(histogram.total(), 3.0);
    assert_eq!(heatmap.scale, [0.0, 1.0]);
    assert_eq!(heatmap.cells.len(), 371);
    assert_eq!(heatmap.dimensions().cols, 53);
    assert_eq!(heatmap.dimensions().rows, 7);
}

#[test]
fn yearly_chart_renders_a_complete_document() {
    let chart = HeatmapChart::new(three_unit_records(), Profile::Yearly).with_fixed_today(today());
    let svg = chart.render_svg().expect("render");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r#"class="cell""#).count(), 371);
    assert_eq!(svg.matches(r#"class="bar""#).count(), 53);
    assert!(!svg.contains("NaN"));
}

#[test]
fn repeated_renders_are_identical() {
    let chart = HeatmapChart::new(three_unit_records(), Profile::Yearly).with_fixed_today(today());
    assert_eq!(chart.render_svg().expect("a"), chart.render_svg().expect("b"));
}

#[test]
fn overrides_flow_through_to_geometry() {
    let chart = HeatmapChart::new(Vec::new(), Profile::Yearly)
        .with_fixed_today(today())
        .with_overrides(json!({
            "legend": false,
            "histogram": false,
            "labels": { "cols": false, "rows": false },
            "geometry": { "square": { "width": 10, "height": 10, "padding": 0 } },
        }));
    let options = chart.options().expect("options");
    let geometry = compute_geometry(
        &options,
        punchcard::GridDimensions { cols: 53, rows: 7 },
    )
    .expect("layout");
    assert_eq!(geometry.heatmap.rect.width, 530.0);
    assert_eq!(geometry.heatmap.rect.height, 70.0);
    assert_eq!(geometry.width, 550.0);

    let svg = chart.render_svg().expect("render");
    assert!(svg.contains(r#"width="550""#));
}

#[test]
fn pre_resolved_options_are_used_as_is() {
    let mut options = punchcard::Profile::Yearly.defaults();
    options.legend = false;
    let chart = HeatmapChart::new(Vec::new(), Profile::Yearly)
        .with_fixed_today(today())
        .with_overrides(json!({ "this-would-fail": true }))
        .with_options(options);
    let svg = chart.render_svg().expect("render");
    assert_eq!(svg.matches(r#"class="legend-step""#).count(), 0);
}

#[test]
fn configuration_typos_fail_the_whole_pass() {
    let chart = HeatmapChart::new(Vec::new(), Profile::Yearly)
        .with_fixed_today(today())
        .with_overrides(json!({ "histogram": false, "histgram": true }));
    assert!(chart.render_svg().is_err());
}

#[test]
fn monthly_profile_renders_hour_rows() {
    let chart = HeatmapChart::new(
        vec![RawRecord::new(day("2024-03-05"), 4.0)],
        Profile::Monthly,
    )
    .with_fixed_today(today());
    let svg = chart.render_svg().expect("render");
    // 30 day columns of 24 hour rows (2024-02-13 .. 2024-03-13).
    assert_eq!(svg.matches(r#"class="cell""#).count(), 30 * 24);
    assert_eq!(svg.matches(r#"class="bar""#).count(), 30);
    assert_eq!(svg.matches(r#"class="row-label""#).count(), 24);
}
