use crate::config::{LabelSetting, LabelText, MarginOptions, Options, TooltipSetting, deep_merge};
use crate::{Error, Granularity, Profile};
use serde_json::json;

#[test]
fn profile_defaults_round_trip_through_json() {
    for profile in [Profile::Yearly, Profile::Monthly] {
        let defaults = profile.defaults();
        let value = serde_json::to_value(&defaults).unwrap();
        let back: Options = serde_json::from_value(value).unwrap();
        assert_eq!(back, defaults);
    }
}

#[test]
fn resolve_with_empty_overrides_yields_defaults() {
    let options = Options::resolve(Profile::Yearly, &json!({})).unwrap();
    assert_eq!(options, Profile::Yearly.defaults());
    assert!(options.legend && options.histogram && options.frame);
    assert_eq!(options.font_size, 10.0);
}

#[test]
fn records_merge_recursively_scalars_overwrite() {
    let options = Options::resolve(
        Profile::Yearly,
        &json!({
            "fontSize": 12,
            "geometry": { "square": { "width": 16 } },
        }),
    )
    .unwrap();
    assert_eq!(options.font_size, 12.0);
    assert_eq!(options.geometry.square.width, 16.0);
    // Sibling fields of the merged record survive.
    assert_eq!(options.geometry.square.height, 11.0);
    assert_eq!(options.geometry.square.padding, 2.0);
}

#[test]
fn arrays_replace_wholesale() {
    let options = Options::resolve(
        Profile::Yearly,
        &json!({ "scale": [0, 100], "rows": ["Sun", "Mon"] }),
    )
    .unwrap();
    assert_eq!(options.scale, [Some(0.0), Some(100.0)]);
    assert_eq!(options.rows, vec!["Sun".to_string(), "Mon".to_string()]);
}

#[test]
fn deep_merge_matches_documented_semantics() {
    let mut base = json!({ "a": { "x": 1, "y": [1, 2] }, "b": 3 });
    deep_merge(&mut base, &json!({ "a": { "y": [9] }, "c": true }));
    assert_eq!(base, json!({ "a": { "x": 1, "y": [9] }, "b": 3, "c": true }));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Options::resolve(Profile::Yearly, &json!({ "selector": "#chart" })).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn yearly_label_preset_is_a_spec() {
    let options = Profile::Yearly.defaults();
    let spec = match &options.labels.cols {
        LabelSetting::Spec(spec) => spec,
        other => panic!("expected explicit cols label spec, got {other:?}"),
    };
    assert_eq!(spec.granularity, Some(Granularity::Week));
    assert_eq!(spec.text, LabelText::MonthOfWeekEnd);
    assert!(options.labels.rows.is_enabled());
}

#[test]
fn labels_can_be_switched_off_with_false() {
    let options =
        Options::resolve(Profile::Yearly, &json!({ "labels": { "cols": false } })).unwrap();
    assert!(!options.labels.cols.is_enabled());
    assert!(options.labels.rows.is_enabled());
}

#[test]
fn enabled_feature_with_nulled_geometry_fails_fast() {
    let err = Options::resolve(Profile::Yearly, &json!({ "geometry": { "histogram": null } }))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOptions { .. }));

    // Disabling the feature along with its geometry is fine.
    let options = Options::resolve(
        Profile::Yearly,
        &json!({ "histogram": false, "geometry": { "histogram": null } }),
    )
    .unwrap();
    assert!(options.geometry.histogram.is_none());
}

#[test]
fn bare_true_tooltip_is_rejected() {
    let err = Options::resolve(Profile::Yearly, &json!({ "tooltip": true })).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions { .. }));

    let options = Options::resolve(Profile::Yearly, &json!({ "tooltip": false })).unwrap();
    assert_eq!(options.tooltip, TooltipSetting::Flag(false));
}

#[test]
fn invalid_chrono_patterns_fail_at_resolve_time() {
    let err = Options::resolve(
        Profile::Yearly,
        &json!({ "tooltip": { "heatmap": "%Q", "histogram": "%Y" } }),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidOptions { .. }));

    let err = Options::resolve(
        Profile::Yearly,
        &json!({ "labels": { "cols": {
            "granularity": "week",
            "label": { "pattern": "%Q" },
        } } }),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidOptions { .. }));
}

#[test]
fn margin_accepts_shorthand_and_sides() {
    let uniform = Options::resolve(Profile::Yearly, &json!({ "geometry": { "margin": 4 } }))
        .unwrap();
    assert_eq!(uniform.geometry.margin, MarginOptions::Uniform(4.0));

    let sides = Options::resolve(
        Profile::Yearly,
        &json!({ "geometry": { "margin": { "top": 1, "right": 2, "bottom": 3, "left": 4 } } }),
    )
    .unwrap();
    assert_eq!(
        sides.geometry.margin,
        MarginOptions::Sides {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0
        }
    );
}

#[test]
fn period_endpoints_accept_dates_and_datetimes() {
    let options = Options::resolve(
        Profile::Monthly,
        &json!({ "period": { "from": "2024-03-01", "to": "2024-03-10T12:00:00" } }),
    )
    .unwrap();
    assert_eq!(options.period.from, Some(super::dt("2024-03-01")));
    assert_eq!(options.period.to, Some(super::dt("2024-03-10T12:00:00")));
}
