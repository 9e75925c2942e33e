use crate::adapter::{MonthlyAdapter, RecordAdapter, YearlyAdapter};
use crate::config::{
    BoxOptions, ColorOptions, GeometryOptions, HeatmapGeometryOptions, HistogramGeometryOptions,
    LabelBoxOptions, LabelFilter, LabelGeometryOptions, LabelSetting, LabelSizeOptions, LabelSpec,
    LabelText, LabelsOptions, LegendGeometryOptions, LegendLabelOptions, MarginOptions, Options,
    SeparatorSetting, SquareOptions, TooltipFormats, TooltipSetting,
};
use crate::granularity::Granularity;
use crate::period::{GranularitySpec, PeriodOptions, RangeSpec};
use serde::{Deserialize, Serialize};

/// Named bundle of default configuration, selected at construction time.
/// Extending the set means adding a preset record here, not branching logic
/// elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// One year of day cells grouped into week columns.
    Yearly,
    /// One month of hour cells grouped into day columns.
    Monthly,
}

impl Profile {
    /// The fully-specified default [`Options`] record for this profile.
    /// Caller overrides deep-merge on top of this.
    pub fn defaults(self) -> Options {
        match self {
            Profile::Yearly => Options {
                period: PeriodOptions {
                    from: None,
                    to: None,
                    range: Some(RangeSpec::Span(1, Granularity::Year)),
                    granularity: GranularitySpec {
                        cell: Granularity::Day,
                        col: Granularity::Week,
                    },
                },
                rows: ["Sn", "M", "T", "We", "Th", "F", "S"]
                    .map(str::to_string)
                    .to_vec(),
                labels: LabelsOptions {
                    cols: LabelSetting::Spec(LabelSpec {
                        granularity: Some(Granularity::Week),
                        text: LabelText::MonthOfWeekEnd,
                        filter: LabelFilter::FirstWeekOfMonth,
                        separator: SeparatorSetting::Flag(true),
                    }),
                    rows: LabelSetting::Flag(true),
                },
                tooltip: TooltipSetting::Formats(TooltipFormats {
                    heatmap: "%a, %b %-d %Y".to_string(),
                    histogram: "Week %U %Y".to_string(),
                }),
                ..base_defaults()
            },
            Profile::Monthly => Options {
                period: PeriodOptions {
                    from: None,
                    to: None,
                    range: Some(RangeSpec::Span(1, Granularity::Month)),
                    granularity: GranularitySpec {
                        cell: Granularity::Hour,
                        col: Granularity::Day,
                    },
                },
                rows: (0..24).map(|h| h.to_string()).collect(),
                labels: LabelsOptions {
                    cols: LabelSetting::Spec(LabelSpec {
                        granularity: Some(Granularity::Day),
                        text: LabelText::DayOfMonth,
                        filter: LabelFilter::WeekStart,
                        separator: SeparatorSetting::Flag(true),
                    }),
                    rows: LabelSetting::Flag(true),
                },
                tooltip: TooltipSetting::Formats(TooltipFormats {
                    heatmap: "%Y-%m-%d %H:%M".to_string(),
                    histogram: "%a, %b %-d %Y".to_string(),
                }),
                ..base_defaults()
            },
        }
    }

    /// The record adapter matching this profile's grid shape.
    pub fn adapter(self) -> Box<dyn RecordAdapter + Send + Sync> {
        match self {
            Profile::Yearly => Box::new(YearlyAdapter),
            Profile::Monthly => Box::new(MonthlyAdapter),
        }
    }
}

fn legend_defaults() -> LegendGeometryOptions {
    LegendGeometryOptions {
        rect: BoxOptions {
            padding: Some(5.0),
            ..BoxOptions::default()
        },
        label: LegendLabelOptions {
            padding: 5.0,
            width: 20.0,
        },
    }
}

fn label_strip_defaults() -> LabelBoxOptions {
    LabelBoxOptions {
        rect: BoxOptions {
            padding: Some(5.0),
            ..BoxOptions::default()
        },
        label: LabelSizeOptions {
            width: 20.0,
            height: 10.0,
        },
    }
}

/// Profile-independent defaults; the period, rows, labels and tooltip slots
/// are placeholders the profile variants replace.
fn base_defaults() -> Options {
    Options {
        debug: false,
        legend: true,
        histogram: true,
        frame: true,
        geometry: GeometryOptions {
            width: None,
            height: None,
            heatmap: HeatmapGeometryOptions {
                rect: BoxOptions::default(),
                legend: Some(legend_defaults()),
            },
            histogram: Some(HistogramGeometryOptions {
                rect: BoxOptions {
                    padding: Some(10.0),
                    height: Some(50.0),
                    ..BoxOptions::default()
                },
                legend: Some(legend_defaults()),
            }),
            square: SquareOptions {
                width: 11.0,
                height: 11.0,
                padding: 2.0,
            },
            labels: Some(LabelGeometryOptions {
                cols: Some(label_strip_defaults()),
                rows: Some(label_strip_defaults()),
            }),
            margin: MarginOptions::Uniform(10.0),
        },
        period: PeriodOptions {
            from: None,
            to: None,
            range: None,
            granularity: GranularitySpec {
                cell: Granularity::Day,
                col: Granularity::Week,
            },
        },
        scale: [None, None],
        colors: ColorOptions {
            separator: "#AAAAAA".to_string(),
            frame: "#AAAAAA".to_string(),
            scale: ["#D8E6E7".to_string(), "#218380".to_string()],
        },
        rows: Vec::new(),
        labels: LabelsOptions {
            cols: LabelSetting::Flag(false),
            rows: LabelSetting::Flag(false),
        },
        tooltip: TooltipSetting::Flag(false),
        font_size: 10.0,
    }
}
