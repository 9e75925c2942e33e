//! Label strip data preparation: turns a [`LabelSetting`] into the concrete
//! sequence of positioned label texts plus the resolved separator style.

use chrono::{Datelike, NaiveDateTime, Weekday};
use punchcard_core::config::{
    ColorOptions, LabelFilter, LabelSetting, LabelSpec, LabelText, SeparatorSetting,
};
use punchcard_core::{Granularity, HeatmapData, Period};

/// One drawable label. `index` is the datum's position in the *unfiltered*
/// sequence, so filtered-out entries still reserve their slot on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDatum {
    pub index: usize,
    pub text: String,
}

/// Resolved separator paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeparator {
    pub color: String,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLabels {
    pub data: Vec<LabelDatum>,
    /// Unfiltered sequence length; label positions divide the strip by this.
    pub len: usize,
    pub separator: Option<ResolvedSeparator>,
}

pub enum LabelAxis {
    Cols,
    Rows,
}

/// Builds the label sequence for one axis, or `None` when the axis is off.
pub fn prepare_labels(
    setting: &LabelSetting,
    axis: LabelAxis,
    period: &Period,
    heatmap: &HeatmapData,
    colors: &ColorOptions,
) -> Option<PreparedLabels> {
    match setting {
        LabelSetting::Flag(false) => None,
        LabelSetting::Flag(true) => Some(from_grid(axis, heatmap)),
        LabelSetting::Spec(spec) => Some(from_spec(spec, axis, period, heatmap, colors)),
    }
}

fn from_grid(axis: LabelAxis, heatmap: &HeatmapData) -> PreparedLabels {
    let data: Vec<LabelDatum> = match axis {
        LabelAxis::Rows => heatmap
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| LabelDatum {
                index,
                text: row.clone(),
            })
            .collect(),
        LabelAxis::Cols => heatmap
            .columns
            .iter()
            .enumerate()
            .map(|(index, date)| LabelDatum {
                index,
                text: date.format(default_pattern_for_columns(heatmap)).to_string(),
            })
            .collect(),
    };
    PreparedLabels {
        len: data.len(),
        data,
        separator: None,
    }
}

fn from_spec(
    spec: &LabelSpec,
    axis: LabelAxis,
    period: &Period,
    heatmap: &HeatmapData,
    colors: &ColorOptions,
) -> PreparedLabels {
    let separator = resolve_separator(&spec.separator, colors);
    let (dates, row_texts): (Vec<NaiveDateTime>, Option<&[String]>) = match spec.granularity {
        Some(granularity) => (granularity.sequence(period.from, period.to), None),
        None => match axis {
            LabelAxis::Cols => (heatmap.columns.clone(), None),
            LabelAxis::Rows => (Vec::new(), Some(&heatmap.rows)),
        },
    };

    if let Some(rows) = row_texts {
        let data = rows
            .iter()
            .enumerate()
            .map(|(index, row)| LabelDatum {
                index,
                text: row.clone(),
            })
            .collect::<Vec<_>>();
        return PreparedLabels {
            len: data.len(),
            data,
            separator,
        };
    }

    let len = dates.len();
    let data = dates
        .into_iter()
        .enumerate()
        .filter(|(_, date)| passes_filter(spec.filter, *date))
        .map(|(index, date)| LabelDatum {
            index,
            text: label_text(&spec.text, date),
        })
        .collect();
    PreparedLabels {
        data,
        len,
        separator,
    }
}

fn resolve_separator(
    setting: &SeparatorSetting,
    colors: &ColorOptions,
) -> Option<ResolvedSeparator> {
    match setting {
        SeparatorSetting::Flag(false) => None,
        SeparatorSetting::Flag(true) => Some(ResolvedSeparator {
            color: colors.separator.clone(),
            thickness: 1.0,
        }),
        SeparatorSetting::Style(style) => Some(ResolvedSeparator {
            color: style
                .color
                .clone()
                .unwrap_or_else(|| colors.separator.clone()),
            thickness: style.thickness.unwrap_or(1.0),
        }),
    }
}

fn label_text(text: &LabelText, date: NaiveDateTime) -> String {
    match text {
        LabelText::MonthOfWeekEnd => week_end(date).format("%b").to_string(),
        LabelText::DayOfMonth => date.format("%-d").to_string(),
        LabelText::Pattern(pattern) => format_date(date, pattern),
    }
}

/// Formats with a caller-supplied pattern without panicking on a bad or
/// inapplicable specifier (e.g. `%Z` on a naive datetime); the typed resolve
/// path already rejects malformed patterns, but hand-built options can still
/// reach here. Unformattable patterns come back verbatim.
pub(crate) fn format_date(date: NaiveDateTime, pattern: &str) -> String {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write as _;

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return pattern.to_string();
    }
    let mut out = String::new();
    if write!(&mut out, "{}", date.format_with_items(items.iter())).is_err() {
        return pattern.to_string();
    }
    out
}

fn passes_filter(filter: LabelFilter, date: NaiveDateTime) -> bool {
    match filter {
        LabelFilter::Always => true,
        // The week whose last day falls inside the first week of its month.
        LabelFilter::FirstWeekOfMonth => {
            let end = week_end(date);
            let month_start = end.with_day(1).unwrap_or(end);
            Granularity::Week.floor(month_start) == Granularity::Week.floor(end)
        }
        LabelFilter::WeekStart => date.weekday() == Weekday::Sun,
    }
}

fn week_end(date: NaiveDateTime) -> NaiveDateTime {
    Granularity::Week.floor(date) + chrono::Duration::days(6)
}

fn default_pattern_for_columns(heatmap: &HeatmapData) -> &'static str {
    // Two adjacent columns a day apart are day columns; otherwise assume week
    // or coarser and show the month.
    match heatmap.columns.as_slice() {
        [first, second, ..] if (*second - *first) <= chrono::Duration::days(1) => "%-d",
        _ => "%b %-d",
    }
}
