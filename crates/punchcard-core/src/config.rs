//! Typed chart options.
//!
//! Profiles provide a fully-specified [`Options`] record; caller overrides are
//! JSON deep-merged over it (objects merge key-by-key, arrays and scalars
//! replace wholesale) and the result is deserialized back into the schema, so
//! unknown keys and type mismatches fail fast instead of being carried along
//! as loose dynamic state.

use crate::error::{Error, Result};
use crate::granularity::Granularity;
use crate::period::PeriodOptions;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Explicit or auto-derived value bounds; `None` means "derive from the data".
pub type ScaleBounds = [Option<f64>; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Options {
    pub debug: bool,
    pub legend: bool,
    pub histogram: bool,
    pub frame: bool,
    pub geometry: GeometryOptions,
    pub period: PeriodOptions,
    pub scale: ScaleBounds,
    pub colors: ColorOptions,
    /// Row keys of the grid, top to bottom. Doubles as the row-label source and
    /// as the lookup sequence for adapter-supplied `row` values.
    pub rows: Vec<String>,
    pub labels: LabelsOptions,
    pub tooltip: TooltipSetting,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryOptions {
    /// Pinned canvas width; when set, content may overflow instead of growing
    /// the canvas.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub heatmap: HeatmapGeometryOptions,
    pub histogram: Option<HistogramGeometryOptions>,
    pub square: SquareOptions,
    pub labels: Option<LabelGeometryOptions>,
    pub margin: MarginOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatmapGeometryOptions {
    #[serde(rename = "box")]
    pub rect: BoxOptions,
    pub legend: Option<LegendGeometryOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistogramGeometryOptions {
    #[serde(rename = "box")]
    pub rect: BoxOptions,
    pub legend: Option<LegendGeometryOptions>,
}

/// Partially-specified box: unset fields are computed by the layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxOptions {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub padding: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendGeometryOptions {
    #[serde(rename = "box")]
    pub rect: BoxOptions,
    pub label: LegendLabelOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendLabelOptions {
    pub padding: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelGeometryOptions {
    pub cols: Option<LabelBoxOptions>,
    pub rows: Option<LabelBoxOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelBoxOptions {
    #[serde(rename = "box")]
    pub rect: BoxOptions,
    pub label: LabelSizeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelSizeOptions {
    pub width: f64,
    pub height: f64,
}

/// Margin shorthand: a single number applies to all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarginOptions {
    Uniform(f64),
    Sides {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorOptions {
    pub separator: String,
    pub frame: String,
    /// Interpolation endpoints of the value-to-color ramp, low then high.
    pub scale: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsOptions {
    pub cols: LabelSetting,
    pub rows: LabelSetting,
}

/// `false` | `true` (derive labels from the grid) | explicit spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSetting {
    Flag(bool),
    Spec(LabelSpec),
}

impl LabelSetting {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, LabelSetting::Flag(false))
    }

    pub fn spec(&self) -> Option<&LabelSpec> {
        match self {
            LabelSetting::Spec(spec) => Some(spec),
            LabelSetting::Flag(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelSpec {
    /// Granularity generating the label sequence over the period; without one
    /// the labels come from the grid's own row/column sequence.
    #[serde(default)]
    pub granularity: Option<Granularity>,
    #[serde(rename = "label")]
    pub text: LabelText,
    #[serde(default, rename = "display")]
    pub filter: LabelFilter,
    #[serde(default)]
    pub separator: SeparatorSetting,
}

/// How a label datum turns into text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelText {
    /// Month abbreviation of the last day of the week containing the datum.
    MonthOfWeekEnd,
    /// Day-of-month number.
    DayOfMonth,
    /// A chrono strftime pattern applied to the datum's date.
    Pattern(String),
}

/// Which label data are actually drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelFilter {
    #[default]
    Always,
    /// Only when the datum's week is the first week of its end-day's month.
    FirstWeekOfMonth,
    /// Only on the first day of the week (Sunday).
    WeekStart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeparatorSetting {
    Flag(bool),
    Style(SeparatorStyle),
}

impl Default for SeparatorSetting {
    fn default() -> Self {
        SeparatorSetting::Flag(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeparatorStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TooltipSetting {
    Flag(bool),
    Formats(TooltipFormats),
}

impl TooltipSetting {
    pub fn formats(&self) -> Option<&TooltipFormats> {
        match self {
            TooltipSetting::Formats(formats) => Some(formats),
            TooltipSetting::Flag(_) => None,
        }
    }
}

/// chrono strftime patterns for the per-cell and per-bar tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TooltipFormats {
    pub heatmap: String,
    pub histogram: String,
}

impl Options {
    /// Resolves the effective options for `profile`: the profile's defaults
    /// with `overrides` deep-merged on top, validated.
    pub fn resolve(profile: Profile, overrides: &Value) -> Result<Options> {
        let mut merged = serde_json::to_value(profile.defaults())?;
        deep_merge(&mut merged, overrides);
        let options: Options = serde_json::from_value(merged)?;
        options.validate()?;
        tracing::debug!(?profile, options = ?options, "resolved chart options");
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let square = &self.geometry.square;
        if !(square.width > 0.0) || !(square.height > 0.0) {
            return Err(Error::invalid_options(
                "geometry.square width/height must be positive",
            ));
        }
        if !(square.padding >= 0.0) {
            return Err(Error::invalid_options(
                "geometry.square.padding must be non-negative",
            ));
        }
        if !(self.font_size > 0.0) {
            return Err(Error::invalid_options("fontSize must be positive"));
        }
        if self.rows.is_empty() {
            return Err(Error::invalid_options("rows must not be empty"));
        }
        if self.legend && self.geometry.heatmap.legend.is_none() {
            return Err(Error::invalid_options(
                "legend is enabled but geometry.heatmap.legend is missing",
            ));
        }
        if self.histogram {
            let Some(histogram) = &self.geometry.histogram else {
                return Err(Error::invalid_options(
                    "histogram is enabled but geometry.histogram is missing",
                ));
            };
            if self.legend && histogram.legend.is_none() {
                return Err(Error::invalid_options(
                    "legend is enabled but geometry.histogram.legend is missing",
                ));
            }
        }
        for (name, setting) in [("cols", &self.labels.cols), ("rows", &self.labels.rows)] {
            if !setting.is_enabled() {
                continue;
            }
            let strip = self.geometry.labels.as_ref().and_then(|l| match name {
                "cols" => l.cols.as_ref(),
                _ => l.rows.as_ref(),
            });
            if strip.is_none() {
                return Err(Error::invalid_options(format!(
                    "labels.{name} is enabled but geometry.labels.{name} is missing"
                )));
            }
        }
        if matches!(self.tooltip, TooltipSetting::Flag(true)) {
            return Err(Error::invalid_options(
                "tooltip: true is ambiguous; pass {heatmap, histogram} format patterns or false",
            ));
        }
        if let Some(formats) = self.tooltip.formats() {
            validate_pattern(&formats.heatmap, "tooltip.heatmap")?;
            validate_pattern(&formats.histogram, "tooltip.histogram")?;
        }
        for (name, setting) in [("cols", &self.labels.cols), ("rows", &self.labels.rows)] {
            if let Some(LabelSpec {
                text: LabelText::Pattern(pattern),
                ..
            }) = setting.spec()
            {
                validate_pattern(pattern, &format!("labels.{name}.label"))?;
            }
        }
        Ok(())
    }
}

/// Rejects chrono strftime patterns that would fail at render time.
fn validate_pattern(pattern: &str, what: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::invalid_options(format!(
            "{what} is not a valid chrono format pattern: {pattern:?}"
        )));
    }
    Ok(())
}

/// Deep merge of `incoming` over `base`: objects merge recursively, everything
/// else (arrays included) replaces the base value wholesale.
pub fn deep_merge(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
