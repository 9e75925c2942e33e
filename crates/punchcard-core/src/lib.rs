#![forbid(unsafe_code)]

//! Calendar activity heatmap data model (headless).
//!
//! Design goals:
//! - a typed options schema per profile, merged with an explicit deep-merge
//!   algorithm (no dynamic object inspection)
//! - deterministic, reproducible binning: identical inputs always produce the
//!   identical dense grid, aggregates and scales
//! - pure synchronous computation; rendering is a separate crate consuming
//!   read-only data

pub mod adapter;
pub mod bin;
pub mod config;
pub mod error;
pub mod granularity;
pub mod period;
pub mod profile;

pub use adapter::{BinContext, CellRef, MonthlyAdapter, RawRecord, RecordAdapter, YearlyAdapter};
pub use bin::{
    Cell, ColumnAggregate, GridDimensions, HeatmapData, HistogramData, bin_heatmap, bin_histogram,
};
pub use config::{
    LabelFilter, LabelSetting, LabelSpec, LabelText, Options, ScaleBounds, SeparatorSetting,
    SeparatorStyle, TooltipFormats, TooltipSetting, deep_merge,
};
pub use error::{Error, Result};
pub use granularity::Granularity;
pub use period::{GranularitySpec, Period, PeriodOptions, RangeSpec};
pub use profile::Profile;

#[cfg(test)]
mod tests;
