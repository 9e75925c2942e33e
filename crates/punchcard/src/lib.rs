#![forbid(unsafe_code)]

//! `punchcard` renders calendar activity heatmaps (GitHub-style contribution
//! graphs) headlessly: records are binned onto a dense calendar grid, a pure
//! layout pass resolves pixel geometry, and the chart is written out as an
//! SVG document string.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`punchcard::render`)
//!
//! # Example
//!
//! ```
//! use punchcard::{Profile, RawRecord};
//! use punchcard::render::HeatmapChart;
//!
//! let records = vec![RawRecord::new(
//!     chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 0, 0).unwrap(),
//!     2.0,
//! )];
//! let svg = HeatmapChart::new(records, Profile::Yearly)
//!     .with_fixed_today(chrono::NaiveDate::from_ymd_opt(2024, 3, 13).unwrap())
//!     .render_svg()
//!     .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub use punchcard_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use punchcard_render::model::{
        Geometry, HeatmapGeometry, HistogramGeometry, LabelStripGeometry, LegendGeometry, Margin,
        RegionBox, SquareGeometry,
    };
    pub use punchcard_render::{compute_geometry, render_svg_document};

    use punchcard_core::{
        Options, Period, Profile, RawRecord, bin_heatmap, bin_histogram,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum ChartError {
        #[error(transparent)]
        Data(#[from] punchcard_core::Error),
        #[error(transparent)]
        Render(#[from] punchcard_render::Error),
    }

    pub type Result<T> = std::result::Result<T, ChartError>;

    /// Convenience wrapper bundling data, profile and overrides for the full
    /// bin → layout → paint pipeline.
    ///
    /// One [`HeatmapChart::render_svg`] call is one complete render pass; the
    /// returned document fully replaces any previous output for the same
    /// target. All work is CPU-bound and synchronous.
    #[derive(Debug, Clone)]
    pub struct HeatmapChart {
        data: Vec<RawRecord>,
        profile: Profile,
        overrides: serde_json::Value,
        resolved: Option<Options>,
        fixed_today: Option<chrono::NaiveDate>,
    }

    impl HeatmapChart {
        pub fn new(data: Vec<RawRecord>, profile: Profile) -> Self {
            Self {
                data,
                profile,
                overrides: serde_json::Value::Object(serde_json::Map::new()),
                resolved: None,
                fixed_today: None,
            }
        }

        /// JSON configuration deep-merged over the profile defaults.
        pub fn with_overrides(mut self, overrides: serde_json::Value) -> Self {
            self.overrides = overrides;
            self
        }

        /// Fully-resolved options used as-is (still validated); JSON overrides
        /// are ignored when this is set.
        pub fn with_options(mut self, options: Options) -> Self {
            self.resolved = Some(options);
            self
        }

        /// Overrides the "today" used when the period has no explicit
        /// endpoints. Exists primarily to make outputs deterministic in
        /// fixtures and tests; by default the current local date is used.
        pub fn with_fixed_today(mut self, today: chrono::NaiveDate) -> Self {
            self.fixed_today = Some(today);
            self
        }

        /// The effective options after merging overrides into the profile
        /// defaults.
        pub fn options(&self) -> Result<Options> {
            match &self.resolved {
                Some(options) => {
                    options.validate()?;
                    Ok(options.clone())
                }
                None => Ok(Options::resolve(self.profile, &self.overrides)?),
            }
        }

        fn today(&self) -> chrono::NaiveDate {
            self.fixed_today
                .unwrap_or_else(|| chrono::Local::now().date_naive())
        }

        /// The resolved, snapped period the grid will cover.
        pub fn period(&self) -> Result<Period> {
            let options = self.options()?;
            Ok(options.period.resolve(self.today())?)
        }

        /// Runs the full pipeline and returns the SVG document.
        pub fn render_svg(&self) -> Result<String> {
            let options = self.options()?;
            let period = options.period.resolve(self.today())?;
            let adapter = self.profile.adapter();
            let heatmap = bin_heatmap(&self.data, adapter.as_ref(), &options, &period)?;
            let histogram = options
                .histogram
                .then(|| bin_histogram(&heatmap, options.scale));
            let geometry = compute_geometry(&options, heatmap.dimensions())?;
            Ok(render_svg_document(
                &options,
                &period,
                &heatmap,
                histogram.as_ref(),
                &geometry,
            )?)
        }
    }
}
