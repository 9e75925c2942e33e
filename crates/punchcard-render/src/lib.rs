#![forbid(unsafe_code)]

//! Headless layout + SVG renderer for calendar activity heatmaps.
//!
//! [`layout::compute_geometry`] resolves every pixel box from the options and
//! the grid dimensions; [`svg::render_svg_document`] paints the binned data
//! into an SVG string. Both are pure functions of their inputs.

pub mod color;
pub mod labels;
pub mod layout;
pub mod model;
pub mod svg;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("geometry for enabled feature is missing: {feature}")]
    MissingGeometry { feature: String },

    #[error("invalid layout model: {message}")]
    InvalidModel { message: String },

    #[error("invalid color: {value}")]
    InvalidColor { value: String },
}

impl Error {
    pub(crate) fn missing_geometry(feature: impl Into<String>) -> Self {
        Self::MissingGeometry {
            feature: feature.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub use layout::compute_geometry;
pub use model::Geometry;
pub use svg::render_svg_document;
