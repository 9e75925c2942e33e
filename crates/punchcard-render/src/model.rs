//! Resolved layout structures. Everything here is plain pixel-space data,
//! computed once per render pass by [`crate::layout::compute_geometry`] and
//! never mutated afterwards.

use serde::Serialize;

/// An absolutely positioned pixel box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RegionBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionBox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Cell square dimensions shared by the heatmap and the histogram bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SquareGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl SquareGeometry {
    /// Horizontal distance between the left edges of adjacent cells.
    pub fn step_x(&self) -> f64 {
        self.width + self.padding
    }

    pub fn step_y(&self) -> f64 {
        self.height + self.padding
    }
}

/// A vertical color-ramp legend annotating the heatmap or the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendGeometry {
    #[serde(rename = "box")]
    pub rect: RegionBox,
    /// Width of the color ramp itself (the cell square width).
    pub bar_width: f64,
    /// Gap between the annotated box and the legend box.
    pub box_padding: f64,
    pub label_padding: f64,
    pub label_width: f64,
}

/// A row- or column-label strip alongside the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelStripGeometry {
    #[serde(rename = "box")]
    pub rect: RegionBox,
    /// Gap between the strip and the heatmap.
    pub padding: f64,
    pub label_width: f64,
    pub label_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapGeometry {
    #[serde(rename = "box")]
    pub rect: RegionBox,
    pub legend: Option<LegendGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramGeometry {
    #[serde(rename = "box")]
    pub rect: RegionBox,
    /// Gap between the histogram and whatever sits above it.
    pub padding: f64,
    pub legend: Option<LegendGeometry>,
}

/// The fully resolved set of pixel boxes and derived constants for one render
/// pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    /// Global canvas size, including margins.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub square: SquareGeometry,
    pub heatmap: HeatmapGeometry,
    pub histogram: Option<HistogramGeometry>,
    pub cols_labels: Option<LabelStripGeometry>,
    pub rows_labels: Option<LabelStripGeometry>,
}
