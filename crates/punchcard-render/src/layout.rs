//! The layout engine: resolves the full [`Geometry`] from the configured
//! options and the grid's row/column counts.
//!
//! Resolution is dependency-ordered (sizes before positions, positions before
//! the canvas size) and pure: identical inputs yield bit-identical geometry.

use crate::model::{
    Geometry, HeatmapGeometry, HistogramGeometry, LabelStripGeometry, LegendGeometry, Margin,
    RegionBox, SquareGeometry,
};
use crate::{Error, Result};
use punchcard_core::config::{LabelBoxOptions, LegendGeometryOptions, MarginOptions, Options};
use punchcard_core::GridDimensions;

pub fn compute_geometry(options: &Options, dims: GridDimensions) -> Result<Geometry> {
    if dims.cols == 0 || dims.rows == 0 {
        return Err(Error::InvalidModel {
            message: format!("grid must have rows and columns, got {dims:?}"),
        });
    }

    let geometry = &options.geometry;

    // 1. Margin shorthand normalization.
    let margin = resolve_margin(geometry.margin);
    let square = SquareGeometry {
        width: geometry.square.width,
        height: geometry.square.height,
        padding: geometry.square.padding,
    };

    // 2. Heatmap box size, unless pinned.
    let cols = dims.cols as f64;
    let rows = dims.rows as f64;
    let heatmap_width = geometry
        .heatmap
        .rect
        .width
        .unwrap_or(cols * square.step_x() - square.padding);
    let heatmap_height = geometry
        .heatmap
        .rect
        .height
        .unwrap_or(rows * square.step_y() - square.padding);

    // 3. Histogram always shares the heatmap width; only height/padding are its
    // own.
    let histogram_opts = if options.histogram {
        Some(geometry.histogram.as_ref().ok_or_else(|| {
            Error::missing_geometry("histogram")
        })?)
    } else {
        None
    };
    let histogram_height = histogram_opts
        .map(|h| h.rect.height.unwrap_or(0.0))
        .unwrap_or(0.0);
    let histogram_padding = histogram_opts
        .map(|h| h.rect.padding.unwrap_or(0.0))
        .unwrap_or(0.0);

    // 4. Legend sizes mirror the box they annotate.
    let heatmap_legend_size = if options.legend {
        let legend = geometry.heatmap.legend.as_ref().ok_or_else(|| {
            Error::missing_geometry("heatmap legend")
        })?;
        Some(legend_size(legend, square.width, heatmap_height))
    } else {
        None
    };
    let histogram_legend_size = match (options.legend, histogram_opts) {
        (true, Some(histogram)) => {
            let legend = histogram.legend.as_ref().ok_or_else(|| {
                Error::missing_geometry("histogram legend")
            })?;
            Some(legend_size(legend, square.width, histogram_height))
        }
        _ => None,
    };

    // 5. Label strip sizes.
    let cols_strip_opts = label_strip_opts(options, "cols")?;
    let rows_strip_opts = label_strip_opts(options, "rows")?;
    let cols_strip_size = cols_strip_opts.map(|o| {
        (
            heatmap_width,
            o.label.height,
            o.rect.padding.unwrap_or(0.0),
            o,
        )
    });
    let rows_strip_size = rows_strip_opts.map(|o| {
        (
            o.label.width,
            heatmap_height,
            o.rect.padding.unwrap_or(0.0),
            o,
        )
    });

    // 6. Positioning: top-to-bottom with a running vertical cursor, the heatmap
    // shifted right past the row-label strip when present.
    let mut heatmap_left = margin.left;
    if let Some((width, _, padding, _)) = rows_strip_size {
        heatmap_left += width + padding;
    }
    let heatmap_rect = RegionBox {
        left: heatmap_left,
        top: margin.top,
        width: heatmap_width,
        height: heatmap_height,
    };
    let mut h = heatmap_rect.bottom();

    let cols_labels = cols_strip_size.map(|(width, height, padding, opts)| {
        let rect = RegionBox {
            left: heatmap_rect.left,
            top: h + padding,
            width,
            height,
        };
        h = rect.bottom();
        LabelStripGeometry {
            rect,
            padding,
            label_width: opts.label.width,
            label_height: opts.label.height,
        }
    });
    let rows_labels = rows_strip_size.map(|(width, height, padding, opts)| LabelStripGeometry {
        rect: RegionBox {
            left: margin.left,
            top: heatmap_rect.top,
            width,
            height,
        },
        padding,
        label_width: opts.label.width,
        label_height: opts.label.height,
    });

    let histogram = histogram_opts.map(|_| {
        let rect = RegionBox {
            left: heatmap_rect.left,
            top: h + histogram_padding,
            width: heatmap_width,
            height: histogram_height,
        };
        h = rect.bottom();
        let legend = histogram_legend_size.map(|size| place_legend(size, &rect));
        HistogramGeometry {
            rect,
            padding: histogram_padding,
            legend,
        }
    });

    let heatmap = HeatmapGeometry {
        rect: heatmap_rect,
        legend: heatmap_legend_size.map(|size| place_legend(size, &heatmap_rect)),
    };

    // 7. Global canvas size, unless pinned by the caller.
    let width = geometry.width.unwrap_or_else(|| {
        let mut width = heatmap_rect.width + margin.left + margin.right;
        if let Some((strip_width, _, padding, _)) = rows_strip_size {
            width += strip_width + padding;
        }
        if let Some(size) = heatmap_legend_size {
            let mut legend_extent = size.width + size.box_padding;
            if let Some(size) = histogram_legend_size {
                legend_extent = legend_extent.max(size.width + size.box_padding);
            }
            width += legend_extent;
        }
        width
    });
    let height = geometry.height.unwrap_or_else(|| {
        let mut height = heatmap_rect.height + margin.top + margin.bottom;
        if let Some(labels) = &cols_labels {
            height += labels.rect.height + labels.padding;
        }
        if let Some(histogram) = &histogram {
            height += histogram.rect.height + histogram.padding;
        }
        height
    });

    let geometry = Geometry {
        width,
        height,
        margin,
        square,
        heatmap,
        histogram,
        cols_labels,
        rows_labels,
    };
    tracing::debug!(geometry = ?geometry, "resolved chart geometry");
    Ok(geometry)
}

fn resolve_margin(margin: MarginOptions) -> Margin {
    match margin {
        MarginOptions::Uniform(m) => Margin {
            top: m,
            right: m,
            bottom: m,
            left: m,
        },
        MarginOptions::Sides {
            top,
            right,
            bottom,
            left,
        } => Margin {
            top,
            right,
            bottom,
            left,
        },
    }
}

/// Legend extents before placement: the bar is one cell square wide, the box
/// adds padding and the label column, the height mirrors the annotated box.
#[derive(Debug, Clone, Copy)]
struct LegendSize {
    width: f64,
    height: f64,
    bar_width: f64,
    box_padding: f64,
    label_padding: f64,
    label_width: f64,
}

fn legend_size(options: &LegendGeometryOptions, bar_width: f64, annotated_height: f64) -> LegendSize {
    let box_padding = options.rect.padding.unwrap_or(0.0);
    LegendSize {
        width: bar_width + box_padding + options.label.width,
        height: annotated_height,
        bar_width,
        box_padding,
        label_padding: options.label.padding,
        label_width: options.label.width,
    }
}

fn place_legend(size: LegendSize, annotated: &RegionBox) -> LegendGeometry {
    LegendGeometry {
        rect: RegionBox {
            left: annotated.right() + size.box_padding,
            top: annotated.top,
            width: size.width,
            height: size.height,
        },
        bar_width: size.bar_width,
        box_padding: size.box_padding,
        label_padding: size.label_padding,
        label_width: size.label_width,
    }
}

fn label_strip_opts<'a>(options: &'a Options, which: &str) -> Result<Option<&'a LabelBoxOptions>> {
    let (setting, strip) = match which {
        "cols" => (
            &options.labels.cols,
            options.geometry.labels.as_ref().and_then(|l| l.cols.as_ref()),
        ),
        _ => (
            &options.labels.rows,
            options.geometry.labels.as_ref().and_then(|l| l.rows.as_ref()),
        ),
    };
    if !setting.is_enabled() {
        return Ok(None);
    }
    strip
        .map(Some)
        .ok_or_else(|| Error::missing_geometry(format!("{which} labels")))
}
