//! Headless SVG writer: paints the binned data into an SVG document string
//! using the resolved [`Geometry`]. Every pass emits a complete document;
//! nothing is patched incrementally.

use crate::color::{LinearColorScale, linear_range};
use crate::labels::{LabelAxis, PreparedLabels, prepare_labels};
use crate::model::{Geometry, LegendGeometry, RegionBox};
use crate::{Error, Result};
use punchcard_core::config::Options;
use punchcard_core::{HeatmapData, HistogramData, Period};
use std::fmt::Write as _;

pub fn render_svg_document(
    options: &Options,
    period: &Period,
    heatmap: &HeatmapData,
    histogram: Option<&HistogramData>,
    geometry: &Geometry,
) -> Result<String> {
    let tooltip = options.tooltip.formats();
    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="container-heatmap" width="{}" height="{}">"#,
        fmt(geometry.width),
        fmt(geometry.height)
    );

    if options.frame {
        render_frame(&mut out, options, geometry);
    }
    if options.debug {
        render_blueprints(&mut out, geometry);
    }

    // Heatmap cells.
    let color = LinearColorScale::new(
        heatmap.scale,
        &options.colors.scale[0],
        &options.colors.scale[1],
    )?;
    let square = geometry.square;
    let l = geometry.heatmap.rect.left;
    let t = geometry.heatmap.rect.top;
    out.push_str(r#"<g class="heatmap">"#);
    out.push('\n');
    for cell in &heatmap.cells {
        let x = cell.column_index as f64 * square.step_x() + l;
        let y = cell.row_index as f64 * square.step_y() + t;
        let _ = write!(
            &mut out,
            r#"<rect class="cell" width="{}" height="{}" fill="{}" x="{}" y="{}""#,
            fmt(square.width),
            fmt(square.height),
            color.at(cell.value),
            fmt(x),
            fmt(y)
        );
        match tooltip {
            Some(formats) => {
                let tag = crate::labels::format_date(cell.date, &formats.heatmap);
                let _ = writeln!(
                    &mut out,
                    "><title>{} {}</title></rect>",
                    fmt(cell.value),
                    escape_xml(&tag)
                );
            }
            None => out.push_str(" />\n"),
        }
    }
    out.push_str("</g>\n");

    if options.legend {
        if let Some(legend) = &geometry.heatmap.legend {
            render_legend(&mut out, heatmap.scale, legend, options)?;
        }
    }
    if options.labels.cols.is_enabled() {
        render_cols_labels(&mut out, options, period, heatmap, geometry);
    }
    if options.labels.rows.is_enabled() {
        render_rows_labels(&mut out, options, period, heatmap, geometry);
    }

    if options.histogram {
        let data = histogram.ok_or_else(|| Error::InvalidModel {
            message: "histogram is enabled but no histogram data was supplied".to_string(),
        })?;
        let hist_geometry = geometry.histogram.as_ref().ok_or_else(|| {
            Error::missing_geometry("histogram")
        })?;
        render_histogram(&mut out, options, data, hist_geometry, tooltip)?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn render_histogram(
    out: &mut String,
    options: &Options,
    data: &HistogramData,
    geometry: &crate::model::HistogramGeometry,
    tooltip: Option<&punchcard_core::TooltipFormats>,
) -> Result<()> {
    let color = LinearColorScale::new(
        data.scale,
        &options.colors.scale[0],
        &options.colors.scale[1],
    )?;
    let square_width = options.geometry.square.width;
    let step_x = square_width + options.geometry.square.padding;
    let rect = geometry.rect;
    let span = (data.scale[1] - data.scale[0]).abs();

    out.push_str(r#"<g class="histogram">"#);
    out.push('\n');
    for column in &data.columns {
        let bar_height = if span == 0.0 {
            0.0
        } else {
            rect.height * (column.value - data.scale[0]).abs() / span
        };
        let x = column.index as f64 * step_x + rect.left;
        let y = rect.top + rect.height - bar_height;
        let _ = write!(
            out,
            r#"<rect class="bar" width="{}" height="{}" fill="{}" x="{}" y="{}""#,
            fmt(square_width),
            fmt(bar_height),
            color.at(column.value),
            fmt(x),
            fmt(y)
        );
        match tooltip {
            Some(formats) => {
                let tag = crate::labels::format_date(column.date, &formats.histogram);
                let _ = writeln!(
                    out,
                    "><title>{} {}</title></rect>",
                    fmt(column.value),
                    escape_xml(&tag)
                );
            }
            None => out.push_str(" />\n"),
        }
    }
    out.push_str("</g>\n");

    if options.legend {
        if let Some(legend) = &geometry.legend {
            render_legend(out, data.scale, legend, options)?;
        }
    }
    Ok(())
}

/// Vertical color ramp from the scale maximum (top) down to the minimum, one
/// 1-px step per pixel of legend height, with the bound values as labels.
fn render_legend(
    out: &mut String,
    scale: [f64; 2],
    legend: &LegendGeometry,
    options: &Options,
) -> Result<()> {
    let color = LinearColorScale::new(scale, &options.colors.scale[0], &options.colors.scale[1])?;
    let rect = legend.rect;
    let steps = rect.height.round().max(1.0) as usize;
    let ramp = linear_range(scale[1], scale[0], steps);

    out.push_str(r#"<g class="legend">"#);
    out.push('\n');
    for (i, value) in ramp.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<rect class="legend-step" width="{}" height="1" x="{}" y="{}" fill="{}" />"#,
            fmt(legend.bar_width),
            fmt(rect.left),
            fmt(i as f64 + rect.top),
            color.at(*value)
        );
    }
    let label_x = rect.left + legend.bar_width + legend.label_padding;
    let _ = writeln!(
        out,
        r#"<text class="high" font-size="{}" x="{}" y="{}">{}</text>"#,
        fmt(options.font_size),
        fmt(label_x),
        fmt(options.font_size + rect.top),
        fmt(scale[1])
    );
    let _ = writeln!(
        out,
        r#"<text class="low" font-size="{}" x="{}" y="{}">{}</text>"#,
        fmt(options.font_size),
        fmt(label_x),
        fmt(rect.height + rect.top),
        fmt(scale[0])
    );
    out.push_str("</g>\n");
    Ok(())
}

fn render_cols_labels(
    out: &mut String,
    options: &Options,
    period: &Period,
    heatmap: &HeatmapData,
    geometry: &Geometry,
) {
    let Some(strip) = &geometry.cols_labels else {
        return;
    };
    let Some(prepared) = prepare_labels(
        &options.labels.cols,
        LabelAxis::Cols,
        period,
        heatmap,
        &options.colors,
    ) else {
        return;
    };
    let rect = strip.rect;

    out.push_str(r#"<g class="cols-labels">"#);
    out.push('\n');
    if let Some(separator) = &prepared.separator {
        // Separators run from the heatmap top down to the histogram bottom
        // when one is drawn, otherwise to the strip bottom.
        let y1 = geometry.heatmap.rect.top;
        let y2 = geometry
            .histogram
            .as_ref()
            .map(|h| h.rect.bottom())
            .unwrap_or_else(|| rect.bottom());
        for datum in &prepared.data {
            let x = label_offset(&prepared, datum.index, rect.width) + rect.left;
            let _ = writeln!(
                out,
                r#"<line stroke="{}" stroke-width="{}" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                escape_attr(&separator.color),
                fmt(separator.thickness),
                fmt(x),
                fmt(y1),
                fmt(x),
                fmt(y2)
            );
        }
    }
    let nudge = if prepared.separator.is_some() { 1.0 } else { 0.0 };
    for datum in &prepared.data {
        let x = label_offset(&prepared, datum.index, rect.width) + rect.left + nudge;
        let _ = writeln!(
            out,
            r#"<text class="col-label" font-size="{}" x="{}" y="{}">{}</text>"#,
            fmt(options.font_size),
            fmt(x),
            fmt(rect.bottom()),
            escape_xml(&datum.text)
        );
    }
    out.push_str("</g>\n");
}

fn render_rows_labels(
    out: &mut String,
    options: &Options,
    period: &Period,
    heatmap: &HeatmapData,
    geometry: &Geometry,
) {
    let Some(strip) = &geometry.rows_labels else {
        return;
    };
    let Some(prepared) = prepare_labels(
        &options.labels.rows,
        LabelAxis::Rows,
        period,
        heatmap,
        &options.colors,
    ) else {
        return;
    };
    let rect = strip.rect;

    out.push_str(r#"<g class="rows-labels">"#);
    out.push('\n');
    if let Some(separator) = &prepared.separator {
        for datum in &prepared.data {
            let y = label_offset(&prepared, datum.index, rect.height) + rect.top;
            let _ = writeln!(
                out,
                r#"<line stroke="{}" stroke-width="{}" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                escape_attr(&separator.color),
                fmt(separator.thickness),
                fmt(rect.left),
                fmt(y),
                fmt(geometry.heatmap.rect.left),
                fmt(y)
            );
        }
    }
    for datum in &prepared.data {
        let y = label_offset(&prepared, datum.index, rect.height)
            + rect.top
            + geometry.square.height;
        let _ = writeln!(
            out,
            r#"<text class="row-label" text-anchor="end" font-size="{}" x="{}" y="{}">{}</text>"#,
            fmt(options.font_size),
            fmt(rect.left + strip.label_width),
            fmt(y),
            escape_xml(&datum.text)
        );
    }
    out.push_str("</g>\n");
}

fn render_frame(out: &mut String, options: &Options, geometry: &Geometry) {
    let _ = writeln!(
        out,
        r#"<rect class="frame" stroke="{}" fill-opacity="0" stroke-width="1" width="{}" height="{}" x="0" y="0" />"#,
        escape_attr(&options.colors.frame),
        fmt(geometry.width),
        fmt(geometry.height)
    );
}

/// Dashed outlines of every resolved box; a visual check of the layout pass.
fn render_blueprints(out: &mut String, geometry: &Geometry) {
    out.push_str(
        r#"<g class="blueprints" stroke="blue" stroke-opacity="0.5" fill-opacity="0" stroke-width="2" stroke-dasharray="5,5">"#,
    );
    out.push('\n');
    blueprint_rect(
        out,
        &RegionBox {
            left: 0.0,
            top: 0.0,
            width: geometry.width,
            height: geometry.height,
        },
    );
    blueprint_rect(out, &geometry.heatmap.rect);
    if let Some(legend) = &geometry.heatmap.legend {
        blueprint_rect(out, &legend.rect);
    }
    if let Some(histogram) = &geometry.histogram {
        blueprint_rect(out, &histogram.rect);
        if let Some(legend) = &histogram.legend {
            blueprint_rect(out, &legend.rect);
        }
    }
    if let Some(strip) = &geometry.cols_labels {
        blueprint_rect(out, &strip.rect);
    }
    if let Some(strip) = &geometry.rows_labels {
        blueprint_rect(out, &strip.rect);
    }
    out.push_str("</g>\n");
}

fn blueprint_rect(out: &mut String, rect: &RegionBox) {
    let _ = writeln!(
        out,
        r#"<rect width="{}" height="{}" x="{}" y="{}" />"#,
        fmt(rect.width),
        fmt(rect.height),
        fmt(rect.left),
        fmt(rect.top)
    );
}

fn label_offset(prepared: &PreparedLabels, index: usize, extent: f64) -> f64 {
    extent * index as f64 / prepared.len as f64
}

/// JS-compatible shortest float formatting for SVG attributes and text.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v == 0.0 { 0.0 } else { v };
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
