//! The binner: turns raw timestamped records into a dense calendar cell grid
//! plus per-column aggregates.

use crate::adapter::{BinContext, CellRef, RawRecord, RecordAdapter};
use crate::config::{Options, ScaleBounds};
use crate::error::{Error, Result};
use crate::period::Period;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One atomic grid unit: a single time bucket and its accumulated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    /// Dense time-ordered index, `[0, total_cells)`.
    pub index: usize,
    pub column_index: usize,
    pub row_index: usize,
    #[serde(skip)]
    pub date: NaiveDateTime,
    pub value: f64,
}

/// Sum of all cells sharing a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnAggregate {
    pub index: usize,
    #[serde(skip)]
    pub date: NaiveDateTime,
    pub value: f64,
}

/// Row/column counts of the grid; all the layout pass consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub cols: usize,
    pub rows: usize,
}

/// Dense gap-free grid covering the snapped period, with the resolved value
/// scale.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapData {
    pub cells: Vec<Cell>,
    /// Column starts in time order.
    pub columns: Vec<NaiveDateTime>,
    /// Row keys, top to bottom.
    pub rows: Vec<String>,
    pub scale: [f64; 2],
}

impl HeatmapData {
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            cols: self.columns.len(),
            rows: self.rows.len(),
        }
    }

    /// Sum of all cell values.
    pub fn total(&self) -> f64 {
        self.cells.iter().map(|c| c.value).sum()
    }
}

/// Column aggregates plus their own resolved value scale.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData {
    pub columns: Vec<ColumnAggregate>,
    pub scale: [f64; 2],
}

impl HistogramData {
    pub fn total(&self) -> f64 {
        self.columns.iter().map(|c| c.value).sum()
    }
}

/// Builds the dense cell grid for `period` and accumulates `records` into it.
///
/// Every cell starts at zero; each record's value is added (not overwritten)
/// into the cell its [`CellRef`] resolves to, so records sharing a cell sum
/// up. Records that do not resolve onto the grid are dropped without failing
/// the pass; the drop is reported through `tracing`.
pub fn bin_heatmap(
    records: &[RawRecord],
    adapter: &dyn RecordAdapter,
    options: &Options,
    period: &Period,
) -> Result<HeatmapData> {
    let ctx = BinContext {
        period,
        cell: options.period.granularity.cell,
        col: options.period.granularity.col,
    };

    let columns = ctx.col.sequence(period.from, period.to);
    if columns.is_empty() {
        return Err(Error::degenerate_period(format!(
            "column granularity produces no steps between {} and {}",
            period.from, period.to
        )));
    }
    let dates = ctx.cell.sequence(period.from, period.to);
    if dates.is_empty() {
        return Err(Error::degenerate_period(format!(
            "cell granularity produces no steps between {} and {}",
            period.from, period.to
        )));
    }
    let rows = options.rows.clone();
    if rows.is_empty() {
        return Err(Error::invalid_options("rows must not be empty"));
    }

    let mut cells = Vec::with_capacity(dates.len());
    let mut column_index = 0usize;
    for (index, date) in dates.into_iter().enumerate() {
        while column_index + 1 < columns.len() && columns[column_index + 1] <= date {
            column_index += 1;
        }
        let row_index = adapter.row_index(date, &ctx);
        if row_index >= rows.len() {
            return Err(Error::invalid_options(format!(
                "adapter classified {date} into row {row_index}, but only {} rows are configured",
                rows.len()
            )));
        }
        cells.push(Cell {
            index,
            column_index,
            row_index,
            date,
            value: 0.0,
        });
    }

    for record in records {
        let cell_ref = adapter.resolve(record, &ctx);
        match resolve_index(&cell_ref, &columns, &rows) {
            Some(index) if index < cells.len() => cells[index].value += cell_ref.value,
            _ => {
                tracing::warn!(
                    date = %record.date,
                    value = record.value,
                    "record does not map onto the grid; dropped"
                );
            }
        }
    }

    let scale = resolve_scale(options.scale, cells.iter().map(|c| c.value));
    Ok(HeatmapData {
        cells,
        columns,
        rows,
        scale,
    })
}

/// Derives the per-column aggregates from an already-binned grid.
pub fn bin_histogram(heatmap: &HeatmapData, bounds: ScaleBounds) -> HistogramData {
    let mut columns: Vec<ColumnAggregate> = heatmap
        .columns
        .iter()
        .enumerate()
        .map(|(index, date)| ColumnAggregate {
            index,
            date: *date,
            value: 0.0,
        })
        .collect();
    for cell in &heatmap.cells {
        columns[cell.column_index].value += cell.value;
    }
    let scale = resolve_scale(bounds, columns.iter().map(|c| c.value));
    HistogramData { columns, scale }
}

/// Index-resolution precedence: a direct `index` wins; otherwise a
/// column/row pair (given directly or located by value) maps to the
/// time-ordered dense index `column_index * rows + row_index`.
fn resolve_index(cell_ref: &CellRef, columns: &[NaiveDateTime], rows: &[String]) -> Option<usize> {
    if let Some(index) = cell_ref.index {
        return usize::try_from(index).ok();
    }
    let column_index = match cell_ref.column_index {
        Some(ci) => usize::try_from(ci).ok(),
        None => cell_ref
            .column
            .and_then(|col| columns.iter().position(|c| *c == col)),
    }?;
    let row_index = match cell_ref.row_index {
        Some(ri) => usize::try_from(ri).ok(),
        None => cell_ref
            .row
            .as_deref()
            .and_then(|row| rows.iter().position(|r| r == row)),
    }?;
    if column_index >= columns.len() || row_index >= rows.len() {
        return None;
    }
    Some(column_index * rows.len() + row_index)
}

/// Fills unset scale bounds with the true min/max of `values`.
fn resolve_scale(bounds: ScaleBounds, values: impl Iterator<Item = f64> + Clone) -> [f64; 2] {
    let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
    let min = bounds[0]
        .unwrap_or_else(|| finite_or_zero(values.clone().fold(f64::INFINITY, f64::min)));
    let max =
        bounds[1].unwrap_or_else(|| finite_or_zero(values.fold(f64::NEG_INFINITY, f64::max)));
    [min, max]
}
