use crate::granularity::Granularity;
use crate::period::Period;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// An external data point: a timestamp and a value to accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    pub date: NaiveDateTime,
    pub value: f64,
}

impl RawRecord {
    pub fn new(date: NaiveDateTime, value: f64) -> Self {
        Self { date, value }
    }
}

/// Partial cell reference produced by a [`RecordAdapter`].
///
/// Resolution precedence (see [`crate::bin`]): `index` wins outright;
/// otherwise `column_index`/`row_index`, falling back to locating `column` in
/// the column sequence and `row` in the row key list by value equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellRef {
    pub index: Option<i64>,
    pub column_index: Option<i64>,
    pub column: Option<NaiveDateTime>,
    pub row_index: Option<i64>,
    pub row: Option<String>,
    pub value: f64,
}

/// Resolution context handed to adapters: the snapped period and the two
/// granularities of the grid.
#[derive(Debug, Clone, Copy)]
pub struct BinContext<'a> {
    pub period: &'a Period,
    pub cell: Granularity,
    pub col: Granularity,
}

/// Maps external records onto the grid and classifies cell dates into rows.
///
/// The built-in profiles ship [`YearlyAdapter`] and [`MonthlyAdapter`]; custom
/// data shapes plug in their own implementation.
pub trait RecordAdapter {
    /// Maps one record onto a partial cell reference.
    fn resolve(&self, record: &RawRecord, ctx: &BinContext<'_>) -> CellRef;

    /// Row index for a cell date (e.g. day-of-week, hour-of-day). Must be
    /// smaller than the configured row count for every date inside the period.
    fn row_index(&self, date: NaiveDateTime, ctx: &BinContext<'_>) -> usize;
}

/// Day cells in week columns; rows are days of the week, Sunday first.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearlyAdapter;

impl RecordAdapter for YearlyAdapter {
    fn resolve(&self, record: &RawRecord, ctx: &BinContext<'_>) -> CellRef {
        CellRef {
            index: Some(ctx.cell.diff(record.date, ctx.period.from)),
            value: record.value,
            ..CellRef::default()
        }
    }

    fn row_index(&self, date: NaiveDateTime, _ctx: &BinContext<'_>) -> usize {
        date.weekday().num_days_from_sunday() as usize
    }
}

/// Hour cells in day columns; rows are hours of the day.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyAdapter;

impl RecordAdapter for MonthlyAdapter {
    fn resolve(&self, record: &RawRecord, ctx: &BinContext<'_>) -> CellRef {
        CellRef {
            index: Some(ctx.cell.diff(record.date, ctx.period.from)),
            value: record.value,
            ..CellRef::default()
        }
    }

    fn row_index(&self, date: NaiveDateTime, _ctx: &BinContext<'_>) -> usize {
        date.hour() as usize
    }
}
