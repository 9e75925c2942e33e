use crate::error::{Error, Result};
use crate::granularity::Granularity;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The covered time span, snapped to column/cell granularity boundaries.
///
/// `from` is the first instant of the first cell; `to` is the last
/// representable instant of the last cell (millisecond resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// Cell and column granularities of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GranularitySpec {
    pub cell: Granularity,
    pub col: Granularity,
}

/// Period length used to derive a missing endpoint: a bare number of days, or
/// an `[n, granularity]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    Days(i64),
    Span(i64, Granularity),
}

impl RangeSpec {
    fn apply(self, anchor: NaiveDateTime, direction: i64) -> NaiveDateTime {
        match self {
            RangeSpec::Days(n) => Granularity::Day.advance(anchor, direction * n),
            RangeSpec::Span(n, unit) => unit.advance(anchor, direction * n),
        }
    }
}

/// Caller-facing period configuration. Endpoints may be partially specified;
/// [`PeriodOptions::resolve`] fills the gaps and snaps the boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodOptions {
    #[serde(default, with = "opt_datetime")]
    pub from: Option<NaiveDateTime>,
    #[serde(default, with = "opt_datetime")]
    pub to: Option<NaiveDateTime>,
    pub range: Option<RangeSpec>,
    pub granularity: GranularitySpec,
}

impl PeriodOptions {
    /// Resolves the configured period against `today`:
    ///
    /// - with neither endpoint set, `to` defaults to `today` at midnight;
    /// - a missing endpoint is derived from the other one via `range`;
    /// - both endpoints snap outward to the column granularity and then to the
    ///   cell granularity (start-of for `from`, end-of for `to`).
    pub fn resolve(&self, today: NaiveDate) -> Result<Period> {
        let mut from = self.from;
        let mut to = self.to;

        if from.is_none() && to.is_none() {
            to = Some(today.and_time(NaiveTime::MIN));
        }
        if from.is_none() || to.is_none() {
            let range = self.range.ok_or_else(|| {
                Error::invalid_options("period.range is required when an endpoint is missing")
            })?;
            if from.is_none() {
                from = to.map(|t| range.apply(t, -1));
            }
            if to.is_none() {
                to = from.map(|f| range.apply(f, 1));
            }
        }
        let (Some(from), Some(to)) = (from, to) else {
            return Err(Error::invalid_options(
                "period endpoints could not be resolved",
            ));
        };

        let col = self.granularity.col;
        let cell = self.granularity.cell;
        let from = cell.floor(col.floor(from));
        let to = cell.end(col.end(to));

        if from > to {
            return Err(Error::degenerate_period(format!(
                "period start {from} is after period end {to}"
            )));
        }
        Ok(Period { from, to })
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// ISO-ish (de)serialization for optional datetimes; accepts `2024-03-01`,
/// `2024-03-01T08:30:00` and a space-separated variant.
mod opt_datetime {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => super::parse_datetime(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unrecognized datetime: {s:?}"))),
        }
    }
}
