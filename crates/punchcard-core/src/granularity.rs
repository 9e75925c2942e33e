use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Calendar unit used to step through a time range and to snap period boundaries.
///
/// Weeks start on Sunday, matching the row classification used by the yearly
/// profile (`Sn` is row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
    Hour,
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st exists for every in-range year")
}

fn month_first(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("the 1st exists for every in-range month")
}

impl Granularity {
    /// Snaps `dt` down to the start of the unit containing it.
    pub fn floor(self, dt: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Year => start_of_day(jan_first(dt.year())),
            Granularity::Month => start_of_day(month_first(dt.year(), dt.month())),
            Granularity::Week => {
                let back = i64::from(dt.date().weekday().num_days_from_sunday());
                start_of_day(dt.date()) - Duration::days(back)
            }
            Granularity::Day => start_of_day(dt.date()),
            Granularity::Hour => start_of_day(dt.date()) + Duration::hours(i64::from(dt.hour())),
        }
    }

    /// Start of the unit immediately after the one containing `dt`.
    ///
    /// `dt` is expected to be a unit boundary (the output of [`Granularity::floor`]);
    /// arbitrary datetimes are floored first.
    pub fn next_start(self, dt: NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(dt);
        match self {
            Granularity::Year => start_of_day(jan_first(floored.year() + 1)),
            Granularity::Month => floored
                .checked_add_months(Months::new(1))
                .expect("month increment stays in range for chrono dates"),
            Granularity::Week => floored + Duration::days(7),
            Granularity::Day => floored + Duration::days(1),
            Granularity::Hour => floored + Duration::hours(1),
        }
    }

    /// Snaps `dt` up to the last representable instant of the unit containing it
    /// (millisecond resolution, like `moment().endOf(...)`).
    pub fn end(self, dt: NaiveDateTime) -> NaiveDateTime {
        self.next_start(dt) - Duration::milliseconds(1)
    }

    /// The unit boundaries in `[ceil(from), to)`, in ascending order.
    ///
    /// `d3.time*` range semantics: the first boundary is the smallest unit
    /// start `>= from`, and `to` itself is excluded.
    pub fn sequence(self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<NaiveDateTime> {
        let floored = self.floor(from);
        let mut t = if floored < from {
            self.next_start(floored)
        } else {
            floored
        };
        let mut out = Vec::new();
        while t < to {
            out.push(t);
            t = self.next_start(t);
        }
        out
    }

    /// Moves `dt` by `n` units (calendar-aware for months and years, with
    /// end-of-month clamping).
    pub fn advance(self, dt: NaiveDateTime, n: i64) -> NaiveDateTime {
        match self {
            Granularity::Year => shift_months(dt, n.saturating_mul(12)),
            Granularity::Month => shift_months(dt, n),
            Granularity::Week => dt + Duration::days(7 * n),
            Granularity::Day => dt + Duration::days(n),
            Granularity::Hour => dt + Duration::hours(n),
        }
    }

    /// Whole units between `earlier` and `later`, truncated toward zero.
    pub fn diff(self, later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
        match self {
            Granularity::Year => month_diff(later, earlier) / 12,
            Granularity::Month => month_diff(later, earlier),
            Granularity::Week => (later - earlier).num_days() / 7,
            Granularity::Day => (later - earlier).num_days(),
            Granularity::Hour => (later - earlier).num_hours(),
        }
    }
}

fn shift_months(dt: NaiveDateTime, months: i64) -> NaiveDateTime {
    let mag = u32::try_from(months.unsigned_abs()).expect("month shift magnitude fits in u32");
    let shifted = if months >= 0 {
        dt.checked_add_months(Months::new(mag))
    } else {
        dt.checked_sub_months(Months::new(mag))
    };
    shifted.expect("month arithmetic stays in range for chrono dates")
}

fn month_diff(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    let approx = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month() as i32 - earlier.month() as i32);
    // The raw year/month delta overshoots when the day-of-month (or time of
    // day) has not been reached yet; pull it back toward zero.
    if approx > 0 && shift_months(earlier, approx) > later {
        approx - 1
    } else if approx < 0 && shift_months(earlier, approx) < later {
        approx + 1
    } else {
        approx
    }
}
