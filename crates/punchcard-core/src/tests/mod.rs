use chrono::NaiveDateTime;

mod config;

pub(crate) fn dt(raw: &str) -> NaiveDateTime {
    crate::period::parse_datetime(raw).expect("test datetime must parse")
}
