//! Person domain types.

use chrono::{Local, NaiveDateTime, Timelike};

/// Wire format of `Person::timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub person_id: i64,
    pub fname: String,
    pub lname: String,
    pub timestamp: NaiveDateTime,
}

/// Candidate record for create. The store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPerson {
    pub fname: String,
    pub lname: String,
}

/// Fields an update may change. Last name and id are fixed once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonUpdate {
    pub fname: String,
}

/// Current local wall-clock time truncated to whole seconds.
pub fn now_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timestamp_uses_space_separated_seconds_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-05 07:08:09");
    }

    #[test]
    fn now_has_no_fractional_seconds() {
        assert_eq!(now_timestamp().nanosecond(), 0);
    }
}
