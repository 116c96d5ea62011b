//! French long-form dates for display ("10 juin 2024").

use chrono::{Datelike, NaiveDate};

use crate::types::Timestamp;

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// `10 juin 2024`. The day is not zero-padded.
pub fn format_long_date(date: NaiveDate) -> String {
    // month0() is always 0..12
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Long date of a UTC timestamp.
pub fn format_timestamp(ts: Timestamp) -> String {
    format_long_date(ts.date_naive())
}

/// `Du 1 juin 2024 au 3 juin 2024`.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("Du {} au {}", format_long_date(start), format_long_date(end))
}
