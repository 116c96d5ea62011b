//! Maturity windows: the calendar span during which a variety ripens.
//!
//! A window is two day/month pairs with no year. A window may wrap past the
//! end of the year (e.g. 15/11 to 10/02); nothing here treats that case
//! specially.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Ripening window of a variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityPeriod {
    pub start_day: u8,
    pub start_month: u8,
    pub end_day: u8,
    pub end_month: u8,
}

impl MaturityPeriod {
    /// Build a period from the four nullable persistence columns.
    ///
    /// Returns `None` unless all four are present and non-zero.
    pub fn from_columns(
        start_day: Option<u8>,
        start_month: Option<u8>,
        end_day: Option<u8>,
        end_month: Option<u8>,
    ) -> Option<Self> {
        match (start_day, start_month, end_day, end_month) {
            (Some(sd), Some(sm), Some(ed), Some(em)) if sd > 0 && sm > 0 && ed > 0 && em > 0 => {
                Some(Self {
                    start_day: sd,
                    start_month: sm,
                    end_day: ed,
                    end_month: em,
                })
            }
            _ => None,
        }
    }

    /// Sort key: month first, then day.
    pub fn start_key(&self) -> (u8, u8) {
        (self.start_month, self.start_day)
    }

    /// Display as `dd/mm au dd/mm`.
    pub fn display_range(&self) -> String {
        format!(
            "{:02}/{:02} au {:02}/{:02}",
            self.start_day, self.start_month, self.end_day, self.end_month
        )
    }
}

/// Compare two optional windows by start date, month-major, day-minor.
///
/// A missing window sorts as `(0, 0)`, i.e. before every dated one.
pub fn compare_start(a: Option<&MaturityPeriod>, b: Option<&MaturityPeriod>) -> Ordering {
    let key = |p: Option<&MaturityPeriod>| p.map(MaturityPeriod::start_key).unwrap_or((0, 0));
    key(a).cmp(&key(b))
}

/// Stable sort of arbitrary items by their maturity start.
pub fn sort_by_maturity<T, F>(items: &mut [T], period_of: F)
where
    F: Fn(&T) -> Option<&MaturityPeriod>,
{
    items.sort_by(|a, b| compare_start(period_of(a), period_of(b)));
}
