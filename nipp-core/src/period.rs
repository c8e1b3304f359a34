use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar quarter, parsed from the published `"Q<n> <year>"` labels.
///
/// Ordering is chronological: year first, then quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub quarter: u32,
}

impl Period {
    pub fn new(year: i32, quarter: u32) -> Option<Period> {
        (1..=4).contains(&quarter).then_some(Period { year, quarter })
    }

    /// Parse a `"Q<n> <year>"` label. The label must be exactly two tokens
    /// separated by a single space.
    pub fn parse_quarter_year(label: &str) -> Result<Period> {
        let format_error = || Error::PeriodFormat {
            label: label.to_string(),
        };
        let (quarter, year) = label.split_once(' ').ok_or_else(format_error)?;
        if quarter.is_empty() || year.is_empty() || year.contains(' ') {
            return Err(format_error());
        }
        let quarter = quarter
            .strip_prefix('Q')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(format_error)?;
        let year = year.parse::<i32>().map_err(|_| format_error())?;
        Period::new(year, quarter).ok_or_else(format_error)
    }

    /// Monotonic numeric key: `year * 4 + quarter`.
    pub fn sort_key(&self) -> i64 {
        i64::from(self.year) * 4 + i64::from(self.quarter)
    }

    /// `"Q1 2020"`
    pub fn quarter_year_label(&self) -> String {
        format!("Q{} {}", self.quarter, self.year)
    }

    /// `"2020 Q1"`, sortable lexicographically for four-digit years.
    pub fn year_quarter_label(&self) -> String {
        format!("{} Q{}", self.year, self.quarter)
    }

    /// First calendar day of the quarter.
    pub fn quarter_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, (self.quarter - 1) * 3 + 1, 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quarter_year_label())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Period::parse_quarter_year(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Period;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn test_parse_quarter_year() {
        let period = Period::parse_quarter_year("Q3 2021").unwrap();
        assert_eq!(period, Period { year: 2021, quarter: 3 });
        assert_eq!(period.year_quarter_label(), "2021 Q3");
        assert_eq!(period.to_string(), "Q3 2021");
    }

    #[test]
    fn test_rejects_malformed_labels() {
        for label in [
            "Q1",
            "Q1  2020",
            "Q1 2020 extra",
            " Q1 2020",
            "Q5 2020",
            "Q0 2020",
            "1 2020",
            "Q1 twenty",
            "",
        ] {
            assert!(
                Period::parse_quarter_year(label).is_err(),
                "{label:?} should not parse"
            );
        }
    }

    #[test]
    fn test_sort_key_follows_calendar() {
        let a: Period = "Q1 2020".parse().unwrap();
        let b: Period = "Q4 2020".parse().unwrap();
        let c: Period = "Q1 2021".parse().unwrap();
        assert!(a.sort_key() < b.sort_key());
        assert!(b.sort_key() < c.sort_key());
        assert_eq!(c.sort_key() - b.sort_key(), 1);
    }

    #[test]
    fn test_quarter_start() {
        let period = Period::new(2024, 2).unwrap();
        assert_eq!(
            period.quarter_start(),
            NaiveDate::from_ymd_opt(2024, 4, 1)
        );
        assert_eq!(
            Period::new(2005, 4).unwrap().quarter_start(),
            NaiveDate::from_ymd_opt(2005, 10, 1)
        );
    }

    proptest! {
        #[test]
        fn sort_key_orders_like_calendar(
            y1 in 1900i32..2100, q1 in 1u32..=4,
            y2 in 1900i32..2100, q2 in 1u32..=4,
        ) {
            let a = Period::parse_quarter_year(&format!("Q{q1} {y1}")).unwrap();
            let b = Period::parse_quarter_year(&format!("Q{q2} {y2}")).unwrap();
            prop_assert_eq!(a.sort_key().cmp(&b.sort_key()), (y1, q1).cmp(&(y2, q2)));
            prop_assert_eq!(
                a.year_quarter_label().cmp(&b.year_quarter_label()),
                (y1, q1).cmp(&(y2, q2))
            );
        }
    }
}
