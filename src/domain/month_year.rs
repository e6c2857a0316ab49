use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar month, rendered externally as `MM-YYYY`.
///
/// The store keeps a full `DATE`, always pinned to the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    pub fn parse(value: &str) -> Result<MonthYear, String> {
        let bytes = value.as_bytes();
        let is_well_formed = bytes.len() == 7
            && bytes[2] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(index, byte)| index == 2 || byte.is_ascii_digit());

        if !is_well_formed {
            return Err(format!("{} is not a valid MM-YYYY date", value));
        }

        let month: u32 = value[..2]
            .parse()
            .map_err(|_| format!("{} has an invalid month", value))?;
        let year: i32 = value[3..]
            .parse()
            .map_err(|_| format!("{} has an invalid year", value))?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| format!("{} is not a valid MM-YYYY date", value))
    }

    /// Drops the day component of a stored date.
    pub fn from_date(date: NaiveDate) -> MonthYear {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.0.month(), self.0.year())
    }
}

impl serde::Serialize for MonthYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
