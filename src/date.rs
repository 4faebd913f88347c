use crate::error::DateError;
use chrono::{Local, NaiveDate, Utc};
use core::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

/// A calendar day used to compute calendar tag values.
///
/// ```
/// use calver::Date;
///
/// let explicit = Date::explicit(2021, 2, 3).unwrap();
/// let parsed: Date = "2021-02-03".parse().unwrap();
/// assert_eq!(explicit, parsed);
///
/// let utc_now = Date::utc_now();
/// let local_now = Date::local_now();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(NaiveDate);

impl Date {
    /// Returns a new [Date] representing the current date in UTC at the time of this call.
    pub fn utc_now() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Returns a new [Date] representing the current date in the system's local timezone at the
    /// time of this call.
    pub fn local_now() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns result of a new [Date] representing the given date, or
    /// [DateError::InvalidDateArguments].
    pub fn explicit(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::InvalidDateArguments { year, month, day })
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date string into a [Date]. The string must be in the format `YYYY-MM-DD`.
    ///
    /// See [NaiveDate::from_str].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(NaiveDate::from_str(s)?))
    }
}

impl Deref for Date {
    type Target = NaiveDate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where "today" comes from when incrementing calendar tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The current date in UTC.
    #[default]
    Utc,
    /// The current date in the system's local timezone.
    Local,
}

impl Clock {
    /// Reads the current date from this clock.
    pub fn today(&self) -> Date {
        match self {
            Clock::Utc => Date::utc_now(),
            Clock::Local => Date::local_now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rstest::rstest;

    #[rstest]
    #[case("2021-02-03", true)]
    #[case("2021-2-3", true)]
    #[case("2021-02-30", false)] // February 30th doesn't exist
    #[case("yesterday", false)]
    fn test_date_from_str(#[case] date_str: &str, #[case] passes: bool) {
        let date = Date::from_str(date_str);
        if passes {
            assert!(date.is_ok());
        } else {
            assert!(matches!(date, Err(DateError::UnparseableDate { .. })));
        }
    }

    #[rstest]
    #[case(2021, 2, 3, true)]
    #[case(2021, 2, 30, false)]
    #[case(2024, 2, 29, true)] // leap day
    #[case(2023, 2, 29, false)]
    fn test_date_explicit(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] passes: bool,
    ) {
        let date = Date::explicit(year, month, day);
        if passes {
            let date = date.unwrap();
            assert_eq!((year, month, day), (date.year(), date.month(), date.day()));
        } else {
            assert_eq!(
                Err(DateError::InvalidDateArguments { year, month, day }),
                date
            );
        }
    }

    #[test]
    fn test_display() {
        let date = Date::explicit(2024, 1, 2).unwrap();
        assert_eq!("2024-01-02", date.to_string());
    }

    #[test]
    fn test_default_clock_is_utc() {
        assert_eq!(Clock::Utc, Clock::default());
    }
}
