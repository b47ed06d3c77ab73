use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::error::{FinanceError, FinanceResult};

const MIN_YEAR: i32 = 1;

/// A calendar month, written `YYYY-MM`. Every monthly record is keyed by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Self {
        MonthKey { year, month }
    }

    /// Accepts only the strict `YYYY-MM` form: four digit year, two digit month.
    /// Year `0000` is refused so `previous()` always stays a four digit year.
    pub fn parse(input: &str) -> FinanceResult<Self> {
        let invalid = || FinanceError::InvalidMonthFormat(input.to_string());
        let bytes = input.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&input[..4], &input[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        if year < MIN_YEAR {
            return Err(invalid());
        }
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Ok(MonthKey { year, month })
    }

    pub fn from_date(date: Date) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// One calendar month earlier; January rolls back into December of the prior year.
    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => MonthKey::new(self.year - 1, Month::December),
            month => MonthKey::new(self.year, month.previous()),
        }
    }

    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_year_month(self.year, self.month)
    }

    pub fn contains(&self, date: Date) -> bool {
        MonthKey::from_date(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for MonthKey {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthKey::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> FinanceResult<Date> {
    let invalid = || FinanceError::validation("invalid date format, must be YYYY-MM-DD");
    if input.len() != 10 {
        return Err(invalid());
    }
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

/// Parses a `±HH:MM` offset such as `-05:00`.
pub fn parse_utc_offset(input: &str) -> Option<UtcOffset> {
    UtcOffset::parse(
        input,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .ok()
}

/// Source of "now" in the business timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn today(&self) -> Date {
        self.now().date()
    }

    fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today())
    }
}

/// Wall clock shifted into the configured business offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        SystemClock { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl FixedClock {
    /// Noon of `date` at UTC, so the calendar date is stable.
    pub fn on(date: Date) -> Self {
        FixedClock(date.midnight().assume_utc() + time::Duration::hours(12))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
