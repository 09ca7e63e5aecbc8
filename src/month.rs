//! Resolves the month in a request into a month-of-year filter.
//!
//! Sales are matched on the month of their sale date only, the year is ignored.
//! For example, a filter for March matches sales from March 2021 and March 2024.

use std::fmt::Display;

use time::Month;

use crate::Error;

/// Lowercase month names in calendar order.
const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// A filter that matches sales made in a given month of any year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter(Month);

impl MonthFilter {
    /// Create a filter for `month`.
    pub fn new(month: Month) -> Self {
        Self(month)
    }

    /// The month this filter matches.
    pub fn month(self) -> Month {
        self.0
    }

    /// The month as a number from 1 (January) to 12 (December).
    pub fn number(self) -> u8 {
        u8::from(self.0)
    }
}

impl Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the month in a request into a [MonthFilter].
///
/// Returns `Ok(None)` if `input` is absent or blank, which means sales from
/// every month should match.
///
/// Full month names ("March"), three letter abbreviations ("Mar") and month
/// numbers ("3" or "03") are accepted regardless of letter case.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `input` does not name a calendar month.
pub fn resolve_month(input: Option<&str>) -> Result<Option<MonthFilter>, Error> {
    let trimmed = match input.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(trimmed) => trimmed,
    };

    parse_month(trimmed)
        .map(|month| Some(MonthFilter::new(month)))
        .ok_or_else(|| Error::InvalidMonth(trimmed.to_owned()))
}

fn parse_month(text: &str) -> Option<Month> {
    if text.bytes().all(|byte| byte.is_ascii_digit()) {
        return text
            .parse::<u8>()
            .ok()
            .and_then(|number| Month::try_from(number).ok());
    }

    let lowercase = text.to_lowercase();

    MONTH_NAMES
        .iter()
        .find(|(name, _)| {
            *name == lowercase || (lowercase.len() == 3 && name.starts_with(&lowercase))
        })
        .map(|(_, month)| *month)
}
