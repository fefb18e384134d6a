//! Date formatting for chart labels.

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ES_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Unknown locale name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(String);

/// Locales dates can be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    /// Spanish, `d/m/yyyy`.
    #[default]
    Es,

    /// English, `m/d/yyyy`.
    En,
}

impl DateLocale {
    /// Short numeric date, e.g. `17/10/2026` or `10/17/2026`.
    pub fn short_date(self, date: Date) -> String {
        match self {
            Self::Es => format!("{}/{}/{}", date.day(), date.month(), date.year()),
            Self::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        }
    }

    /// Abbreviated month name for a month number in `1..=12`.
    pub fn month_abbrev(self, month: u8) -> Option<&'static str> {
        let names = match self {
            Self::Es => &ES_MONTHS,
            Self::En => &EN_MONTHS,
        };

        names.get(usize::from(month.checked_sub(1)?)).copied()
    }

    /// Splits a [`short_date`](Self::short_date) label into day and month number.
    fn day_and_month(self, label: &str) -> Option<(&str, u8)> {
        let mut parts = label.split('/');

        let (first, second, _year) = (parts.next()?, parts.next()?, parts.next()?);

        if parts.next().is_some() {
            return None;
        }

        let (day, month) = match self {
            Self::Es => (first, second),
            Self::En => (second, first),
        };

        Some((day, month.trim().parse().ok()?))
    }

    /// Axis tick text for a date label: day of month above the abbreviated month.
    ///
    /// Labels that do not look like a short date are returned unchanged.
    pub fn tick_label(self, label: &str) -> String {
        self.day_and_month(label)
            .and_then(|(day, month)| Some(format!("{day}\n{}", self.month_abbrev(month)?)))
            .unwrap_or_else(|| label.to_string())
    }
}

impl FromStr for DateLocale {
    type Err = UnknownLocale;

    /// Accepts a language tag such as `es`, `es-PE` or `en_US`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Es => "es",
            Self::En => "en",
        })
    }
}

/// How timestamps become date labels.
#[derive(Debug, Clone)]
pub struct DateFormat {
    /// Label locale.
    pub locale: DateLocale,

    /// Zone the calendar date is taken in.
    pub time_zone: TimeZone,
}

impl DateFormat {
    /// Creates a date format.
    pub fn new(locale: DateLocale, time_zone: TimeZone) -> Self {
        Self { locale, time_zone }
    }

    /// Short date label for a timestamp in this format's zone.
    pub fn label(&self, timestamp: Timestamp) -> String {
        let date = timestamp.to_zoned(self.time_zone.clone()).date();

        self.locale.short_date(date)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DateLocale::Es, TimeZone::UTC)
    }
}
