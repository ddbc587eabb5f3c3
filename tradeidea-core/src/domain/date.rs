use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::TradeIdeaError;

/// Default rendering of calendar dates, e.g. `19-Oct-2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Expiry/trade date of the idea: a calendar date or free text ("3M", "end of Q1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TradeDate {
    Calendar(NaiveDate),
    Text(String),
}

/// Reject chrono format strings that cannot render a plain calendar date:
/// unknown specifiers (`%Q`) and time-of-day fields (`%H`).
pub fn check_date_format(format: &str) -> Result<(), TradeIdeaError> {
    let invalid = || TradeIdeaError::InvalidDateFormat(format.to_string());
    if format.trim().is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).ok_or_else(invalid)?;
    write_date(sample, format).map(|_| ())
}

fn write_date(date: NaiveDate, format: &str) -> Result<String, TradeIdeaError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| TradeIdeaError::InvalidDateFormat(format.to_string()))?;
    Ok(out)
}

impl TradeDate {
    /// Render with a chrono format string; free text is rendered verbatim.
    /// The format is checked either way so a bad one never depends on the input.
    pub fn render_with(&self, format: &str) -> Result<String, TradeIdeaError> {
        check_date_format(format)?;
        match self {
            TradeDate::Calendar(d) => write_date(*d, format),
            TradeDate::Text(t) => Ok(t.clone()),
        }
    }
}

impl From<NaiveDate> for TradeDate {
    fn from(d: NaiveDate) -> Self {
        TradeDate::Calendar(d)
    }
}

impl FromStr for TradeDate {
    type Err = TradeIdeaError;

    /// ISO `YYYY-MM-DD` becomes a calendar date; any other non-empty text is kept as is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TradeIdeaError::EmptyDate);
        }
        Ok(match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => TradeDate::Calendar(d),
            Err(_) => TradeDate::Text(s.to_string()),
        })
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render_with(DEFAULT_DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.pad(&rendered)
    }
}
