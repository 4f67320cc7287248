//! Column-wide date format detection.
//!
//! Exchanges export dates in many shapes. A column is read with the first
//! explicit format that accepts every value; only if none does is each value
//! inferred independently. Day/month order cannot be recovered from values
//! like `01/02/2023`: month-first wins when both orders parse, and the caller
//! gets an [`Ambiguity`] to surface.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// A strftime pattern tried against a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExplicitFormat {
    pattern: &'static str,
    date_only: bool,
    /// Same layout with day and month swapped
    swapped: Option<&'static str>,
}

impl ExplicitFormat {
    const fn datetime(pattern: &'static str) -> Self {
        ExplicitFormat {
            pattern,
            date_only: false,
            swapped: None,
        }
    }

    const fn date(pattern: &'static str) -> Self {
        ExplicitFormat {
            pattern,
            date_only: true,
            swapped: None,
        }
    }

    const fn month_first(mut self, swapped: &'static str) -> Self {
        self.swapped = Some(swapped);
        self
    }

    fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        parse_pattern(value, self.pattern, self.date_only)
    }
}

const EXPLICIT_FORMATS: &[ExplicitFormat] = &[
    ExplicitFormat::datetime("%Y-%m-%d %H:%M:%S"),
    ExplicitFormat::datetime("%Y-%m-%d %H:%M:%S%.f"),
    ExplicitFormat::date("%Y-%m-%d"),
    ExplicitFormat::datetime("%m/%d/%Y %H:%M:%S").month_first("%d/%m/%Y %H:%M:%S"),
    ExplicitFormat::date("%m/%d/%Y").month_first("%d/%m/%Y"),
    ExplicitFormat::datetime("%d/%m/%Y %H:%M:%S"),
    ExplicitFormat::date("%d/%m/%Y"),
    ExplicitFormat::datetime("%Y-%m-%dT%H:%M:%S%.fZ"),
    ExplicitFormat::datetime("%Y-%m-%dT%H:%M:%SZ"),
    ExplicitFormat::datetime("%Y-%m-%dT%H:%M:%S"),
];

// Extra layouts only used for per-value inference
const INFERRED_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const INFERRED_DATE_PATTERNS: &[&str] = &[
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// How the date column was read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "pattern", rename_all = "snake_case")]
pub enum DateFormat {
    /// A single explicit pattern parsed every value
    Explicit(&'static str),
    /// No pattern fit the whole column; values were inferred one by one
    Inferred,
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::Explicit(pattern) => f.write_str(pattern),
            DateFormat::Inferred => f.write_str("inferred per value"),
        }
    }
}

/// Both day/month orders parse the column; the first was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ambiguity {
    pub chosen: &'static str,
    pub alternative: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDates {
    /// One entry per input value, `None` where inference failed
    pub values: Vec<Option<NaiveDateTime>>,
    pub format: DateFormat,
    pub ambiguity: Option<Ambiguity>,
}

impl ParsedDates {
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Parse a whole date column, preferring one consistent explicit format
pub fn parse_column<S: AsRef<str>>(values: &[S]) -> ParsedDates {
    for format in EXPLICIT_FORMATS {
        let parsed: Option<Vec<NaiveDateTime>> =
            values.iter().map(|v| format.parse(v.as_ref())).collect();
        let Some(parsed) = parsed else {
            continue;
        };

        log::debug!("Date column parsed with format '{}'", format.pattern);
        let ambiguity = format.swapped.and_then(|swapped| {
            let date_only = format.date_only;
            values
                .iter()
                .all(|v| parse_pattern(v.as_ref(), swapped, date_only).is_some())
                .then_some(Ambiguity {
                    chosen: format.pattern,
                    alternative: swapped,
                })
        });
        return ParsedDates {
            values: parsed.into_iter().map(Some).collect(),
            format: DateFormat::Explicit(format.pattern),
            ambiguity,
        };
    }

    log::info!("No single date format fits the column, inferring dates per value");
    ParsedDates {
        values: values.iter().map(|v| infer(v.as_ref())).collect(),
        format: DateFormat::Inferred,
        ambiguity: None,
    }
}

/// Best-effort parse of a single value in any recognised layout
pub fn infer(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = EXPLICIT_FORMATS.iter().find_map(|f| f.parse(value)) {
        return Some(dt);
    }
    if let Some(dt) = INFERRED_DATETIME_PATTERNS
        .iter()
        .find_map(|p| parse_pattern(value, p, false))
    {
        return Some(dt);
    }
    if let Some(dt) = INFERRED_DATE_PATTERNS
        .iter()
        .find_map(|p| parse_pattern(value, p, true))
    {
        return Some(dt);
    }
    parse_epoch(value)
}

fn parse_pattern(value: &str, pattern: &str, date_only: bool) -> Option<NaiveDateTime> {
    let value = value.trim();
    if date_only {
        NaiveDate::parse_from_str(value, pattern)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    } else {
        NaiveDateTime::parse_from_str(value, pattern).ok()
    }
}

// Unix timestamps in seconds (10 digits) or milliseconds (13 digits)
fn parse_epoch(value: &str) -> Option<NaiveDateTime> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: i64 = value.parse().ok()?;
    match value.len() {
        9 | 10 => DateTime::from_timestamp(n, 0).map(|dt| dt.naive_utc()),
        12 | 13 => DateTime::from_timestamp_millis(n).map(|dt| dt.naive_utc()),
        _ => None,
    }
}
