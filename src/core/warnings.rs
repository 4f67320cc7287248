use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal data quality issues found during normalization or calculation.
///
/// Rows affected by these are dropped (or, for uncovered sells, left
/// unmatched) and the run continues with whatever remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Transaction types that resolved to neither buy nor sell.
    InvalidType { values: Vec<String>, rows: usize },
    /// Quantity or price was unparseable, zero or negative, or their product overflows.
    InvalidValue { rows: usize },
    /// One of the canonical fields was empty.
    MissingField { rows: usize },
    /// Individual dates that best-effort inference could not read.
    UnparseableDate { rows: usize },
    /// The adopted date format reads day and month in one order, but the
    /// opposite order would also have parsed the whole column.
    AmbiguousDateOrder { chosen: String, alternative: String },
    /// A sell exceeded the lots available for its symbol.
    /// The uncovered quantity has no cost basis and no gain is computed for it.
    UncoveredSell {
        symbol: String,
        #[schemars(with = "String")]
        date: NaiveDateTime,
        #[schemars(with = "f64")]
        requested: Decimal,
        #[schemars(with = "f64")]
        uncovered: Decimal,
    },
}

impl Warning {
    /// Short identifier, used as the `type` column in tabular output.
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::InvalidType { .. } => "InvalidType",
            Warning::InvalidValue { .. } => "InvalidValue",
            Warning::MissingField { .. } => "MissingField",
            Warning::UnparseableDate { .. } => "UnparseableDate",
            Warning::AmbiguousDateOrder { .. } => "AmbiguousDateOrder",
            Warning::UncoveredSell { .. } => "UncoveredSell",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidType { values, rows } => write!(
                f,
                "ignored {} row(s) with unexpected transaction types: {}",
                rows,
                values.join(", ")
            ),
            Warning::InvalidValue { rows } => write!(
                f,
                "dropped {} row(s) with zero, negative or unparseable quantity/price",
                rows
            ),
            Warning::MissingField { rows } => {
                write!(f, "dropped {} row(s) with missing required values", rows)
            }
            Warning::UnparseableDate { rows } => {
                write!(f, "dropped {} row(s) with unparseable dates", rows)
            }
            Warning::AmbiguousDateOrder {
                chosen,
                alternative,
            } => write!(
                f,
                "dates were read as '{}' but also parse as '{}'; verify day/month order",
                chosen, alternative
            ),
            Warning::UncoveredSell {
                symbol,
                date,
                requested,
                uncovered,
            } => write!(
                f,
                "sell of {} {} on {} exceeds recorded purchases by {}; no gain computed for the excess",
                requested,
                symbol,
                date.format("%Y-%m-%d"),
                uncovered
            ),
        }
    }
}
