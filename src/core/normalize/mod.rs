//! Normalization of exchange trade exports into canonical transactions.

pub mod columns;
pub mod dates;
pub mod values;

use super::transaction::{Transaction, TransactionType, UnknownTransactionType};
use super::warnings::Warning;
use columns::{CanonicalColumn, ColumnMap};
use dates::DateFormat;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("{}", empty_message(.rows_read))]
    EmptyInput { rows_read: usize },
    #[error(
        "missing required columns: {} (available columns: {})",
        join_columns(.missing),
        .available.join(", ")
    )]
    MissingColumns {
        missing: Vec<CanonicalColumn>,
        available: Vec<String>,
    },
    #[error("could not parse any values in the date column; use a standard format such as YYYY-MM-DD HH:MM:SS")]
    DateParsing,
    #[error("error reading csv input: {0}")]
    Read(#[from] csv::Error),
}

fn empty_message(rows_read: &usize) -> String {
    if *rows_read == 0 {
        "the input contains no rows".to_string()
    } else {
        format!("none of the {} input rows is a valid transaction", rows_read)
    }
}

fn join_columns(columns: &[CanonicalColumn]) -> String {
    columns
        .iter()
        .map(CanonicalColumn::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Delimited text with a header row, cells kept as trimmed strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a header row and records. Rows may have fewer or more cells than headers.
    pub fn from_reader<R: Read>(reader: R) -> Result<RawTable, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;
        log::info!("Read {} csv records", rows.len());
        Ok(RawTable { headers, rows })
    }
}

/// Canonical transactions plus what was learned while producing them
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Sorted ascending by date, ties in input order
    pub transactions: Vec<Transaction>,
    pub date_format: DateFormat,
    pub rows_read: usize,
    pub warnings: Vec<Warning>,
}

impl Normalized {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.transactions.len()
    }
}

// A row whose non-date fields are clean, waiting on date parsing
struct PendingRow<'a> {
    date: &'a str,
    symbol: String,
    kind: TransactionType,
    quantity: Decimal,
    price: Decimal,
}

#[derive(Default)]
struct DropCounts {
    missing_field: usize,
    invalid_type: usize,
    invalid_value: usize,
    unparseable_date: usize,
}

/// Convert an exchange export into canonical transactions sorted by date.
///
/// Structural problems (no rows, missing columns, no readable dates) are errors.
/// Bad individual rows are dropped and summarised in [`Normalized::warnings`].
pub fn normalize(table: &RawTable) -> Result<Normalized, NormalizationError> {
    let rows_read = table.rows.len();
    if rows_read == 0 {
        return Err(NormalizationError::EmptyInput { rows_read });
    }

    let columns =
        ColumnMap::resolve(&table.headers).map_err(|missing| NormalizationError::MissingColumns {
            missing,
            available: table.headers.clone(),
        })?;

    let mut drops = DropCounts::default();
    let mut invalid_types: Vec<String> = Vec::new();
    let mut seen_types: HashSet<String> = HashSet::new();
    let mut pending: Vec<PendingRow> = Vec::with_capacity(rows_read);

    for row in &table.rows {
        let cell = move |index: usize| row.get(index).map(|s| s.trim()).unwrap_or_default();
        let (date, symbol, kind, quantity, price) = (
            cell(columns.date),
            cell(columns.symbol),
            cell(columns.kind),
            cell(columns.quantity),
            cell(columns.price),
        );

        let symbol = values::clean_symbol(symbol);
        if [date, symbol.as_str(), kind, quantity, price]
            .iter()
            .any(|v| v.is_empty())
        {
            drops.missing_field += 1;
            continue;
        }

        let kind = match kind.parse::<TransactionType>() {
            Ok(kind) => kind,
            Err(UnknownTransactionType(value)) => {
                drops.invalid_type += 1;
                let value = value.to_lowercase();
                if seen_types.insert(value.clone()) {
                    invalid_types.push(value);
                }
                continue;
            }
        };

        match (values::parse_decimal(quantity), values::parse_decimal(price)) {
            (Some(quantity), Some(price))
                if quantity > Decimal::ZERO
                    && price > Decimal::ZERO
                    && quantity.checked_mul(price).is_some() =>
            {
                pending.push(PendingRow {
                    date,
                    symbol,
                    kind,
                    quantity,
                    price,
                });
            }
            _ => drops.invalid_value += 1,
        }
    }

    if pending.is_empty() {
        log::warn!("No valid rows among {} read", rows_read);
        return Err(NormalizationError::EmptyInput { rows_read });
    }

    let raw_dates: Vec<&str> = pending.iter().map(|row| row.date).collect();
    let parsed = dates::parse_column(&raw_dates);
    if parsed.valid_count() == 0 {
        return Err(NormalizationError::DateParsing);
    }

    let mut transactions: Vec<Transaction> = pending
        .into_iter()
        .zip(parsed.values)
        .filter_map(|(row, date)| match date {
            Some(date) => Some(Transaction {
                date,
                symbol: row.symbol,
                kind: row.kind,
                quantity: row.quantity,
                price: row.price,
            }),
            None => {
                drops.unparseable_date += 1;
                None
            }
        })
        .collect();
    transactions.sort_by_key(|tx| tx.date);

    let mut warnings = Vec::new();
    if drops.missing_field > 0 {
        warnings.push(Warning::MissingField {
            rows: drops.missing_field,
        });
    }
    if drops.invalid_type > 0 {
        warnings.push(Warning::InvalidType {
            values: invalid_types,
            rows: drops.invalid_type,
        });
    }
    if drops.invalid_value > 0 {
        warnings.push(Warning::InvalidValue {
            rows: drops.invalid_value,
        });
    }
    if drops.unparseable_date > 0 {
        warnings.push(Warning::UnparseableDate {
            rows: drops.unparseable_date,
        });
    }
    if let Some(ambiguity) = parsed.ambiguity {
        warnings.push(Warning::AmbiguousDateOrder {
            chosen: ambiguity.chosen.to_string(),
            alternative: ambiguity.alternative.to_string(),
        });
    }
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    log::info!(
        "Normalized {} of {} rows (dates: {})",
        transactions.len(),
        rows_read,
        parsed.format
    );

    Ok(Normalized {
        transactions,
        date_format: parsed.format,
        rows_read,
        warnings,
    })
}

/// Read and normalize delimited text in one step
pub fn normalize_reader<R: Read>(reader: R) -> Result<Normalized, NormalizationError> {
    let table = RawTable::from_reader(reader)?;
    normalize(&table)
}
