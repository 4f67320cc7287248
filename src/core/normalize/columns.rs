use std::fmt;

/// The five columns every canonical transaction needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalColumn {
    Date,
    Symbol,
    Type,
    Quantity,
    Price,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 5] = [
        CanonicalColumn::Date,
        CanonicalColumn::Symbol,
        CanonicalColumn::Type,
        CanonicalColumn::Quantity,
        CanonicalColumn::Price,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalColumn::Date => "date",
            CanonicalColumn::Symbol => "symbol",
            CanonicalColumn::Type => "type",
            CanonicalColumn::Quantity => "quantity",
            CanonicalColumn::Price => "price",
        }
    }

    /// Exchange-specific header names accepted for this column
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::Date => &[
                "timestamp",
                "time",
                "datetime",
                "created_at",
                "trade_time",
                "order_time",
            ],
            CanonicalColumn::Symbol => &[
                "coin",
                "asset",
                "currency",
                "pair",
                "base_asset",
                "product",
            ],
            CanonicalColumn::Type => &[
                "side",
                "transaction_type",
                "order_type",
                "trade_type",
                "action",
            ],
            CanonicalColumn::Quantity => &[
                "amount",
                "size",
                "volume",
                "filled_size",
                "base_amount",
                "qty",
            ],
            CanonicalColumn::Price => &[
                "rate",
                "unit_price",
                "price_per_unit",
                "fill_price",
                "executed_price",
                "avg_price",
            ],
        }
    }

    /// Resolve a header to its canonical column, ignoring case and surrounding whitespace
    pub fn from_header(header: &str) -> Option<CanonicalColumn> {
        let header = header.trim().to_lowercase();
        CanonicalColumn::ALL
            .into_iter()
            .find(|c| c.name() == header || c.synonyms().contains(&header.as_str()))
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of each canonical column within a raw header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub symbol: usize,
    pub kind: usize,
    pub quantity: usize,
    pub price: usize,
}

impl ColumnMap {
    /// Map headers to canonical columns. On failure returns the missing columns in
    /// canonical order.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap, Vec<CanonicalColumn>> {
        let mut found: [Option<usize>; 5] = [None; 5];

        for (index, header) in headers.iter().enumerate() {
            let Some(column) = CanonicalColumn::from_header(header.as_ref()) else {
                continue;
            };
            let slot = &mut found[column as usize];
            match *slot {
                Some(first) => log::debug!(
                    "Ignoring column '{}' (#{}): '{}' already taken by column #{}",
                    header.as_ref(),
                    index,
                    column,
                    first
                ),
                None => *slot = Some(index),
            }
        }

        match found {
            [Some(date), Some(symbol), Some(kind), Some(quantity), Some(price)] => Ok(ColumnMap {
                date,
                symbol,
                kind,
                quantity,
                price,
            }),
            _ => Err(CanonicalColumn::ALL
                .into_iter()
                .filter(|c| found[*c as usize].is_none())
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_map_to_themselves() {
        for column in CanonicalColumn::ALL {
            assert_eq!(CanonicalColumn::from_header(column.name()), Some(column));
        }
    }

    #[test]
    fn headers_are_case_folded_and_trimmed() {
        assert_eq!(
            CanonicalColumn::from_header("  Timestamp "),
            Some(CanonicalColumn::Date)
        );
        assert_eq!(
            CanonicalColumn::from_header("FILLED_SIZE"),
            Some(CanonicalColumn::Quantity)
        );
        assert_eq!(CanonicalColumn::from_header("fee"), None);
    }

    #[test]
    fn resolves_exchange_headers() {
        let map = ColumnMap::resolve(&["Timestamp", "Coin", "Side", "Size", "Rate"]).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                date: 0,
                symbol: 1,
                kind: 2,
                quantity: 3,
                price: 4,
            }
        );
    }

    #[test]
    fn reports_missing_columns_in_canonical_order() {
        let missing = ColumnMap::resolve(&["qty", "Coin", "notes"]).unwrap_err();
        assert_eq!(
            missing,
            vec![
                CanonicalColumn::Date,
                CanonicalColumn::Type,
                CanonicalColumn::Price
            ]
        );
    }

    #[test]
    fn leftmost_duplicate_wins() {
        let map =
            ColumnMap::resolve(&["date", "timestamp", "symbol", "type", "amount", "price"]).unwrap();
        assert_eq!(map.date, 0);
        assert_eq!(map.quantity, 4);
    }
}
