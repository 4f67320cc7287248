use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a canonical transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw type value that matched neither side nor any synonym.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised transaction type: {0}")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    /// Case-insensitive, with exchange synonyms (e.g. "purchase", "sold").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "purchase" | "bought" | "acquire" | "deposit" => Ok(TransactionType::Buy),
            "sell" | "sold" | "sale" | "dispose" | "withdrawal" => Ok(TransactionType::Sell),
            _ => Err(UnknownTransactionType(s.trim().to_string())),
        }
    }
}

/// A canonical buy or sell of a single asset, priced in the reporting currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(with = "String")]
    pub date: NaiveDateTime,
    /// Uppercased asset symbol with any quote currency suffix removed
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[schemars(with = "f64")]
    pub quantity: Decimal,
    /// Unit price in the reporting currency
    #[schemars(with = "f64")]
    pub price: Decimal,
}

impl Transaction {
    /// Quantity times price, `None` on overflow
    pub fn total(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }

    /// Quantity and price must both be strictly positive, with a representable total
    pub fn is_valid(&self) -> bool {
        self.quantity > Decimal::ZERO && self.price > Decimal::ZERO && self.total().is_some()
    }
}

/// CSV record for canonical transaction output
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: String,
    pub price: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        TransactionRecord {
            date: tx.date.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            symbol: tx.symbol.clone(),
            kind: tx.kind.to_string(),
            quantity: tx.quantity.normalize().to_string(),
            price: tx.price.normalize().to_string(),
        }
    }
}
