//! Schema command - print expected input and output formats

use crate::core::normalize::columns::CanonicalColumn;
use crate::core::{ReportDocument, Transaction};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for `report --json` output
    JsonSchema,
    /// JSON Schema for a canonical transaction (`normalize --json` items)
    TransactionSchema,
    /// Canonical CSV header row
    CsvHeader,
    /// Canonical columns with the exchange header names accepted for each
    CsvFields,
    /// A small example input file
    Sample,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(ReportDocument);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::TransactionSchema => {
                let schema = schema_for!(Transaction);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<_> = CanonicalColumn::ALL.iter().map(|c| c.name()).collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => print_csv_fields(),
            SchemaFormat::Sample => print!("{}", SAMPLE_CSV),
        }
        Ok(())
    }
}

fn print_csv_fields() {
    println!("CSV Input Format");
    println!("================");
    println!();
    for column in CanonicalColumn::ALL {
        println!(
            "{:10} {}",
            column.name(),
            FIELD_DESCRIPTIONS[column as usize]
        );
        println!("{:10} also: {}", "", column.synonyms().join(", "));
    }
    println!();
    println!("Header names are matched case-insensitively; other columns are ignored.");
    println!("Tested with exports from: {}", SUPPORTED_EXCHANGES.join(", "));
}

// Indexed by CanonicalColumn discriminant
const FIELD_DESCRIPTIONS: [&str; 5] = [
    "Trade date/time (e.g. 2023-01-15 10:30:00, 01/15/2023, ISO 8601)",
    "Asset symbol; quote suffixes like /USD or -USDT are removed",
    "buy or sell (purchase, bought, sold, sale, ... also accepted)",
    "Units traded, greater than zero",
    "Unit price in the reporting currency, greater than zero",
];

const SUPPORTED_EXCHANGES: &[&str] = &[
    "Coinbase",
    "Coinbase Pro",
    "Binance",
    "Kraken",
    "Gemini",
    "KuCoin",
    "Huobi",
    "Bittrex",
];

const SAMPLE_CSV: &str = "\
date,symbol,type,quantity,price
2023-01-15 10:30:00,BTC,buy,0.5,25000
2023-01-20 14:25:00,BTC,buy,0.25,24500
2023-02-01 09:15:00,BTC,sell,0.3,26000
";
