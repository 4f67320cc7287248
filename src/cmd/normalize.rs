//! Normalize command - rewrite an exchange export as canonical transactions

use crate::cmd::InputArgs;
use crate::core::{Normalized, Transaction, TransactionRecord, TransactionType};
use crate::utils::write_csv;
use clap::Args;
use serde::Serialize;
use std::collections::HashSet;
use std::io;

#[derive(Args, Debug)]
pub struct NormalizeCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Print statistics about the input instead of the transactions
    #[arg(long)]
    stats: bool,

    /// Output as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

/// Overview of a normalized export
#[derive(Debug, Serialize)]
struct NormalizeStats {
    rows_read: usize,
    rows_dropped: usize,
    transactions: usize,
    buys: usize,
    sells: usize,
    unique_symbols: usize,
    date_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_date: Option<String>,
    warnings: Vec<String>,
}

impl NormalizeStats {
    fn new(normalized: &Normalized, transactions: &[Transaction]) -> Self {
        let count = |kind: TransactionType| {
            transactions.iter().filter(|tx| tx.kind == kind).count()
        };
        let symbols: HashSet<&str> = transactions.iter().map(|tx| tx.symbol.as_str()).collect();
        let format_date = |tx: &Transaction| tx.date.format("%Y-%m-%d %H:%M:%S").to_string();

        NormalizeStats {
            rows_read: normalized.rows_read,
            rows_dropped: normalized.rows_dropped(),
            transactions: transactions.len(),
            buys: count(TransactionType::Buy),
            sells: count(TransactionType::Sell),
            unique_symbols: symbols.len(),
            date_format: normalized.date_format.to_string(),
            first_date: transactions.first().map(format_date),
            last_date: transactions.last().map(format_date),
            warnings: normalized.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl NormalizeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let normalized = self.input.load()?;
        let transactions = self.input.select(&normalized.transactions)?;

        if self.stats {
            let stats = NormalizeStats::new(&normalized, &transactions);
            if self.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
            return Ok(());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&transactions)?);
            Ok(())
        } else {
            write_csv(transactions.iter().map(TransactionRecord::from), io::stdout())
        }
    }
}

fn print_stats(stats: &NormalizeStats) {
    println!();
    println!("NORMALIZED TRANSACTIONS");
    println!(
        "  Rows read: {} | Kept: {} | Dropped: {}",
        stats.rows_read, stats.transactions, stats.rows_dropped
    );
    println!(
        "  Buys: {} | Sells: {} | Unique coins: {}",
        stats.buys, stats.sells, stats.unique_symbols
    );
    println!("  Date format: {}", stats.date_format);
    if let (Some(first), Some(last)) = (&stats.first_date, &stats.last_date) {
        println!("  Period: {} to {}", first, last);
    }
    if !stats.warnings.is_empty() {
        println!();
        println!("WARNINGS");
        for warning in &stats.warnings {
            println!("  - {}", warning);
        }
    }
    println!();
}
