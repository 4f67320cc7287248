pub mod holdings;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod summary;
pub mod validate;

use crate::core::{self, Normalized, TaxReport, Transaction};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Trade history input shared by every command that reads an export
#[derive(Args, Debug)]
pub struct InputArgs {
    /// CSV export from an exchange, or "-" to read stdin
    pub file: PathBuf,

    /// Only include transactions for this asset (e.g. BTC, ETH)
    #[arg(short, long)]
    pub asset: Option<String>,
}

impl InputArgs {
    pub fn load(&self) -> anyhow::Result<Normalized> {
        read_transactions(&self.file)
    }

    /// Transactions matching the asset filter, if any
    pub fn select(&self, transactions: &[Transaction]) -> anyhow::Result<Vec<Transaction>> {
        let Some(ref asset) = self.asset else {
            return Ok(transactions.to_vec());
        };
        let selected: Vec<_> = transactions
            .iter()
            .filter(|tx| tx.symbol.eq_ignore_ascii_case(asset))
            .cloned()
            .collect();
        if selected.is_empty() {
            anyhow::bail!("No transactions found for asset {}", asset.to_uppercase());
        }
        Ok(selected)
    }

    /// Normalize the input and run the FIFO calculation.
    /// Normalization warnings precede the calculation's own in the returned report.
    pub fn calculate(&self) -> anyhow::Result<TaxReport> {
        let normalized = self.load()?;
        let transactions = self.select(&normalized.transactions)?;
        let mut report = core::calculate(&transactions)?;
        let mut warnings = normalized.warnings;
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
        Ok(report)
    }
}

/// Read and normalize an exchange export (or stdin with "-")
pub fn read_transactions(path: &Path) -> anyhow::Result<Normalized> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<Normalized> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let normalized = core::normalize_reader(reader)?;
    Ok(normalized)
}

fn read_from_stdin() -> anyhow::Result<Normalized> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let cursor = io::Cursor::new(buffer);
    let normalized = core::normalize_reader(cursor)?;
    Ok(normalized)
}
