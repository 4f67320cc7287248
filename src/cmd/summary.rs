//! Summary command - aggregated gains and estimated tax

use crate::cmd::InputArgs;
use crate::core::{Summary, Term};
use crate::utils::{format_money, write_csv};
use chrono::Utc;
use clap::Args;
use rust_decimal_macros::dec;
use std::io;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output Metric,Amount rows as CSV
    #[arg(long)]
    csv: bool,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let report = self.input.calculate()?;
        let summary = Summary::new(&report, Utc::now());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }
        if self.csv {
            return write_csv(summary.records(), io::stdout());
        }

        let short_term = report.matches_for(Term::ShortTerm).count();
        let long_term = report.matches_for(Term::LongTerm).count();
        let rates = &summary.tax_rate_info;

        println!();
        match self.input.asset {
            Some(ref asset) => println!("TAX SUMMARY ({}) - FIFO", asset.to_uppercase()),
            None => println!("TAX SUMMARY - FIFO"),
        }
        println!();
        println!("CAPITAL GAINS");
        println!(
            "  Transactions: {} | Matched lots: {} ({} short-term, {} long-term)",
            summary.total_transaction_count,
            report.matches.len(),
            short_term,
            long_term
        );
        println!(
            "  Short-term: {} | Long-term: {} | Total: {}",
            format_money(summary.short_term_gain),
            format_money(summary.long_term_gain),
            format_money(summary.total_gain_loss)
        );
        println!();
        println!("ESTIMATED TAX: {}", format_money(summary.estimated_tax));
        println!(
            "  Short-term @ {:.0}% | Long-term @ {:.0}% (held {}+ days)",
            rates.short_term_rate * dec!(100),
            rates.long_term_rate * dec!(100),
            rates.long_term_threshold_days
        );
        println!("  {}", rates.note);
        if !report.warnings.is_empty() {
            println!();
            println!(
                "{} warning(s); run `fifotax validate` for details",
                report.warnings.len()
            );
        }
        println!();
        Ok(())
    }
}
