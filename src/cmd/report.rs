//! Report command - per-lot FIFO matches for every sale

use crate::cmd::InputArgs;
use crate::core::{MatchCsvRecord, MatchRecord, ReportDocument, TaxReport};
use crate::utils::{format_money, format_quantity, write_csv};
use chrono::Utc;
use clap::Args;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output matches as CSV instead of a formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output the full report (summary, details, holdings, warnings) as JSON
    #[arg(long)]
    json: bool,
}

/// Row for the matches table
#[derive(Debug, Clone, Tabled)]
struct MatchRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Sold")]
    sale_date: String,
    #[tabled(rename = "Bought")]
    purchase_date: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Proceeds")]
    proceeds: String,
    #[tabled(rename = "Cost Basis")]
    cost_basis: String,
    #[tabled(rename = "Gain/Loss")]
    gain_loss: String,
    #[tabled(rename = "Days")]
    holding_period_days: i64,
    #[tabled(rename = "Term")]
    term: String,
}

impl From<&MatchRecord> for MatchRow {
    fn from(m: &MatchRecord) -> Self {
        MatchRow {
            symbol: m.symbol.clone(),
            sale_date: m.sale_date.format("%Y-%m-%d").to_string(),
            purchase_date: m.purchase_date.format("%Y-%m-%d").to_string(),
            quantity: format_quantity(m.quantity_matched),
            proceeds: format_money(m.proceeds),
            cost_basis: format_money(m.cost_basis),
            gain_loss: format_money(m.gain_loss),
            holding_period_days: m.holding_period_days,
            term: m.term.to_string(),
        }
    }
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let report = self.input.calculate()?;

        if self.json {
            let document = ReportDocument::new(report, Utc::now());
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        } else if self.csv {
            write_csv(report.matches.iter().map(MatchCsvRecord::from), io::stdout())
        } else {
            print_table(&report);
            Ok(())
        }
    }
}

fn print_table(report: &TaxReport) {
    if report.matches.is_empty() {
        println!("No sales matched against purchases");
        return;
    }

    let rows: Vec<MatchRow> = report.matches.iter().map(MatchRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!(
        "Proceeds: {} | Cost basis: {} | Gain/Loss: {}",
        format_money(report.total_proceeds()),
        format_money(report.total_cost_basis()),
        format_money(report.total_gain_loss())
    );
}
