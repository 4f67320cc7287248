//! Holdings command - lots still open after all sales are matched

use crate::cmd::InputArgs;
use crate::core::{Holding, HoldingCsvRecord};
use crate::utils::{format_money, format_quantity, write_csv};
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct HoldingsCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct HoldingRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Bought")]
    purchase_date: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit Cost")]
    avg_cost: String,
    #[tabled(rename = "Cost Basis")]
    total_cost_basis: String,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        HoldingRow {
            symbol: h.symbol.clone(),
            purchase_date: h.purchase_date.format("%Y-%m-%d").to_string(),
            quantity: format_quantity(h.quantity),
            avg_cost: format_money(h.avg_cost),
            total_cost_basis: format_money(h.total_cost_basis),
        }
    }
}

impl HoldingsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let report = self.input.calculate()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report.holdings)?);
            return Ok(());
        }
        if self.csv {
            return write_csv(report.holdings.iter().map(HoldingCsvRecord::from), io::stdout());
        }

        if report.holdings.is_empty() {
            println!("No open lots");
            return Ok(());
        }

        let rows: Vec<HoldingRow> = report.holdings.iter().map(HoldingRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let total_cost: Decimal = report.holdings.iter().map(|h| h.total_cost_basis).sum();
        println!(
            "Open lots: {} | Total cost basis: {}",
            report.holdings.len(),
            format_money(total_cost)
        );
        Ok(())
    }
}
