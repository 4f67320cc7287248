//! Results of a FIFO gains calculation and their tabular forms.

use super::fifo::{MatchRecord, Term, LONG_TERM_RATE, LONG_TERM_THRESHOLD_DAYS, SHORT_TERM_RATE};
use super::warnings::Warning;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const RATE_NOTE: &str =
    "These are approximate rates. Actual rates depend on your income and filing status.";

/// Output of [`calculate`](super::fifo::calculate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxReport {
    #[schemars(with = "f64")]
    pub short_term_gain: Decimal,
    #[schemars(with = "f64")]
    pub long_term_gain: Decimal,
    #[schemars(with = "f64")]
    pub estimated_tax: Decimal,
    /// Matches grouped by symbol (first appearance order), chronological within a symbol
    pub matches: Vec<MatchRecord>,
    /// Unsold lot remainders in the same order
    pub holdings: Vec<Holding>,
    /// Transactions that took part in the calculation
    pub transaction_count: usize,
    pub tax_rate_info: TaxRateInfo,
    pub warnings: Vec<Warning>,
}

impl TaxReport {
    pub fn total_gain_loss(&self) -> Decimal {
        self.short_term_gain + self.long_term_gain
    }

    pub fn total_proceeds(&self) -> Decimal {
        self.matches.iter().map(|m| m.proceeds).sum()
    }

    pub fn total_cost_basis(&self) -> Decimal {
        self.matches.iter().map(|m| m.cost_basis).sum()
    }

    pub fn matches_for(&self, term: Term) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter().filter(move |m| m.term == term)
    }
}

/// An open lot at the end of the calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Holding {
    pub symbol: String,
    #[schemars(with = "f64")]
    pub quantity: Decimal,
    /// Unit price of the originating purchase
    #[schemars(with = "f64")]
    pub avg_cost: Decimal,
    #[schemars(with = "f64")]
    pub total_cost_basis: Decimal,
    #[schemars(with = "String")]
    pub purchase_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxRateInfo {
    #[schemars(with = "f64")]
    pub short_term_rate: Decimal,
    #[schemars(with = "f64")]
    pub long_term_rate: Decimal,
    pub long_term_threshold_days: i64,
    pub note: String,
}

impl Default for TaxRateInfo {
    fn default() -> Self {
        TaxRateInfo {
            short_term_rate: SHORT_TERM_RATE,
            long_term_rate: LONG_TERM_RATE,
            long_term_threshold_days: LONG_TERM_THRESHOLD_DAYS,
            note: RATE_NOTE.to_string(),
        }
    }
}

/// Headline figures of a report plus calculation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    #[schemars(with = "f64")]
    pub short_term_gain: Decimal,
    #[schemars(with = "f64")]
    pub long_term_gain: Decimal,
    #[schemars(with = "f64")]
    pub total_gain_loss: Decimal,
    #[schemars(with = "f64")]
    pub estimated_tax: Decimal,
    pub calculation_timestamp: DateTime<Utc>,
    pub total_transaction_count: usize,
    pub tax_method: String,
    pub tax_rate_info: TaxRateInfo,
}

impl Summary {
    pub fn new(report: &TaxReport, calculated_at: DateTime<Utc>) -> Self {
        Summary {
            short_term_gain: report.short_term_gain,
            long_term_gain: report.long_term_gain,
            total_gain_loss: report.total_gain_loss(),
            estimated_tax: report.estimated_tax,
            calculation_timestamp: calculated_at,
            total_transaction_count: report.transaction_count,
            tax_method: "FIFO".to_string(),
            tax_rate_info: report.tax_rate_info.clone(),
        }
    }

    /// Metric/amount rows for the summary export
    pub fn records(&self) -> Vec<SummaryRecord> {
        [
            ("Total Gain/Loss", self.total_gain_loss),
            ("Short-term Gain/Loss", self.short_term_gain),
            ("Long-term Gain/Loss", self.long_term_gain),
            ("Estimated Tax Owed", self.estimated_tax),
        ]
        .into_iter()
        .map(|(metric, amount)| SummaryRecord {
            metric: metric.to_string(),
            amount: format!("{:.2}", amount.round_dp(2)),
        })
        .collect()
    }
}

/// Complete machine-readable output of the `report` command
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportDocument {
    pub summary: Summary,
    pub details: Vec<MatchRecord>,
    pub holdings: Vec<Holding>,
    pub warnings: Vec<Warning>,
}

impl ReportDocument {
    pub fn new(report: TaxReport, calculated_at: DateTime<Utc>) -> Self {
        let summary = Summary::new(&report, calculated_at);
        ReportDocument {
            summary,
            details: report.matches,
            holdings: report.holdings,
            warnings: report.warnings,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

/// CSV record for one matched disposal
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchCsvRecord {
    pub symbol: String,
    pub sale_date: String,
    pub purchase_date: String,
    pub quantity_matched: String,
    pub proceeds: String,
    pub cost_basis: String,
    pub gain_loss: String,
    pub holding_period_days: i64,
    pub term_classification: String,
}

impl From<&MatchRecord> for MatchCsvRecord {
    fn from(m: &MatchRecord) -> Self {
        MatchCsvRecord {
            symbol: m.symbol.clone(),
            sale_date: m.sale_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            purchase_date: m.purchase_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            quantity_matched: m.quantity_matched.normalize().to_string(),
            proceeds: format!("{:.2}", m.proceeds.round_dp(2)),
            cost_basis: format!("{:.2}", m.cost_basis.round_dp(2)),
            gain_loss: format!("{:.2}", m.gain_loss.round_dp(2)),
            holding_period_days: m.holding_period_days,
            term_classification: m.term.to_string(),
        }
    }
}

/// CSV record for one open lot
#[derive(Debug, Serialize, Deserialize)]
pub struct HoldingCsvRecord {
    pub symbol: String,
    pub quantity: String,
    pub avg_cost: String,
    pub total_cost_basis: String,
    pub purchase_date: String,
}

impl From<&Holding> for HoldingCsvRecord {
    fn from(h: &Holding) -> Self {
        HoldingCsvRecord {
            symbol: h.symbol.clone(),
            quantity: h.quantity.normalize().to_string(),
            avg_cost: format!("{:.2}", h.avg_cost.round_dp(2)),
            total_cost_basis: format!("{:.2}", h.total_cost_basis.round_dp(2)),
            purchase_date: h.purchase_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
