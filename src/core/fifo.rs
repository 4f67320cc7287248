use super::report::{Holding, TaxRateInfo, TaxReport};
use super::transaction::{Transaction, TransactionType};
use super::warnings::Warning;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Assumed rate for gains held under the long-term threshold
pub const SHORT_TERM_RATE: Decimal = dec!(0.22);
/// Assumed rate for gains held at least the long-term threshold
pub const LONG_TERM_RATE: Decimal = dec!(0.15);
/// Holding period, in whole days, from which a gain is long-term
pub const LONG_TERM_THRESHOLD_DAYS: i64 = 365;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no transaction data provided")]
    NoTransactions,
    #[error("no valid transactions found after filtering {dropped} with invalid quantity/price")]
    NoValidTransactions { dropped: usize },
    #[error("{what} exceeds the supported decimal range")]
    Overflow { what: String },
}

impl ValidationError {
    fn overflow(what: impl fmt::Display) -> Self {
        ValidationError::Overflow {
            what: what.to_string(),
        }
    }
}

/// Holding period classification of a matched disposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Term {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl Term {
    pub fn from_holding_days(days: i64) -> Term {
        if days >= LONG_TERM_THRESHOLD_DAYS {
            Term::LongTerm
        } else {
            Term::ShortTerm
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Term::ShortTerm => "Short-term",
            Term::LongTerm => "Long-term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One lot (or part of a lot) consumed by a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchRecord {
    pub symbol: String,
    #[schemars(with = "String")]
    pub sale_date: NaiveDateTime,
    #[schemars(with = "String")]
    pub purchase_date: NaiveDateTime,
    #[schemars(with = "f64")]
    pub quantity_matched: Decimal,
    #[schemars(with = "f64")]
    pub proceeds: Decimal,
    #[schemars(with = "f64")]
    pub cost_basis: Decimal,
    #[schemars(with = "f64")]
    pub gain_loss: Decimal,
    pub holding_period_days: i64,
    #[serde(rename = "term_classification")]
    pub term: Term,
}

/// Unsold remainder of a purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lot {
    pub symbol: String,
    pub purchase_date: NaiveDateTime,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub cost_basis: Decimal,
}

impl Lot {
    /// `None` when the purchase total does not fit a `Decimal`
    pub fn from_buy(tx: &Transaction) -> Option<Self> {
        Some(Lot {
            symbol: tx.symbol.clone(),
            purchase_date: tx.date,
            quantity: tx.quantity,
            unit_price: tx.price,
            cost_basis: tx.total()?,
        })
    }

    /// Take up to `wanted` units, returning the quantity and cost basis taken.
    /// A partial take leaves the proportional remainder in place; the lot is
    /// untouched if the proportional cost cannot be computed.
    pub fn consume(&mut self, wanted: Decimal) -> Option<(Decimal, Decimal)> {
        if self.quantity <= wanted {
            let taken = (self.quantity, self.cost_basis);
            self.quantity = Decimal::ZERO;
            self.cost_basis = Decimal::ZERO;
            Some(taken)
        } else {
            let cost = self
                .cost_basis
                .checked_div(self.quantity)?
                .checked_mul(wanted)?
                .min(self.cost_basis);
            self.quantity -= wanted;
            self.cost_basis -= cost;
            Some((wanted, cost))
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.quantity.is_zero()
    }
}

impl From<Lot> for Holding {
    fn from(lot: Lot) -> Self {
        Holding {
            symbol: lot.symbol,
            quantity: lot.quantity,
            avg_cost: lot.unit_price,
            total_cost_basis: lot.cost_basis,
            purchase_date: lot.purchase_date,
        }
    }
}

/// Purchase lots of one asset, oldest first
#[derive(Debug, Clone)]
pub struct LotQueue {
    symbol: String,
    lots: VecDeque<Lot>,
}

impl LotQueue {
    pub fn new(symbol: String) -> Self {
        LotQueue {
            symbol,
            lots: VecDeque::new(),
        }
    }

    pub fn buy(&mut self, tx: &Transaction) -> Result<(), ValidationError> {
        let lot = Lot::from_buy(tx)
            .ok_or_else(|| ValidationError::overflow(format_args!("{} purchase total", self.symbol)))?;
        log::debug!(
            "{} BUY: qty={} @ {}, cost={}. Open lots: {}",
            self.symbol,
            lot.quantity,
            lot.unit_price,
            lot.cost_basis,
            self.lots.len() + 1
        );
        self.lots.push_back(lot);
        Ok(())
    }

    /// Match a sale against the oldest lots, appending one record per lot touched.
    /// Returns the quantity left uncovered when the lots run out.
    pub fn sell(
        &mut self,
        tx: &Transaction,
        matches: &mut Vec<MatchRecord>,
    ) -> Result<Decimal, ValidationError> {
        let mut remaining = tx.quantity;

        while remaining > Decimal::ZERO {
            let Some(lot) = self.lots.front_mut() else {
                break;
            };
            let purchase_date = lot.purchase_date;
            let (quantity, cost_basis) = lot
                .consume(remaining)
                .ok_or_else(|| ValidationError::overflow(format_args!("{} lot cost basis", self.symbol)))?;
            if lot.is_exhausted() {
                self.lots.pop_front();
            }

            let proceeds = quantity
                .checked_mul(tx.price)
                .ok_or_else(|| ValidationError::overflow(format_args!("{} sale proceeds", self.symbol)))?;
            let holding_period_days = (tx.date - purchase_date).num_days();
            let term = Term::from_holding_days(holding_period_days);
            log::debug!(
                "{} SELL: qty={} from lot of {}, cost={}, proceeds={}, {} ({} days)",
                self.symbol,
                quantity,
                purchase_date.format("%Y-%m-%d"),
                cost_basis,
                proceeds,
                term,
                holding_period_days
            );

            matches.push(MatchRecord {
                symbol: self.symbol.clone(),
                sale_date: tx.date,
                purchase_date,
                quantity_matched: quantity,
                proceeds,
                cost_basis,
                gain_loss: proceeds - cost_basis,
                holding_period_days,
                term,
            });
            remaining -= quantity;
        }

        Ok(remaining)
    }

    pub fn open_lots(&self) -> usize {
        self.lots.len()
    }

    pub fn into_holdings(self) -> impl Iterator<Item = Holding> {
        self.lots.into_iter().map(Holding::from)
    }
}

/// Compute realized gains with FIFO lot matching.
///
/// Each symbol is matched independently. Transactions with a non-positive
/// quantity or price, or whose total overflows, are excluded with a warning.
/// A sale larger than the lots available matches what it can; the excess is
/// reported as a [`Warning::UncoveredSell`] and contributes no gain.
///
/// Any other amount that leaves the `Decimal` range is a
/// [`ValidationError::Overflow`].
pub fn calculate(transactions: &[Transaction]) -> Result<TaxReport, ValidationError> {
    if transactions.is_empty() {
        return Err(ValidationError::NoTransactions);
    }

    let mut warnings = Vec::new();
    let (valid, invalid): (Vec<&Transaction>, Vec<&Transaction>) =
        transactions.iter().partition(|tx| tx.is_valid());
    if !invalid.is_empty() {
        log::warn!(
            "Ignoring {} transactions with zero, negative or overflowing quantity/price",
            invalid.len()
        );
        warnings.push(Warning::InvalidValue {
            rows: invalid.len(),
        });
    }
    if valid.is_empty() {
        return Err(ValidationError::NoValidTransactions {
            dropped: invalid.len(),
        });
    }

    // Symbols in order of first appearance
    let mut symbols: Vec<&str> = Vec::new();
    let mut by_symbol: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for &tx in &valid {
        by_symbol
            .entry(tx.symbol.as_str())
            .or_insert_with(|| {
                symbols.push(tx.symbol.as_str());
                Vec::new()
            })
            .push(tx);
    }

    let mut matches: Vec<MatchRecord> = Vec::new();
    let mut holdings: Vec<Holding> = Vec::new();

    for symbol in symbols {
        let mut symbol_txs = by_symbol.remove(symbol).unwrap_or_default();
        symbol_txs.sort_by_key(|tx| tx.date);

        let mut queue = LotQueue::new(symbol.to_string());
        for tx in symbol_txs {
            match tx.kind {
                TransactionType::Buy => queue.buy(tx)?,
                TransactionType::Sell => {
                    let uncovered = queue.sell(tx, &mut matches)?;
                    if uncovered > Decimal::ZERO {
                        let warning = Warning::UncoveredSell {
                            symbol: symbol.to_string(),
                            date: tx.date,
                            requested: tx.quantity,
                            uncovered,
                        };
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }
        log::debug!("{} open lots remaining: {}", symbol, queue.open_lots());
        holdings.extend(queue.into_holdings());
    }

    let short_term_gain = sum_gains(&matches, Term::ShortTerm)?;
    let long_term_gain = sum_gains(&matches, Term::LongTerm)?;
    short_term_gain
        .checked_add(long_term_gain)
        .ok_or_else(|| ValidationError::overflow("total gain/loss"))?;
    // Report totals are plain sums; reject inputs where they would not fit
    checked_total(matches.iter().map(|m| m.proceeds), "total proceeds")?;
    checked_total(matches.iter().map(|m| m.cost_basis), "total cost basis")?;
    checked_total(holdings.iter().map(|h| h.total_cost_basis), "holdings cost basis")?;
    let estimated_tax = estimate_tax(short_term_gain, long_term_gain);

    log::info!(
        "Matched {} lots across {} transactions: short-term {}, long-term {}",
        matches.len(),
        valid.len(),
        short_term_gain,
        long_term_gain
    );

    Ok(TaxReport {
        short_term_gain,
        long_term_gain,
        estimated_tax,
        matches,
        holdings,
        transaction_count: valid.len(),
        tax_rate_info: TaxRateInfo::default(),
        warnings,
    })
}

fn sum_gains(matches: &[MatchRecord], term: Term) -> Result<Decimal, ValidationError> {
    checked_total(
        matches
            .iter()
            .filter(|m| m.term == term)
            .map(|m| m.gain_loss),
        format_args!("{} gain total", term),
    )
}

fn checked_total<I>(values: I, what: impl fmt::Display) -> Result<Decimal, ValidationError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| ValidationError::overflow(what))
}

/// Tax on each bucket floors at zero independently; losses never offset the other bucket
pub fn estimate_tax(short_term_gain: Decimal, long_term_gain: Decimal) -> Decimal {
    short_term_gain.max(Decimal::ZERO) * SHORT_TERM_RATE
        + long_term_gain.max(Decimal::ZERO) * LONG_TERM_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn buy(date: &str, symbol: &str, quantity: Decimal, price: Decimal) -> Transaction {
        Transaction {
            date: at(date),
            symbol: symbol.to_string(),
            kind: TransactionType::Buy,
            quantity,
            price,
        }
    }

    fn sell(date: &str, symbol: &str, quantity: Decimal, price: Decimal) -> Transaction {
        Transaction {
            date: at(date),
            symbol: symbol.to_string(),
            kind: TransactionType::Sell,
            quantity,
            price,
        }
    }

    #[test]
    fn lot_partial_consumption() {
        let mut lot = Lot::from_buy(&buy("2023-01-01", "BTC", dec!(2), dec!(100))).unwrap();
        assert_eq!(lot.cost_basis, dec!(200));

        let (qty, cost) = lot.consume(dec!(0.5)).unwrap();
        assert_eq!(qty, dec!(0.5));
        assert_eq!(cost, dec!(50));
        assert_eq!(lot.quantity, dec!(1.5));
        assert_eq!(lot.cost_basis, dec!(150));
        assert!(!lot.is_exhausted());

        let (qty, cost) = lot.consume(dec!(5)).unwrap();
        assert_eq!(qty, dec!(1.5));
        assert_eq!(cost, dec!(150));
        assert!(lot.is_exhausted());
    }

    #[test]
    fn btc_partial_sale_scenario() {
        let txs = vec![
            buy("2023-01-15", "BTC", dec!(0.5), dec!(25000)),
            buy("2023-01-20", "BTC", dec!(0.25), dec!(24500)),
            sell("2023-02-01", "BTC", dec!(0.3), dec!(26000)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 1);
        let m = &report.matches[0];
        assert_eq!(m.quantity_matched, dec!(0.3));
        assert_eq!(m.cost_basis, dec!(7500.00));
        assert_eq!(m.proceeds, dec!(7800.00));
        assert_eq!(m.gain_loss, dec!(300.00));
        assert_eq!(m.holding_period_days, 17);
        assert_eq!(m.term, Term::ShortTerm);
        assert_eq!(m.purchase_date, at("2023-01-15"));

        assert_eq!(report.short_term_gain, dec!(300));
        assert_eq!(report.long_term_gain, Decimal::ZERO);
        assert_eq!(report.estimated_tax, dec!(66));

        assert_eq!(report.holdings.len(), 2);
        assert_eq!(report.holdings[0].quantity, dec!(0.2));
        assert_eq!(report.holdings[0].avg_cost, dec!(25000));
        assert_eq!(report.holdings[0].total_cost_basis, dec!(5000));
        assert_eq!(report.holdings[1].quantity, dec!(0.25));
        assert_eq!(report.holdings[1].avg_cost, dec!(24500));
        assert_eq!(report.holdings[1].total_cost_basis, dec!(6125));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn sale_spanning_lots_uses_oldest_first() {
        let txs = vec![
            buy("2023-01-01", "ETH", dec!(1), dec!(100)),
            buy("2023-01-02", "ETH", dec!(1), dec!(200)),
            buy("2023-01-03", "ETH", dec!(1), dec!(300)),
            sell("2023-02-01", "ETH", dec!(2.5), dec!(400)),
        ];

        let report = calculate(&txs).unwrap();

        let purchases: Vec<_> = report.matches.iter().map(|m| m.purchase_date).collect();
        assert_eq!(
            purchases,
            vec![at("2023-01-01"), at("2023-01-02"), at("2023-01-03")]
        );
        let costs: Vec<_> = report.matches.iter().map(|m| m.cost_basis).collect();
        assert_eq!(costs, vec![dec!(100), dec!(200), dec!(150)]);
        let sold: Decimal = report.matches.iter().map(|m| m.quantity_matched).sum();
        assert_eq!(sold, dec!(2.5));
        assert_eq!(report.short_term_gain, dec!(1000) - dec!(450));

        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].quantity, dec!(0.5));
        assert_eq!(report.holdings[0].total_cost_basis, dec!(150));
    }

    #[test]
    fn cost_basis_conserved_across_splits() {
        let txs = vec![
            buy("2023-01-01", "SOL", dec!(3), dec!(10)),
            sell("2023-01-05", "SOL", dec!(1), dec!(12)),
            sell("2023-01-06", "SOL", dec!(1), dec!(12)),
            sell("2023-01-07", "SOL", dec!(1), dec!(12)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 3);
        let total_cost: Decimal = report.matches.iter().map(|m| m.cost_basis).sum();
        assert_eq!(total_cost, dec!(30));
        assert!(report.holdings.is_empty());
    }

    #[test]
    fn holding_period_boundary() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            buy("2023-01-02", "BTC", dec!(1), dec!(100)),
            // 364 days after the first lot
            sell("2023-12-31", "BTC", dec!(1), dec!(150)),
            // 365 days after the second lot
            sell("2024-01-01", "BTC", dec!(1), dec!(130)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches[0].holding_period_days, 364);
        assert_eq!(report.matches[0].term, Term::ShortTerm);
        assert_eq!(report.matches[1].holding_period_days, 364);
        assert_eq!(report.matches[1].term, Term::ShortTerm);

        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            sell("2024-01-01", "BTC", dec!(1), dec!(130)),
        ];
        let report = calculate(&txs).unwrap();
        assert_eq!(report.matches[0].holding_period_days, 365);
        assert_eq!(report.matches[0].term, Term::LongTerm);
        assert_eq!(report.long_term_gain, dec!(30));
        assert_eq!(report.estimated_tax, dec!(4.5));
    }

    #[test]
    fn sell_without_buys_produces_no_matches() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            sell("2023-02-01", "ETH", dec!(2), dec!(1500)),
        ];

        let report = calculate(&txs).unwrap();

        assert!(report.matches.is_empty());
        assert_eq!(report.short_term_gain, Decimal::ZERO);
        assert_eq!(report.long_term_gain, Decimal::ZERO);
        assert_eq!(
            report.warnings,
            vec![Warning::UncoveredSell {
                symbol: "ETH".to_string(),
                date: at("2023-02-01"),
                requested: dec!(2),
                uncovered: dec!(2),
            }]
        );
    }

    #[test]
    fn oversized_sell_matches_what_it_can() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            sell("2023-02-01", "BTC", dec!(1.5), dec!(200)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].quantity_matched, dec!(1));
        assert_eq!(report.short_term_gain, dec!(100));
        assert!(report.holdings.is_empty());
        assert!(matches!(
            report.warnings.as_slice(),
            [Warning::UncoveredSell { uncovered, .. }] if *uncovered == dec!(0.5)
        ));
    }

    #[test]
    fn symbols_are_independent() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            buy("2023-01-02", "ETH", dec!(1), dec!(10)),
            sell("2023-01-03", "ETH", dec!(1), dec!(20)),
            sell("2023-01-04", "BTC", dec!(1), dec!(90)),
        ];

        let report = calculate(&txs).unwrap();

        // grouped by symbol in order of first appearance
        let symbols: Vec<_> = report.matches.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH"]);
        assert_eq!(report.matches[0].gain_loss, dec!(-10));
        assert_eq!(report.matches[1].gain_loss, dec!(10));
        assert_eq!(report.short_term_gain, Decimal::ZERO);
    }

    #[test]
    fn unsorted_input_is_sorted_per_symbol() {
        let txs = vec![
            sell("2023-03-01", "BTC", dec!(1), dec!(300)),
            buy("2023-02-01", "BTC", dec!(1), dec!(200)),
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].purchase_date, at("2023-01-01"));
        assert_eq!(report.matches[0].gain_loss, dec!(200));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn same_timestamp_keeps_input_order() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            sell("2023-01-01", "BTC", dec!(1), dec!(150)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].holding_period_days, 0);
    }

    #[test]
    fn tax_floor_applies_per_bucket() {
        assert_eq!(estimate_tax(dec!(-500), dec!(1000)), dec!(150));
        assert_eq!(estimate_tax(dec!(1000), dec!(-500)), dec!(220));
        assert_eq!(estimate_tax(dec!(-1), dec!(-1)), Decimal::ZERO);

        let txs = vec![
            buy("2022-01-01", "BTC", dec!(1), dec!(100)),
            buy("2023-06-01", "BTC", dec!(1), dec!(500)),
            sell("2023-07-01", "BTC", dec!(2), dec!(300)),
        ];
        let report = calculate(&txs).unwrap();
        assert_eq!(report.long_term_gain, dec!(200));
        assert_eq!(report.short_term_gain, dec!(-200));
        assert_eq!(report.estimated_tax, dec!(30));
    }

    #[test]
    fn calculation_is_deterministic() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(0.7), dec!(16500.33)),
            buy("2023-01-01", "ETH", dec!(3), dec!(1200)),
            buy("2023-03-11", "BTC", dec!(0.13), dec!(20100)),
            sell("2023-06-30", "BTC", dec!(0.75), dec!(30400.1)),
            sell("2024-02-01", "ETH", dec!(1.1), dec!(2300)),
        ];

        let first = calculate(&txs).unwrap();
        let second = calculate(&txs).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn invalid_values_are_excluded() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(1), dec!(100)),
            buy("2023-01-02", "BTC", dec!(0), dec!(100)),
            sell("2023-01-03", "BTC", dec!(1), dec!(-1)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.warnings, vec![Warning::InvalidValue { rows: 2 }]);
        assert_eq!(report.holdings.len(), 1);
    }

    #[test]
    fn overflowing_buy_is_excluded() {
        let txs = vec![
            buy("2023-01-01", "SHIB", dec!(100000000000000), dec!(1000000000000000)),
            buy("2023-01-02", "BTC", dec!(1), dec!(100)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.warnings, vec![Warning::InvalidValue { rows: 1 }]);
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].symbol, "BTC");

        assert_eq!(
            calculate(&txs[..1]),
            Err(ValidationError::NoValidTransactions { dropped: 1 })
        );
    }

    #[test]
    fn large_partial_sale_divides_before_multiplying() {
        // cost basis 1e28 fits, but cost basis * sold quantity would not
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(100000000000000), dec!(100000000000000)),
            sell("2023-01-02", "BTC", dec!(50000000000000), dec!(100000000000000)),
        ];

        let report = calculate(&txs).unwrap();

        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].cost_basis, dec!(5000000000000000000000000000));
        assert_eq!(report.matches[0].gain_loss, Decimal::ZERO);
        assert_eq!(
            report.holdings[0].total_cost_basis,
            dec!(5000000000000000000000000000)
        );
    }

    #[test]
    fn overflowing_gain_total_is_an_error() {
        let txs = vec![
            buy("2023-01-01", "BTC", dec!(2), dec!(1)),
            sell("2023-01-02", "BTC", dec!(1), dec!(50000000000000000000000000000)),
            sell("2023-01-03", "BTC", dec!(1), dec!(50000000000000000000000000000)),
        ];

        let err = calculate(&txs).unwrap_err();

        assert!(matches!(err, ValidationError::Overflow { .. }));
        assert_eq!(
            err.to_string(),
            "Short-term gain total exceeds the supported decimal range"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(calculate(&[]), Err(ValidationError::NoTransactions));

        let txs = vec![buy("2023-01-01", "BTC", dec!(0), dec!(100))];
        assert_eq!(
            calculate(&txs),
            Err(ValidationError::NoValidTransactions { dropped: 1 })
        );
    }

    #[test]
    fn term_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Term::LongTerm).unwrap(),
            "\"Long-term\""
        );
        assert_eq!(Term::ShortTerm.to_string(), "Short-term");
    }
}
