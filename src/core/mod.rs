pub mod fifo;
pub mod normalize;
pub mod report;
pub mod transaction;
pub mod warnings;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use fifo::{
    calculate, estimate_tax, Lot, LotQueue, MatchRecord, Term, ValidationError,
    LONG_TERM_RATE, LONG_TERM_THRESHOLD_DAYS, SHORT_TERM_RATE,
};
#[allow(unused_imports)]
pub use normalize::{normalize, normalize_reader, Normalized, NormalizationError, RawTable};
pub use report::{
    Holding, HoldingCsvRecord, MatchCsvRecord, ReportDocument, Summary, SummaryRecord,
    TaxRateInfo, TaxReport,
};
pub use transaction::{Transaction, TransactionRecord, TransactionType, UnknownTransactionType};
pub use warnings::Warning;
