mod cmd;
mod core;
mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fifotax", version, about = "FIFO capital gains from crypto exchange exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite an exchange export as canonical date,symbol,type,quantity,price rows
    Normalize(cmd::normalize::NormalizeCommand),
    /// Show every sale matched against purchase lots
    Report(cmd::report::ReportCommand),
    /// Show total gains and estimated tax
    Summary(cmd::summary::SummaryCommand),
    /// Show lots that remain unsold
    Holdings(cmd::holdings::HoldingsCommand),
    /// Check an export for data quality issues
    Validate(cmd::validate::ValidateCommand),
    /// Print expected input and output formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Normalize(normalize) => normalize.exec(),
        Command::Report(report) => report.exec(),
        Command::Summary(summary) => summary.exec(),
        Command::Holdings(holdings) => holdings.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
