use crate::strategy::{BatchConfig, RunOptions};
use crate::types::DEFAULT_CURRENCY;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute household balances and settlement suggestions from expenses
#[derive(Parser, Debug)]
#[command(name = "settlement-engine")]
#[command(
    about = "Compute household balances and settlement suggestions from expense records",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file path containing expense records
    #[arg(value_name = "EXPENSES", help = "Path to the expenses CSV file")]
    pub expenses_file: PathBuf,

    /// Household roster CSV (members, emails, split weights)
    #[arg(
        long = "members",
        value_name = "FILE",
        help = "Path to the household members CSV file"
    )]
    pub members_file: PathBuf,

    /// Processing strategy to use for ingesting expenses
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Which report to write to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "balances",
        help = "Report to produce: 'balances' or 'settlements'"
    )]
    pub report: ReportKind,

    /// Unit of account for settlement suggestions
    #[arg(
        long = "currency",
        value_name = "CODE",
        default_value = DEFAULT_CURRENCY,
        help = "Currency code attached to settlement suggestions"
    )]
    pub currency: String,

    /// Number of expenses per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of expenses per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent batches (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies for expense ingest
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available report kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Per-member net balances
    Balances,

    /// Suggested settlement payments
    Settlements,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// This method constructs a BatchConfig using the CLI arguments if
    /// provided, or falls back to default values. It also validates the
    /// configuration and prints warnings to stderr if any issues are
    /// detected.
    ///
    /// # Returns
    ///
    /// A `BatchConfig` with values from CLI arguments or defaults.
    pub fn to_batch_config(&self) -> BatchConfig {
        // Use provided values or defaults
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            // At least one custom value provided, create custom config
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            // No custom values, use all defaults
            BatchConfig::default()
        }
    }

    /// Create RunOptions from CLI arguments
    ///
    /// Bundles the input paths, report selection, and unit of account for
    /// the processing strategies.
    pub fn to_run_options(&self) -> RunOptions {
        RunOptions {
            expenses_path: self.expenses_file.clone(),
            members_path: self.members_file.clone(),
            report: self.report,
            currency: self.currency.clone(),
        }
    }
}
