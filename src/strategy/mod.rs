//! Processing strategy module for expense settlement pipelines
//!
//! This module defines the Strategy pattern for complete settlement
//! pipelines, encompassing roster loading, expense ingest, balance
//! aggregation, and report output. This allows different processing
//! implementations (synchronous, asynchronous batch) to be selected at
//! runtime.

use crate::cli::{ReportKind, StrategyType};
use crate::core::settle::simplify_debts;
use crate::io::csv_format::{write_balances_csv, write_settlements_csv};
use crate::types::{BalanceReport, CurrencyCode};
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Inputs and output selection for one pipeline run
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Path to the expenses CSV file
    pub expenses_path: PathBuf,

    /// Path to the household members CSV file
    pub members_path: PathBuf,

    /// Which report to write
    pub report: ReportKind,

    /// Unit of account attached to settlement suggestions
    pub currency: CurrencyCode,
}

/// Processing strategy trait for complete settlement pipelines
///
/// This trait defines the interface for different pipeline
/// implementations. Each strategy must be able to load the household
/// roster, ingest expense records from CSV, aggregate balances, and write
/// the requested report to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Run the settlement pipeline and write the requested report
    ///
    /// # Arguments
    ///
    /// * `options` - Input paths, report selection, and unit of account
    /// * `output` - Mutable reference to a writer for the report CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (possibly with recoverable
    ///   errors logged to stderr)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O
    ///   error, malformed roster, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either input file cannot be opened
    /// - The household roster is malformed
    /// - A fatal I/O error occurs during reading or writing
    ///
    /// Individual expense errors (malformed rows, duplicate IDs, negative
    /// amounts) are logged to stderr and do not abort the run; processing
    /// continues with the next record.
    fn process(&self, options: &RunOptions, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// This factory function implements the Strategy pattern by selecting and
/// instantiating the appropriate pipeline implementation at runtime based
/// on the provided strategy type and optional configuration.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

/// Write the requested report for a balance aggregation result
///
/// Shared tail of both pipelines: warns about unresolved participants on
/// stderr, then writes either the balances CSV or the settlement
/// suggestions derived from them.
pub(crate) fn emit_report(
    report: &BalanceReport,
    kind: ReportKind,
    currency: &str,
    output: &mut dyn Write,
) -> Result<(), String> {
    if !report.unresolved.is_empty() {
        let ids: Vec<String> = report.unresolved.iter().map(|id| id.to_string()).collect();
        eprintln!(
            "Warning: skipped contributions referencing unknown members: {}",
            ids.join(", ")
        );
    }

    match kind {
        ReportKind::Balances => write_balances_csv(report, output),
        ReportKind::Settlements => {
            let debts = simplify_debts(&report.balances, currency);
            write_settlements_csv(&debts, output)
        }
    }
}
