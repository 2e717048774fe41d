//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of
//! the ProcessingStrategy trait. It orchestrates the pipeline by
//! coordinating the roster loader, the SyncReader (for CSV input), and
//! the SettlementEngine (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Roster loading to `csv_format::read_household_csv`
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Split computation and balance queries to `SettlementEngine`
//! - CSV output to the csv_format writers
//!
//! # Memory Efficiency
//!
//! Expense rows stream through the reader one at a time; memory usage is
//! O(members + expenses stored for balance queries), not O(file size).

use crate::core::SettlementEngine;
use crate::io::csv_format::read_household_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{emit_report, ProcessingStrategy, RunOptions};
use std::fs::File;
use std::io::Write;

/// Synchronous processing strategy
///
/// Implements the ProcessingStrategy trait using single-threaded,
/// synchronous processing. Orchestrates the flow between roster loading,
/// expense ingest, balance aggregation, and report output.
///
/// # Thread Safety
///
/// SyncProcessingStrategy is Send + Sync, allowing it to be shared across
/// threads safely, even though it performs single-threaded processing.
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Run the settlement pipeline synchronously
    ///
    /// This method orchestrates the complete synchronous pipeline:
    /// 1. Loads the household roster (directory, membership, weights)
    /// 2. Creates a SettlementEngine for the household
    /// 3. Streams expense records through the engine
    /// 4. Aggregates balances over the ingested set
    /// 5. Writes the requested report to output
    ///
    /// # Error Handling
    ///
    /// Fatal errors (missing files, malformed roster) are returned
    /// immediately. Individual expense errors are logged to stderr and
    /// processing continues.
    fn process(&self, options: &RunOptions, output: &mut dyn Write) -> Result<(), String> {
        // Load the household roster
        let members_file = File::open(&options.members_path).map_err(|e| {
            format!(
                "Failed to open file '{}': {}",
                options.members_path.display(),
                e
            )
        })?;
        let (directory, household) = read_household_csv(members_file)?;
        let default_method = household.default_split_method;

        // Create the settlement engine for this household
        let mut engine = SettlementEngine::new(directory, household);

        // Create sync reader for streaming CSV input
        let reader = SyncReader::new(&options.expenses_path, default_method)?;

        // Process each expense record through the engine
        for result in reader {
            match result {
                Ok(expense_record) => {
                    if let Err(e) = engine.process(expense_record) {
                        // Log expense processing errors to stderr
                        eprintln!("Expense processing error: {}", e);
                    }
                }
                Err(e) => {
                    // Log CSV parsing/conversion errors to stderr
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        // Aggregate balances over the full ingested set
        let report = engine.balance_report().map_err(|e| e.to_string())?;

        emit_report(&report, options.report, &options.currency, output)
    }
}
