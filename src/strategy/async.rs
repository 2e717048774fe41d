//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of
//! the ProcessingStrategy trait. It ingests expenses in batches using
//! thread-based parallelism with payer-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (payer partitioning + tasks)
//!     └── AsyncSettlementEngine (thread-safe ingest)
//!         └── AsyncExpenseStore (thread-safe persisted expenses)
//! ```
//!
//! # Parallelism
//!
//! Batches are read sequentially; within each batch, expenses are
//! partitioned by payer and ingested in parallel across tokio worker
//! threads. Balance aggregation is commutative, so the final report does
//! not depend on ingest order.

use crate::core::r#async::{AsyncExpenseStore, AsyncSettlementEngine, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::read_household_csv;
use crate::strategy::{emit_report, ProcessingStrategy, RunOptions};
use std::io::Write;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how expenses are batched and the number of worker threads
/// for parallel ingest within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of expenses per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Implements the ProcessingStrategy trait using multi-threaded,
/// asynchronous batch ingest. Expenses are read in batches and each batch
/// is partitioned by payer for parallel processing across worker threads.
///
/// # Thread Safety
///
/// AsyncProcessingStrategy is Send + Sync and uses thread-safe components
/// internally (Arc-wrapped AsyncSettlementEngine with DashMap-based
/// storage).
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the settlement pipeline with async batch ingest
    ///
    /// This method implements the complete asynchronous pipeline:
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Loads the household roster
    /// 3. Creates thread-safe engine components
    /// 4. Reads expenses in batches from CSV using AsyncReader
    /// 5. Ingests each batch with payer-partitioned parallelism
    /// 6. Aggregates balances over the full ingested set
    /// 7. Writes the requested report to output
    ///
    /// # Error Handling
    ///
    /// Fatal errors (missing files, malformed roster, runtime errors) are
    /// returned immediately. Individual expense errors are logged to
    /// stderr and processing continues.
    fn process(&self, options: &RunOptions, output: &mut dyn Write) -> Result<(), String> {
        // Create tokio runtime for async execution
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        // Execute async processing within the runtime
        runtime.block_on(async {
            // Load the household roster
            let members_bytes = tokio::fs::read(&options.members_path).await.map_err(|e| {
                format!(
                    "Failed to open file '{}': {}",
                    options.members_path.display(),
                    e
                )
            })?;
            let (directory, household) = read_household_csv(members_bytes.as_slice())?;
            let default_method = household.default_split_method;

            // Create thread-safe engine components
            let expense_store = Arc::new(AsyncExpenseStore::new());
            let engine = Arc::new(AsyncSettlementEngine::new(
                Arc::new(directory),
                Arc::new(household),
                expense_store,
            ));

            // Create batch processor
            let processor = BatchProcessor::new(Arc::clone(&engine));

            // Open the expenses CSV file
            let file = tokio::fs::File::open(&options.expenses_path)
                .await
                .map_err(|e| {
                    format!(
                        "Failed to open file '{}': {}",
                        options.expenses_path.display(),
                        e
                    )
                })?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            // Create async CSV reader
            let mut reader = AsyncReader::new(compat_file, default_method);

            // Read and ingest batches until the file is exhausted
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;

                if batch.is_empty() {
                    break;
                }

                // Ingest the batch; individual failures are logged and
                // do not stop the run
                let results = processor.process_batch(batch).await;
                for failed in results.iter().filter(|r| r.result.is_err()) {
                    if let Err(e) = &failed.result {
                        eprintln!("Expense processing error: {}", e);
                    }
                }
            }

            // Aggregate balances over the full ingested set
            let report = engine.balance_report().map_err(|e| e.to_string())?;

            emit_report(&report, options.report, &options.currency, output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn members_csv() -> NamedTempFile {
        create_temp_csv(
            "member,name,email,weight,percentage\n\
             1,Alice,alice@example.com,,\n\
             2,Bob,bob@example.com,,\n\
             3,Carol,carol@example.com,,\n",
        )
    }

    fn options(
        expenses: &NamedTempFile,
        members: &NamedTempFile,
        report: ReportKind,
    ) -> RunOptions {
        RunOptions {
            expenses_path: expenses.path().to_path_buf(),
            members_path: members.path().to_path_buf(),
            report,
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn test_async_strategy_produces_balances() {
        let expenses =
            create_temp_csv("id,amount,method,owner,paid_by,splits\n1,90.00,equal,1,,\n");
        let members = members_csv();

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(&options(&expenses, &members, ReportKind::Balances), &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("1,Alice,alice@example.com,90.00,30.00,60.00"));
        assert!(output_str.contains("3,Carol,carol@example.com,0.00,30.00,-30.00"));
    }

    #[test]
    fn test_async_strategy_matches_sync_output() {
        let expenses = create_temp_csv(
            "id,amount,method,owner,paid_by,splits\n\
             1,90.00,equal,1,,\n\
             2,45.00,equal,2,,\n\
             3,50.00,none,3,,\n\
             4,90.00,custom,1,,1:20.00;2:70.00\n",
        );
        let members = members_csv();

        let sync_strategy = crate::strategy::SyncProcessingStrategy;
        let async_strategy = AsyncProcessingStrategy::new(BatchConfig::default());

        for report in [ReportKind::Balances, ReportKind::Settlements] {
            let mut sync_output = Vec::new();
            let mut async_output = Vec::new();

            sync_strategy
                .process(&options(&expenses, &members, report), &mut sync_output)
                .unwrap();
            async_strategy
                .process(&options(&expenses, &members, report), &mut async_output)
                .unwrap();

            assert_eq!(
                String::from_utf8(sync_output).unwrap(),
                String::from_utf8(async_output).unwrap()
            );
        }
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let members = members_csv();
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(
            &RunOptions {
                expenses_path: "nonexistent.csv".into(),
                members_path: members.path().to_path_buf(),
                report: ReportKind::Balances,
                currency: "EUR".to_string(),
            },
            &mut output,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_async_strategy_small_batches_cover_whole_file() {
        // Use a small batch size to force multiple batches
        let expenses = create_temp_csv(
            "id,amount,method,owner,paid_by,splits\n\
             1,30.00,equal,1,,\n\
             2,30.00,equal,2,,\n\
             3,30.00,equal,3,,\n\
             4,60.00,equal,1,,\n\
             5,30.00,equal,2,,\n",
        );
        let members = members_csv();

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(2, num_cpus::get()));
        let mut output = Vec::new();

        let result = strategy.process(&options(&expenses, &members, ReportKind::Balances), &mut output);
        assert!(result.is_ok());

        // 180.00 total, split equally: everyone owes 60.00
        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("1,Alice,alice@example.com,90.00,60.00,30.00"));
        assert!(output_str.contains("2,Bob,bob@example.com,60.00,60.00,0.00"));
        assert!(output_str.contains("3,Carol,carol@example.com,30.00,60.00,-30.00"));
    }
}
