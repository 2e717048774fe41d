//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over expense records from a CSV file.
//! Supports batch reading for efficient async processing.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio for async runtime and concurrency primitives
//! - Batch reading for efficient processing
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of ExpenseRecords
//!                  ↓
//!           csv_format module
//!           (CsvExpenseRecord, convert_expense_record)
//! ```

use crate::io::csv_format::{convert_expense_record, CsvExpenseRecord};
use crate::types::{ExpenseRecord, SplitMethod};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV expense reader
///
/// Provides batch reading interface over expense records.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    default_method: SplitMethod,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    /// * `default_method` - Household default split method substituted for
    ///   blank method fields
    ///
    /// # Returns
    ///
    /// A new AsyncReader instance
    pub fn new(reader: R, default_method: SplitMethod) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            default_method,
        }
    }

    /// Read a batch of expense records
    ///
    /// This method reads up to `batch_size` records from the CSV file,
    /// converting them to ExpenseRecords. Invalid records are logged
    /// to stderr and skipped.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Maximum number of records to read
    ///
    /// # Returns
    ///
    /// A vector of successfully converted expense records.
    /// Returns an empty vector when the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<ExpenseRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvExpenseRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => {
                    match convert_expense_record(csv_record, self.default_method) {
                        Ok(expense_record) => batch.push(expense_record),
                        Err(e) => eprintln!("Record conversion error: {}", e),
                    }
                }
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
