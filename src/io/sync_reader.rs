//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over expense records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records
//! sequentially, delegating parsing and conversion to the csv_format
//! module. It maintains streaming behavior by processing CSV records one
//! at a time without loading the entire file into memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! Result<ExpenseRecord, String> for each CSV row:
//!
//! ```no_run
//! use expense_settlement_engine::io::sync_reader::SyncReader;
//! use expense_settlement_engine::types::SplitMethod;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("expenses.csv"), SplitMethod::Equal).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Processing expense: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_expense_record, CsvExpenseRecord};
use crate::types::{ExpenseRecord, SplitMethod};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV expense reader
///
/// Provides an iterator interface over expense records.
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    default_method: SplitMethod,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional trailing fields)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the expenses CSV file
    /// * `default_method` - Household default split method substituted for
    ///   blank method fields
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path, default_method: SplitMethod) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            default_method,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<ExpenseRecord, String>;

    /// Get the next expense record from the CSV file
    ///
    /// This method:
    /// 1. Reads the next CSV row and deserializes it to CsvExpenseRecord
    /// 2. Converts it to an ExpenseRecord via csv_format
    /// 3. Includes line numbers in error messages for debugging
    ///
    /// # Returns
    ///
    /// * `Some(Ok(ExpenseRecord))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvExpenseRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Add line number context to any conversion errors
                Some(
                    convert_expense_record(csv_record, self.default_method)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
