//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, roster
//!   loading, report serialization)
//! - `sync_reader` - Synchronous expense reader with iterator interface
//! - `async_reader` - Asynchronous expense reader with batch interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_expense_record, convert_member_record, read_household_csv, write_balances_csv,
    write_settlements_csv, CsvExpenseRecord, CsvMemberRecord,
};
pub use sync_reader::SyncReader;
