//! Error types for the Expense Settlement Engine
//!
//! This module defines all error types that can occur while computing
//! splits, aggregating balances, and ingesting expense records.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Calculation Errors**: Negative amounts, empty membership, duplicate
//!   expense identifiers
//! - **Arithmetic Errors**: Overflow in balance accumulation

use super::member::{ExpenseId, MemberId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the settlement engine
///
/// This enum represents all possible errors that can occur during
/// expense processing. Each variant includes relevant context to help
/// diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettleError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Expense amount is negative
    ///
    /// Amounts must be non-negative; the expense is rejected before any
    /// split computation. This is a recoverable error.
    #[error("Invalid amount {amount} for expense {expense}: must be non-negative")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
        /// Expense ID
        expense: ExpenseId,
    },

    /// Split requested against a household with no members
    ///
    /// Methods that divide the amount fail fast rather than divide by a
    /// member count of zero. This is a recoverable error.
    #[error("Cannot compute {method} split for expense {expense}: household has no members")]
    EmptyMembership {
        /// The split method that required division
        method: String,
        /// Expense ID
        expense: ExpenseId,
    },

    /// Duplicate expense ID encountered
    ///
    /// Expense IDs must be unique. This is a recoverable error - the
    /// duplicate expense is ignored and the first occurrence is kept.
    #[error("Duplicate expense ID {expense} for member {owner}")]
    DuplicateExpense {
        /// Expense ID that is duplicated
        expense: ExpenseId,
        /// Owner of the rejected duplicate
        owner: MemberId,
    },

    /// Arithmetic overflow would occur
    ///
    /// This is a recoverable error - the contribution is rejected to
    /// maintain ledger integrity.
    #[error("Arithmetic overflow in {operation} for member {member}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Member ID
        member: MemberId,
    },
}

// Conversion from io::Error to SettleError
impl From<std::io::Error> for SettleError {
    fn from(error: std::io::Error) -> Self {
        SettleError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SettleError
impl From<csv::Error> for SettleError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        SettleError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettleError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, expense: ExpenseId) -> Self {
        SettleError::InvalidAmount { amount, expense }
    }

    /// Create an EmptyMembership error
    pub fn empty_membership(method: &str, expense: ExpenseId) -> Self {
        SettleError::EmptyMembership {
            method: method.to_string(),
            expense,
        }
    }

    /// Create a DuplicateExpense error
    pub fn duplicate_expense(expense: ExpenseId, owner: MemberId) -> Self {
        SettleError::DuplicateExpense { expense, owner }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, member: MemberId) -> Self {
        SettleError::ArithmeticOverflow {
            operation: operation.to_string(),
            member,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::file_not_found(
        SettleError::FileNotFound { path: "expenses.csv".to_string() },
        "File not found: expenses.csv"
    )]
    #[case::io_error(
        SettleError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        SettleError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        SettleError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_amount(
        SettleError::InvalidAmount { amount: Decimal::new(-4250, 2), expense: 7 },
        "Invalid amount -42.50 for expense 7: must be non-negative"
    )]
    #[case::empty_membership(
        SettleError::EmptyMembership { method: "equal".to_string(), expense: 3 },
        "Cannot compute equal split for expense 3: household has no members"
    )]
    #[case::duplicate_expense(
        SettleError::DuplicateExpense { expense: 9, owner: 1 },
        "Duplicate expense ID 9 for member 1"
    )]
    #[case::arithmetic_overflow(
        SettleError::ArithmeticOverflow { operation: "credit_paid".to_string(), member: 2 },
        "Arithmetic overflow in credit_paid for member 2"
    )]
    fn test_error_display(#[case] error: SettleError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_amount(
        SettleError::invalid_amount(Decimal::new(-100, 2), 1),
        SettleError::InvalidAmount { amount: Decimal::new(-100, 2), expense: 1 }
    )]
    #[case::empty_membership(
        SettleError::empty_membership("percentage", 2),
        SettleError::EmptyMembership { method: "percentage".to_string(), expense: 2 }
    )]
    #[case::duplicate_expense(
        SettleError::duplicate_expense(5, 3),
        SettleError::DuplicateExpense { expense: 5, owner: 3 }
    )]
    #[case::arithmetic_overflow(
        SettleError::arithmetic_overflow("add_owed", 4),
        SettleError::ArithmeticOverflow { operation: "add_owed".to_string(), member: 4 }
    )]
    fn test_helper_functions(#[case] result: SettleError, #[case] expected: SettleError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: SettleError = io_error.into();
        assert!(matches!(error, SettleError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
