//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `member`: Member identifiers, profiles, and balance types
//! - `expense`: Expense records and split vocabulary
//! - `settlement`: Settlement suggestions and currency handling
//! - `error`: Error types for the settlement engine

pub mod error;
pub mod expense;
pub mod member;
pub mod settlement;

pub use error::SettleError;
pub use expense::{
    ExpenseRecord, HouseholdProfile, MemberWeight, ProcessedExpense, SplitMethod, SplitShare,
};
pub use member::{BalanceReport, ExpenseId, MemberBalance, MemberId, MemberProfile};
pub use settlement::{CurrencyCode, DebtRelationship, MemberRef, DEFAULT_CURRENCY};
