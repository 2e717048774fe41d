//! Expense Settlement Engine Library
//! # Overview
//!
//! This library provides a household expense settlement engine with a
//! streaming CSV pipeline implementing both sync and an async strategy
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ExpenseRecord, MemberBalance, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::split`] - Split calculator: per-member owed breakdowns
//!   - [`core::balance`] - Balance aggregator over persisted splits
//!   - [`core::settle`] - Debt simplifier producing settlement suggestions
//!   - [`core::recurrence`] - Recurrence date calculator
//!   - [`core::engine`] - Expense processing orchestration
//! - [`io`] - I/O handling with pluggable processing strategies
//!
//! # Split Methods
//!
//! The engine supports four split methods:
//!
//! - **Equal**: Divide the amount evenly across all household members
//! - **Percentage**: Divide according to the household weight table,
//!   falling back to equal when no weights are configured
//! - **Custom**: Use caller-supplied per-member amounts verbatim
//! - **None**: The payer owes the full amount
//!
//! # Balance Semantics
//!
//! Each member's balance is derived from the full expense set:
//! - `total_paid`: Sum of amounts where the member was the payer
//! - `total_owed`: Sum of the member's shares across all split details
//! - `balance`: `total_paid - total_owed` (positive = net creditor)
//!
//! Settlement suggestions reduce the balances to a short list of
//! debtor-to-creditor payments using greedy two-pointer matching with a
//! 0.01 currency-unit tolerance.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    aggregate_balances, compute_split, next_occurrence, simplify_debts, Frequency,
    MemberDirectory, RecurrenceSchedule, SettlementEngine,
};
pub use io::{read_household_csv, write_balances_csv, write_settlements_csv};
pub use types::{
    BalanceReport, DebtRelationship, ExpenseId, ExpenseRecord, HouseholdProfile, MemberBalance,
    MemberId, MemberProfile, SettleError, SplitMethod, SplitShare,
};
