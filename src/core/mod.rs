//! Core business logic module
//!
//! This module contains the core settlement calculation components:
//! - `split` - Split calculator: per-member owed-amount breakdowns
//! - `balance` - Balance aggregator: net balances from persisted splits
//! - `settle` - Debt simplifier: minimal settlement suggestions
//! - `recurrence` - Recurrence date calculator for recurring expenses
//! - `ledger` - Paid/owed accumulation state
//! - `directory` - Member directory lookup collaborator
//! - `expense_store` - Persisted expense storage
//! - `engine` - Expense processing orchestration
//! - `async` - Asynchronous implementations (DashMap-backed)

pub mod balance;
pub mod directory;
pub mod engine;
pub mod expense_store;
pub mod ledger;
pub mod recurrence;
pub mod settle;
pub mod split;

pub mod r#async;

pub use balance::aggregate_balances;
pub use directory::MemberDirectory;
pub use engine::SettlementEngine;
pub use expense_store::ExpenseStore;
pub use ledger::Ledger;
pub use r#async::{AsyncExpenseStore, AsyncSettlementEngine, BatchProcessor};
pub use recurrence::{next_occurrence, Frequency, RecurrenceSchedule};
pub use settle::simplify_debts;
pub use split::compute_split;
