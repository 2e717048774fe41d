//! Expense ingest orchestration for async batch processing
//!
//! This module provides the `AsyncSettlementEngine` struct, which
//! orchestrates concurrent expense ingest over a thread-safe
//! `AsyncExpenseStore` and shared read-only household data.
//!
//! # Thread Safety
//!
//! The engine is cheap to clone and safe to share across tokio tasks:
//! household data and the member directory are immutable behind `Arc`,
//! and the expense store synchronizes its own inserts. Split computation
//! is pure, so concurrent ingest of different expenses never interferes.

use std::sync::Arc;

use crate::core::balance::aggregate_balances;
use crate::core::directory::MemberDirectory;
use crate::core::split::compute_split;
use crate::types::{
    BalanceReport, ExpenseRecord, HouseholdProfile, ProcessedExpense, SettleError,
};

use super::AsyncExpenseStore;

/// Concurrent expense ingest engine
///
/// The async counterpart of `SettlementEngine`: identical lifecycle
/// (splits computed once at ingest and persisted; balances derived fresh
/// per query), with ingest safe to run from many tasks at once.
#[derive(Debug, Clone)]
pub struct AsyncSettlementEngine {
    /// Member directory, shared read-only across tasks
    directory: Arc<MemberDirectory>,

    /// Household membership and weight table, shared read-only
    household: Arc<HouseholdProfile>,

    /// Thread-safe persisted-expense storage
    expense_store: Arc<AsyncExpenseStore>,
}

impl AsyncSettlementEngine {
    /// Create a new AsyncSettlementEngine
    ///
    /// # Arguments
    ///
    /// * `directory` - Arc-wrapped member directory
    /// * `household` - Arc-wrapped household profile
    /// * `expense_store` - Arc-wrapped thread-safe expense store
    pub fn new(
        directory: Arc<MemberDirectory>,
        household: Arc<HouseholdProfile>,
        expense_store: Arc<AsyncExpenseStore>,
    ) -> Self {
        Self {
            directory,
            household,
            expense_store,
        }
    }

    /// Process a single expense record
    ///
    /// Computes the split breakdown and persists the processed expense.
    /// Safe to call concurrently from multiple tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, a dividing method was
    /// requested against an empty household, or the expense ID duplicates
    /// an already-stored expense.
    pub fn process_expense(&self, record: ExpenseRecord) -> Result<(), SettleError> {
        let split_details = compute_split(
            record.id,
            record.amount,
            record.method,
            &record.splits,
            Some(record.payer()),
            &self.household,
        )?;

        self.expense_store.try_store(ProcessedExpense {
            record,
            split_details,
        })
    }

    /// Compute net balances over all ingested expenses
    ///
    /// Takes a snapshot of the store and aggregates it; callers invoke
    /// this after ingest has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if accumulating a contribution would overflow.
    pub fn balance_report(&self) -> Result<BalanceReport, SettleError> {
        let expenses = self.expense_store.snapshot();
        aggregate_balances(expenses.iter(), &self.directory)
    }

    /// Number of expenses ingested so far
    pub fn expense_count(&self) -> usize {
        self.expense_store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MemberProfile, SplitMethod};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn engine(members: &[(u32, &str)]) -> AsyncSettlementEngine {
        let directory: MemberDirectory = members
            .iter()
            .map(|&(id, name)| {
                (
                    id,
                    MemberProfile {
                        name: name.to_string(),
                        email: format!("{}@example.com", name.to_lowercase()),
                    },
                )
            })
            .collect();
        let household = HouseholdProfile {
            members: members.iter().map(|&(id, _)| id).collect(),
            member_weights: Vec::new(),
            default_split_method: SplitMethod::Equal,
        };
        AsyncSettlementEngine::new(
            Arc::new(directory),
            Arc::new(household),
            Arc::new(AsyncExpenseStore::new()),
        )
    }

    fn record(id: u64, amount: &str, owner: u32) -> ExpenseRecord {
        ExpenseRecord {
            id,
            amount: dec(amount),
            method: SplitMethod::Equal,
            owner,
            paid_by: None,
            splits: Vec::new(),
        }
    }

    #[test]
    fn test_process_and_report() {
        let engine = engine(&[(1, "Alice"), (2, "Bob"), (3, "Carol")]);

        engine.process_expense(record(1, "90.00", 1)).unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances.len(), 3);
        assert_eq!(report.balances[0].balance, dec("60.00"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let engine = engine(&[(1, "Alice"), (2, "Bob")]);

        engine.process_expense(record(1, "10.00", 1)).unwrap();
        let result = engine.process_expense(record(1, "20.00", 2));

        assert!(matches!(
            result.unwrap_err(),
            SettleError::DuplicateExpense { expense: 1, .. }
        ));
        assert_eq!(engine.expense_count(), 1);
    }

    #[test]
    fn test_matches_sync_engine_results() {
        let members = [(1, "Alice"), (2, "Bob"), (3, "Carol")];
        let async_engine = engine(&members);

        let directory: MemberDirectory = members
            .iter()
            .map(|&(id, name)| {
                (
                    id,
                    MemberProfile {
                        name: name.to_string(),
                        email: format!("{}@example.com", name.to_lowercase()),
                    },
                )
            })
            .collect();
        let household = HouseholdProfile {
            members: vec![1, 2, 3],
            member_weights: Vec::new(),
            default_split_method: SplitMethod::Equal,
        };
        let mut sync_engine = crate::core::SettlementEngine::new(directory, household);

        for (id, amount, owner) in [(1u64, "90.00", 1u32), (2, "45.00", 2), (3, "7.50", 3)] {
            async_engine.process_expense(record(id, amount, owner)).unwrap();
            sync_engine.process(record(id, amount, owner)).unwrap();
        }

        assert_eq!(
            async_engine.balance_report().unwrap(),
            sync_engine.balance_report().unwrap()
        );
    }

    #[tokio::test]
    async fn test_concurrent_ingest_produces_consistent_report() {
        let engine = engine(&[(1, "Alice"), (2, "Bob")]);

        let mut tasks = Vec::new();
        for worker in 0..4u64 {
            let engine = engine.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..10u64 {
                    let owner = if worker % 2 == 0 { 1 } else { 2 };
                    engine
                        .process_expense(record(worker * 10 + i, "10.00", owner))
                        .unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let report = engine.balance_report().unwrap();
        assert_eq!(engine.expense_count(), 40);

        // Conservation: credits equal debits
        let total: Decimal = report.balances.iter().map(|b| b.balance).sum();
        assert!(total.abs() <= dec("0.01"));
    }
}
