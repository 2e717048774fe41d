//! Thread-safe expense storage for async batch ingest
//!
//! This module provides the `AsyncExpenseStore` struct, which persists
//! processed expenses using a concurrent map so multiple ingest tasks can
//! insert safely.
//!
//! # Thread Safety
//!
//! `DashMap` provides fine-grained locking through internal sharding:
//! inserts for different expense IDs proceed in parallel, and the
//! duplicate check and insert for a single ID are atomic through the
//! entry API.

use crate::types::{ExpenseId, ProcessedExpense, SettleError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Thread-safe persisted-expense storage
///
/// The async counterpart of `ExpenseStore`, safe to share across tokio
/// tasks behind an `Arc`.
#[derive(Debug, Default)]
pub struct AsyncExpenseStore {
    /// Concurrent map of expense IDs to processed expenses
    expenses: DashMap<ExpenseId, ProcessedExpense>,
}

impl AsyncExpenseStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            expenses: DashMap::new(),
        }
    }

    /// Store a processed expense, rejecting duplicates
    ///
    /// The duplicate check and the insert happen atomically: when two
    /// tasks race on the same ID, exactly one wins and the other receives
    /// a `DuplicateExpense` error.
    ///
    /// # Arguments
    ///
    /// * `expense` - The processed expense to store
    ///
    /// # Errors
    ///
    /// Returns `DuplicateExpense` if an expense with the same ID is
    /// already stored. The first occurrence is kept.
    pub fn try_store(&self, expense: ProcessedExpense) -> Result<(), SettleError> {
        let id = expense.record.id;
        let owner = expense.record.owner;

        match self.expenses.entry(id) {
            Entry::Occupied(_) => Err(SettleError::duplicate_expense(id, owner)),
            Entry::Vacant(slot) => {
                slot.insert(expense);
                Ok(())
            }
        }
    }

    /// Get a stored expense by ID
    ///
    /// Returns a clone: a snapshot at the time of the call.
    pub fn get(&self, id: ExpenseId) -> Option<ProcessedExpense> {
        self.expenses.get(&id).map(|entry| entry.value().clone())
    }

    /// Snapshot all stored expenses for aggregation
    ///
    /// Clones the current contents. Concurrent inserts after the snapshot
    /// are not reflected; callers take the snapshot once ingest has
    /// completed.
    pub fn snapshot(&self) -> Vec<ProcessedExpense> {
        self.expenses.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of stored expenses
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the store holds no expenses
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
