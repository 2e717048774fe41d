//! Persisted expense storage
//!
//! This module provides the `ExpenseStore` component that holds processed
//! expenses together with their computed split details. Split details are
//! computed once at ingest and stored here; balance queries walk the store
//! instead of recomputing splits.
//!
//! # Duplicate Handling
//!
//! Expense IDs must be unique. If a duplicate ID is encountered, only the
//! first occurrence is stored; the engine rejects the duplicate before it
//! reaches the store.

use crate::types::{ExpenseId, ProcessedExpense};
use std::collections::HashMap;

/// Stores processed expenses keyed by expense ID
pub struct ExpenseStore {
    /// Map of expense ID to processed expense
    expenses: HashMap<ExpenseId, ProcessedExpense>,
}

impl ExpenseStore {
    /// Create a new empty expense store
    pub fn new() -> Self {
        ExpenseStore {
            expenses: HashMap::new(),
        }
    }

    /// Store a processed expense
    ///
    /// If an expense with the same ID already exists, the new expense is
    /// ignored (first occurrence wins).
    ///
    /// # Arguments
    ///
    /// * `id` - The unique expense identifier
    /// * `expense` - The processed expense to store
    pub fn store(&mut self, id: ExpenseId, expense: ProcessedExpense) {
        self.expenses.entry(id).or_insert(expense);
    }

    /// Get a stored expense by ID
    ///
    /// # Returns
    ///
    /// * `Some(&ProcessedExpense)` - If the expense exists
    /// * `None` - If the expense ID is not found
    pub fn get(&self, id: ExpenseId) -> Option<&ProcessedExpense> {
        self.expenses.get(&id)
    }

    /// Iterate over all stored expenses
    ///
    /// Iteration order is unspecified; balance aggregation is commutative,
    /// so no ordering guarantee is required.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessedExpense> {
        self.expenses.values()
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

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}
