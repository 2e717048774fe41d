//! Expense processing engine
//!
//! This module provides the SettlementEngine that orchestrates expense
//! processing by coordinating the split calculator, the expense store, and
//! the balance aggregator.
//!
//! The engine enforces the expense lifecycle:
//! - Split details are computed once at ingest and persisted with the
//!   expense
//! - Duplicate expense IDs are rejected
//! - Balances are derived fresh on every query from the persisted set

use crate::core::balance::aggregate_balances;
use crate::core::directory::MemberDirectory;
use crate::core::expense_store::ExpenseStore;
use crate::core::split::compute_split;
use crate::types::{
    BalanceReport, ExpenseRecord, HouseholdProfile, ProcessedExpense, SettleError,
};

/// Expense processing engine
///
/// Orchestrates expense ingest and balance queries over a single
/// household. Holds the household's read-only reference data (membership,
/// weight table, member directory) and the persisted expense set.
pub struct SettlementEngine {
    directory: MemberDirectory,
    household: HouseholdProfile,
    expense_store: ExpenseStore,
}

impl SettlementEngine {
    /// Create a new SettlementEngine for a household
    ///
    /// # Arguments
    ///
    /// * `directory` - Member directory resolving IDs to names and emails
    /// * `household` - Household membership and weight table
    pub fn new(directory: MemberDirectory, household: HouseholdProfile) -> Self {
        SettlementEngine {
            directory,
            household,
            expense_store: ExpenseStore::new(),
        }
    }

    /// Process a single expense record
    ///
    /// Validates the record, computes its split details, and persists the
    /// processed expense. The split breakdown is computed here, once, and
    /// read back by later balance queries.
    ///
    /// # Arguments
    ///
    /// * `record` - The expense record to process
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the expense was processed successfully
    /// * `Err(SettleError)` if the expense failed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The expense ID duplicates an already-processed expense
    /// - The amount is negative
    /// - A dividing split method was requested against an empty household
    pub fn process(&mut self, record: ExpenseRecord) -> Result<(), SettleError> {
        // Check for duplicate expense ID
        if self.expense_store.get(record.id).is_some() {
            return Err(SettleError::duplicate_expense(record.id, record.owner));
        }

        let split_details = compute_split(
            record.id,
            record.amount,
            record.method,
            &record.splits,
            Some(record.payer()),
            &self.household,
        )?;

        // Persist the expense with its computed breakdown
        let id = record.id;
        self.expense_store.store(
            id,
            ProcessedExpense {
                record,
                split_details,
            },
        );

        Ok(())
    }

    /// Compute net balances over all processed expenses
    ///
    /// Balances are recomputed from the persisted expense set on every
    /// call and never cached; two calls over the same set yield identical
    /// results.
    ///
    /// # Errors
    ///
    /// Returns an error if accumulating a contribution would overflow.
    pub fn balance_report(&self) -> Result<BalanceReport, SettleError> {
        aggregate_balances(self.expense_store.iter(), &self.directory)
    }

    /// Number of expenses processed so far
    pub fn expense_count(&self) -> usize {
        self.expense_store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MemberProfile, SplitMethod, SplitShare};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn engine(members: &[(u32, &str)]) -> SettlementEngine {
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
        SettlementEngine::new(directory, household)
    }

    fn record(id: u64, amount: &str, method: SplitMethod, owner: u32) -> ExpenseRecord {
        ExpenseRecord {
            id,
            amount: dec(amount),
            method,
            owner,
            paid_by: None,
            splits: Vec::new(),
        }
    }

    #[test]
    fn test_process_equal_expense_and_report() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob"), (3, "Carol")]);

        engine
            .process(record(1, "90.00", SplitMethod::Equal, 1))
            .unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances.len(), 3);
        assert_eq!(report.balances[0].balance, dec("60.00"));
        assert_eq!(report.balances[1].balance, dec("-30.00"));
        assert_eq!(report.balances[2].balance, dec("-30.00"));
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn test_process_rejects_duplicate_id() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob")]);

        engine
            .process(record(1, "10.00", SplitMethod::Equal, 1))
            .unwrap();
        let result = engine.process(record(1, "99.00", SplitMethod::Equal, 2));

        assert!(matches!(
            result.unwrap_err(),
            SettleError::DuplicateExpense {
                expense: 1,
                owner: 2
            }
        ));

        // The first expense is untouched
        assert_eq!(engine.expense_count(), 1);
        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances[0].total_paid, dec("10.00"));
    }

    #[test]
    fn test_process_rejects_negative_amount() {
        let mut engine = engine(&[(1, "Alice")]);

        let result = engine.process(record(1, "-5.00", SplitMethod::Equal, 1));

        assert!(matches!(
            result.unwrap_err(),
            SettleError::InvalidAmount { .. }
        ));
        assert_eq!(engine.expense_count(), 0);
    }

    #[test]
    fn test_custom_splits_are_persisted_verbatim() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob")]);

        let mut rec = record(1, "90.00", SplitMethod::Custom, 1);
        rec.splits = vec![
            SplitShare {
                member: 1,
                amount: dec("20.00"),
                percentage: None,
            },
            SplitShare {
                member: 2,
                amount: dec("70.00"),
                percentage: None,
            },
        ];
        engine.process(rec).unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances[0].balance, dec("70.00")); // paid 90, owes 20
        assert_eq!(report.balances[1].balance, dec("-70.00"));
    }

    #[test]
    fn test_none_method_leaves_other_members_untouched() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob"), (3, "Carol")]);

        engine
            .process(record(1, "50.00", SplitMethod::None, 1))
            .unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances.len(), 1);
        assert_eq!(report.balances[0].member, 1);
        assert_eq!(report.balances[0].total_paid, dec("50.00"));
        assert_eq!(report.balances[0].total_owed, dec("50.00"));
        assert_eq!(report.balances[0].balance, dec("0.00"));
    }

    #[test]
    fn test_explicit_payer_is_credited() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob")]);

        let mut rec = record(1, "40.00", SplitMethod::Equal, 1);
        rec.paid_by = Some(2);
        engine.process(rec).unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.balances[1].total_paid, dec("40.00"));
        assert_eq!(report.balances[0].total_paid, Decimal::ZERO);
    }

    #[test]
    fn test_unresolved_payer_surfaces_in_report() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob")]);

        let mut rec = record(1, "40.00", SplitMethod::Equal, 1);
        rec.paid_by = Some(99);
        engine.process(rec).unwrap();

        let report = engine.balance_report().unwrap();
        assert_eq!(report.unresolved, vec![99]);
    }

    #[test]
    fn test_balance_report_is_idempotent() {
        let mut engine = engine(&[(1, "Alice"), (2, "Bob")]);
        engine
            .process(record(1, "30.00", SplitMethod::Equal, 1))
            .unwrap();
        engine
            .process(record(2, "10.00", SplitMethod::Equal, 2))
            .unwrap();

        let first = engine.balance_report().unwrap();
        let second = engine.balance_report().unwrap();
        assert_eq!(first, second);
    }
}
