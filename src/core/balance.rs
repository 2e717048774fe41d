//! Balance aggregator
//!
//! Computes each member's net balance from a set of processed expenses:
//! the payer of every expense is credited its full amount, and every
//! split-detail member is debited their share. Balances are derived fresh
//! on every query from whatever expense set the caller supplies; nothing
//! here is persisted.
//!
//! # Unresolved participants
//!
//! A payer or split member missing from the member directory contributes
//! nothing to the balances. Instead of dropping such contributions
//! silently, the aggregator records the offending IDs in
//! [`BalanceReport::unresolved`] so callers can decide whether to treat a
//! partial result as a failure.

use crate::core::directory::MemberDirectory;
use crate::core::ledger::Ledger;
use crate::types::{BalanceReport, MemberBalance, MemberId, ProcessedExpense, SettleError};
use std::collections::BTreeSet;

/// Aggregate net balances over a set of processed expenses
///
/// For each expense the payer (explicit `paid_by`, else the owner) is
/// credited with the expense amount, and each split-detail member is
/// debited their share. The net balance is `total_paid - total_owed`.
///
/// Expenses may be supplied in any order: the aggregation is pure
/// summation, so it is commutative and associative.
///
/// # Arguments
///
/// * `expenses` - The processed expenses in scope
/// * `directory` - Member directory resolving IDs to names and emails
///
/// # Returns
///
/// A [`BalanceReport`] with balances sorted by member ID and the sorted,
/// deduplicated IDs of any unresolved participants. Members that never
/// appear as payer or split participant are absent from the balances.
///
/// # Errors
///
/// Returns an error if accumulating a contribution would overflow.
pub fn aggregate_balances<'a, I>(
    expenses: I,
    directory: &MemberDirectory,
) -> Result<BalanceReport, SettleError>
where
    I: IntoIterator<Item = &'a ProcessedExpense>,
{
    let mut ledger = Ledger::new();
    let mut unresolved: BTreeSet<MemberId> = BTreeSet::new();

    for expense in expenses {
        let payer = expense.record.payer();
        if directory.contains(payer) {
            ledger.credit_paid(payer, expense.record.amount)?;
        } else {
            unresolved.insert(payer);
        }

        for share in &expense.split_details {
            if directory.contains(share.member) {
                ledger.add_owed(share.member, share.amount)?;
            } else {
                unresolved.insert(share.member);
            }
        }
    }

    // Every ledger entry was created through a successful directory check,
    // so the lookup here cannot miss.
    let balances: Vec<MemberBalance> = ledger
        .entries_sorted()
        .into_iter()
        .filter_map(|entry| {
            directory.get(entry.member).map(|profile| MemberBalance {
                member: entry.member,
                name: profile.name.clone(),
                email: profile.email.clone(),
                total_paid: entry.total_paid,
                total_owed: entry.total_owed,
                balance: entry.total_paid - entry.total_owed,
            })
        })
        .collect();

    Ok(BalanceReport {
        balances,
        unresolved: unresolved.into_iter().collect(),
    })
}
